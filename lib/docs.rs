//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Discretization](#discretization)
//! - [The Crank-Nicolson scheme](#the-crank-nicolson-scheme)
//! - [Structure of the linear system](#structure-of-the-linear-system)
//! - [Factorization without pivoting](#factorization-without-pivoting)
//! - [Barriers](#barriers)
//!
//! # Background
//! This crate integrates the two-dimensional time-dependent Schrödinger
//! equation (TDSE) for a free particle. In units where *ħ* = 2 *m* = 1, the
//! equation reads
//! ```text
//!   ∂ψ      ∂²    ∂²
//! i -- = -( --- + --- ) ψ(x, y, t)
//!   ∂t      ∂x²   ∂y²
//! ```
//! over the rectangle \[0, *L*<sub>*x*</sub>\] × \[0, *L*<sub>*y*</sub>\],
//! with ψ pinned to zero on the boundary (a hard-walled box). There is no
//! potential term; obstacles such as a double slit enter through a separate
//! masking step described [below](#barriers).
//!
//! # Discretization
//! Space is sampled on a uniform rectangular grid,
//! ```text
//! x[jx] = jx δx, jx ∊ {0, ..., Nx - 1}
//! y[iy] = iy δy, iy ∊ {0, ..., Ny - 1}
//! ```
//! with *N* = ⌊*L* / *δ*⌋ + 1 points per axis. The boundary ring is fixed at
//! zero for all time, so the unknowns of the evolution are only the values of
//! ψ on the (*N*<sub>*y*</sub> - 2) × (*N*<sub>*x*</sub> - 2) interior block.
//! These are flattened into a single vector column by column,
//! ```text
//! k = (jx - 1) (Ny - 2) + (iy - 1)
//! ```
//! for interior points *iy* ∊ \[1, *N*<sub>*y*</sub> - 2\], *jx* ∊ \[1,
//! *N*<sub>*x*</sub> - 2\]. Every component of the crate reads this mapping
//! from [`Grid::flatten`][crate::grid::Grid::flatten], so operators, initial
//! states, and barrier masks always agree on which vector entry is which
//! grid point.
//!
//! # The Crank-Nicolson scheme
//! Let *L* denote the standard five-point discrete Laplacian over the
//! interior block. Averaging the explicit and implicit Euler steps for the
//! TDSE gives the Crank-Nicolson scheme[^1],
//! ```text
//!       i δt                i δt
//! (I - ----- L) ψ(t + δt) = (I + ----- L) ψ(t)
//!        2                    2
//! ```
//! Writing the per-axis ratios
//! ```text
//!        -δt        i δt            -δt        i δt
//! rx = -------- = -------- ,  ry = -------- = --------
//!      2 i δx²      2 δx²          2 i δy²      2 δy²
//! ```
//! and expanding the Laplacian, one time step solves `A ψ' = M ψ` where both
//! operators carry the same five-point sparsity pattern:
//! ```text
//! A: a0 = 1 + 2 rx + 2 ry on the diagonal, -ry at y-neighbors,
//!    -rx at x-neighbors
//! M: b0 = 1 - 2 rx - 2 ry on the diagonal, +ry at y-neighbors,
//!    +rx at x-neighbors
//! ```
//! Since *rx* and *ry* are purely imaginary, `A = I - iK` and `M = I + iK`
//! for a single real symmetric matrix *K*, and the full step operator
//! `inv(A) M` is the Cayley transform of *K*. The scheme is therefore
//! unconditionally stable and exactly unitary in exact arithmetic[^2]; in
//! `f32` the norm of ψ drifts slowly from rounding and from truncation
//! against the zeroed boundary ring, and no renormalization is applied to
//! hide that drift.
//!
//! The default step size is *δt* = *δx*² / 4, which puts |*rx*| = 1/8 for
//! square cells. Stability does not require this, but accuracy of the
//! *O*(*δt*²) + *O*(*δx*²) truncation error does favor small ratios.
//!
//! # Structure of the linear system
//! Under the column-major flattening, the y-neighbors of interior index *k*
//! sit at *k* ± 1 and the x-neighbors at *k* ± (*N*<sub>*y*</sub> - 2):
//! ```text
//! row k:   [ ... -rx ... -ry  a0  -ry ... -rx ... ]
//! column:     k-(Ny-2)  k-1   k   k+1    k+(Ny-2)
//! ```
//! Neighbor terms whose stencil arm crosses the boundary ring are simply
//! absent (the boundary value is zero, so they contribute nothing). Every
//! row holds at most five entries and no entry lies further than
//! *N*<sub>*y*</sub> - 2 columns from the diagonal, so `A` is banded with
//! half-bandwidth *b* = *N*<sub>*y*</sub> - 2. The solver stores only the
//! 2 *b* + 1 in-band diagonals and factors them in place, costing
//! *O*(*N* *b*²) once and *O*(*N* *b*) per subsequent solve, far below the
//! *O*(*N*³) of a dense factorization for the tall, narrow grids this crate
//! targets.
//!
//! # Factorization without pivoting
//! The banded factorization performs no row exchanges. This is justified by
//! strict row diagonal dominance: with *s* = *δt*/2 (1/*δx*² + 1/*δy*²),
//! ```text
//! |a0| = √(1 + 4 s²) > 2 s ≥ Σ |off-diagonal entries in the row|
//! ```
//! since the off-diagonal moduli sum to at most 2 (|*rx*| + |*ry*|) = 2 *s*
//! (rows near the boundary hold fewer terms and are more dominant still).
//! Diagonal dominance is inherited by every Schur complement formed during
//! elimination, so no pivot can vanish[^3]. The solver nevertheless checks
//! each pivot and reports a
//! [`Factorization`][crate::error::SolveError::Factorization] error rather
//! than dividing blindly, which also covers operators built with
//! non-default coefficients.
//!
//! # Barriers
//! Hard obstacles are not part of the operator pair. Instead, a mask such as
//! [`DoubleSlit`][crate::mask::DoubleSlit] precomputes the set of interior
//! indices its geometry covers, and the engine zeroes ψ over that set
//! between steps. This is the limit of an infinitely high potential applied
//! impulsively: probability on the blocked cells is discarded, and waves
//! emanating from the slit openings interfere downstream exactly as in the
//! textbook two-slit experiment. Because the mask is all that distinguishes
//! an obstacle, the same factorized operators serve for any barrier
//! geometry on a given grid.
//!
//! [^1]: J. Crank and P. Nicolson, "A practical method for numerical
//! evaluation of solutions of partial differential equations of the
//! heat-conduction type." Proc. Camb. Phil. Soc. **43** 50-67 (1947).
//!
//! [^2]: A. Goldberg, H. M. Schey, and J. L. Schwartz, "Computer-generated
//! motion pictures of one-dimensional quantum-mechanical transmission and
//! reflection phenomena." American Journal of Physics **35** 3 177-186
//! (1967).
//!
//! [^3]: G. H. Golub and C. F. Van Loan, *Matrix Computations*, 4th ed.,
//! §4.1.1 (Johns Hopkins University Press, 2013).
