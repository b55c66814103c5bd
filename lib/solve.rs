//! Banded direct solver for the implicit half of each step.
//!
//! The implicit operator assembled over the column-major interior mapping is
//! banded with half-bandwidth `Ny-2`. [`BandedLu`] compresses it to general
//! band storage, eliminates in place without pivoting, and substitutes in
//! `O(N·b)` per solve, so the one `O(N·b²)` factorization at construction
//! amortizes over every subsequent frame.
//!
//! Pivotless elimination is safe for the operators this crate derives: they
//! are strictly row diagonally dominant (see [`docs`][crate::docs]). A
//! vanishing pivot is still detected and reported rather than assumed away.

use ndarray as nd;
use num_complex::Complex32 as C32;
use num_traits::Zero;
use crate::{
    Arr1,
    error::SolveError,
    sparse::CsrMatrix,
};

pub type SolveResult<T> = Result<T, SolveError>;

/// Pivot moduli at or below this threshold are treated as singular.
pub(crate) const PIVOT_EPSILON: f32 = 1e-12;

/// LU factors of a banded square matrix.
///
/// Storage holds the `2b+1` in-band diagonals as rows of a dense array:
/// entry `(i, j)` of the source matrix lives at `[b + i - j, j]`. After
/// factorization the strictly lower rows hold the unit-diagonal `L`
/// multipliers and the rest holds `U`.
#[derive(Clone, Debug)]
pub struct BandedLu {
    n: usize,
    b: usize,
    band: nd::Array2<C32>,
}

impl BandedLu {
    /// Compress a square sparse matrix to band storage and factorize it.
    ///
    /// The half-bandwidth is detected from the stored entries, so any banded
    /// operator factors correctly regardless of the stencil that produced
    /// it.
    pub fn factorize(a: &CsrMatrix) -> SolveResult<Self> {
        let (nrows, ncols) = a.shape();
        if nrows != ncols {
            return Err(SolveError::NonSquare(nrows, ncols));
        }
        let n = nrows;
        let b = a.iter()
            .map(|(i, j, _)| i.abs_diff(j))
            .max()
            .unwrap_or(0);

        let mut store: Vec<C32> = Vec::new();
        store.try_reserve_exact((2 * b + 1) * n)?;
        store.resize((2 * b + 1) * n, C32::zero());
        let mut band: nd::Array2<C32>
            = nd::Array2::from_shape_vec((2 * b + 1, n), store).unwrap();
        for (i, j, v) in a.iter() {
            band[[b + i - j, j]] = v;
        }
        Self::eliminate(n, b, band)
    }

    fn eliminate(n: usize, b: usize, mut band: nd::Array2<C32>)
        -> SolveResult<Self>
    {
        for k in 0..n {
            let piv = band[[b, k]];
            if !piv.is_finite() || piv.norm() <= PIVOT_EPSILON {
                return Err(SolveError::Factorization {
                    col: k,
                    modulus: piv.norm(),
                });
            }
            let imax = (k + b).min(n - 1);
            for i in k + 1..=imax {
                let m = band[[b + i - k, k]] / piv;
                band[[b + i - k, k]] = m;
                if m.is_zero() {
                    continue;
                }
                for j in k + 1..=imax {
                    let u = band[[b + k - j, j]];
                    band[[b + i - j, j]] -= m * u;
                }
            }
        }
        Ok(Self { n, b, band })
    }

    /// Matrix dimension.
    pub fn dim(&self) -> usize { self.n }

    /// Detected half-bandwidth.
    pub fn bandwidth(&self) -> usize { self.b }

    /// Solve `A x = rhs` in place.
    ///
    /// *Panics if `rhs.len() != self.dim()`.*
    pub fn solve_in_place(&self, rhs: &mut nd::Array1<C32>) {
        assert_eq!(
            rhs.len(), self.n,
            "right-hand side length does not match the matrix dimension",
        );
        let b = self.b;
        let n = self.n;
        // forward: L y = rhs, unit diagonal
        for i in 0..n {
            let mut acc = rhs[i];
            for j in i.saturating_sub(b)..i {
                acc -= self.band[[b + i - j, j]] * rhs[j];
            }
            rhs[i] = acc;
        }
        // backward: U x = y
        for i in (0..n).rev() {
            let mut acc = rhs[i];
            for j in i + 1..=(i + b).min(n - 1) {
                acc -= self.band[[b + i - j, j]] * rhs[j];
            }
            rhs[i] = acc / self.band[[b, i]];
        }
    }

    /// Solve `A x = rhs` into fresh storage.
    ///
    /// *Panics if `rhs.len() != self.dim()`.*
    pub fn solve<S>(&self, rhs: &Arr1<S>) -> nd::Array1<C32>
    where S: nd::Data<Elem = C32>
    {
        let mut x = rhs.to_owned();
        self.solve_in_place(&mut x);
        x
    }
}
