//! Provides constructs for automated solution of the two-dimensional,
//! time-dependent Schrödinger equation on a rectangular grid via the
//! Crank-Nicolson implicit finite-difference scheme[^1], sized and factorized
//! for repeated per-frame stepping (e.g. to drive a real-time view of a wave
//! packet crossing a double-slit barrier).
//!
//! The modules follow the lifecycle of a simulation:
//! - [`grid`]: discretization sizes, stencil coefficients, and the interior
//!   index mapping shared by every other component
//! - [`sparse`]: triplet-assembled compressed sparse row matrices
//! - [`operator`]: assembly of the paired implicit/explicit step operators
//! - [`wavefunction`]: synthesis of the initial state
//! - [`mask`]: double-slit barrier geometry as a set of interior indices
//! - [`solve`]: banded LU factorization backing the implicit half of a step
//! - [`timedep`]: the evolution engine composing all of the above
//!
//! See [`docs`] for theoretical background.
//!
//! [^1]: J. Crank, P. Nicolson, "A practical method for numerical evaluation
//!     of solutions of partial differential equations of the heat-conduction
//!     type," Math. Proc. Camb. Phil. Soc. **43**, 50 (1947).

pub mod error;
pub mod grid;
pub mod sparse;
pub mod operator;
pub mod wavefunction;
pub mod mask;
pub mod solve;
pub mod timedep;
pub mod utils;

pub mod docs;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
pub type Arr2<S> = ndarray::ArrayBase<S, ndarray::Ix2>;
