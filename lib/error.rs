//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use std::collections::TryReserveError;
use thiserror::Error;

/// Returned when grid parameters produce a degenerate discretization.
#[derive(Debug, Error)]
pub enum GridError {
    /// Returned when a step size is non-positive or non-finite.
    #[error("step sizes must be positive and finite; got ({0}, {1})")]
    BadStep(f32, f32),

    /// Returned when a domain extent is non-positive or non-finite.
    #[error("domain extents must be positive and finite; got ({0}, {1})")]
    BadExtent(f32, f32),

    /// Returned when an axis has fewer than three grid points, leaving no
    /// interior unknowns.
    #[error("grid must have at least one interior point per axis; got sizes ({0}, {1})")]
    NoInterior(usize, usize),
}

impl GridError {
    pub(crate) fn check_step(dx: f32, dy: f32) -> Result<(), Self> {
        (dx > 0.0 && dx.is_finite() && dy > 0.0 && dy.is_finite())
            .then_some(()).ok_or(Self::BadStep(dx, dy))
    }

    pub(crate) fn check_extent(lx: f32, ly: f32) -> Result<(), Self> {
        (lx > 0.0 && lx.is_finite() && ly > 0.0 && ly.is_finite())
            .then_some(()).ok_or(Self::BadExtent(lx, ly))
    }

    pub(crate) fn check_interior(nx: usize, ny: usize) -> Result<(), Self> {
        (nx >= 3 && ny >= 3).then_some(()).ok_or(Self::NoInterior(nx, ny))
    }
}

/// Returned from operator and wavefunction builders.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Returned when a wave packet spread is non-positive or non-finite.
    #[error("packet spread must be positive and finite; got {0}")]
    BadSpread(f32),

    /// [`GridError`]
    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    /// Returned when backing storage for an operator or wavefunction cannot
    /// be acquired.
    #[error("allocation error: {0}")]
    Alloc(#[from] TryReserveError),
}

impl BuildError {
    pub(crate) fn check_spread(sigma: f32) -> Result<(), Self> {
        (sigma > 0.0 && sigma.is_finite())
            .then_some(()).ok_or(Self::BadSpread(sigma))
    }
}

/// Returned from the banded direct solver.
#[derive(Debug, Error)]
pub enum SolveError {
    /// Returned when the matrix to be factorized is not square.
    #[error("banded factorization requires a square matrix; got {0}x{1}")]
    NonSquare(usize, usize),

    /// Returned when elimination encounters a vanishing or non-finite pivot.
    #[error("factorization failed: |pivot| = {modulus:e} at column {col}")]
    Factorization {
        /// Column of the offending pivot.
        col: usize,
        /// Modulus of the offending pivot.
        modulus: f32,
    },

    /// Returned when a solve produces non-finite values.
    #[error("solve produced non-finite values")]
    NonFinite,

    /// Returned when backing storage for the factors cannot be acquired.
    #[error("allocation error: {0}")]
    Alloc(#[from] TryReserveError),
}

/// Returned from evolution engine assembly and stepping.
#[derive(Debug, Error)]
pub enum EvolveError {
    /// Returned when the operator pair and the wavefunction disagree on the
    /// number of interior unknowns.
    #[error("operators and wavefunction have mismatched sizes; got {0} and {1}")]
    SizeMismatch(usize, usize),

    /// [`GridError`]
    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    /// [`BuildError`]
    #[error("build error: {0}")]
    Build(#[from] BuildError),

    /// [`SolveError`]
    #[error("solve error: {0}")]
    Solve(#[from] SolveError),

    /// Returned when backing storage for the engine state cannot be
    /// acquired.
    #[error("allocation error: {0}")]
    Alloc(#[from] TryReserveError),
}

impl EvolveError {
    pub(crate) fn check_sizes(n_ops: usize, n_psi: usize) -> Result<(), Self> {
        (n_ops == n_psi).then_some(()).ok_or(Self::SizeMismatch(n_ops, n_psi))
    }
}
