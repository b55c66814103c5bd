//! Discretization sizes, stencil coefficients, and the interior index
//! mapping.
//!
//! Everything downstream of this module agrees on sizes and indices by
//! reading them from a single [`Grid`] value. In particular [`Grid::flatten`]
//! and [`Grid::unflatten`] are the only implementation of the column-major
//! interior mapping in this crate.

use num_complex::Complex32 as C32;
use crate::error::GridError;

pub type GridResult<T> = Result<T, GridError>;

/// Rectangular discretization of the domain `[0, Lx] × [0, Ly]`, boundary
/// ring included.
///
/// The unknowns of the linear system live on the `(Ny-2) × (Nx-2)` interior
/// block; interior point `(iy, jx)` with `iy ∈ [1, Ny-2]`, `jx ∈ [1, Nx-2]`
/// flattens to `k = (jx-1)(Ny-2) + (iy-1)`, column-major over the interior.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Grid {
    nx: usize,
    ny: usize,
    dx: f32,
    dy: f32,
    lx: f32,
    ly: f32,
}

impl Grid {
    /// Create a new grid over `[0, extent.0] × [0, extent.1]` with fixed
    /// step sizes, deriving point counts as `N = floor(L/d) + 1` per axis.
    pub fn new(extent: (f32, f32), step: (f32, f32)) -> GridResult<Self> {
        let (lx, ly) = extent;
        let (dx, dy) = step;
        GridError::check_step(dx, dy)?;
        GridError::check_extent(lx, ly)?;
        let nx = (lx / dx).floor() as usize + 1;
        let ny = (ly / dy).floor() as usize + 1;
        GridError::check_interior(nx, ny)?;
        Ok(Self { nx, ny, dx, dy, lx, ly })
    }

    /// Create a new grid over `[0, extent.0] × [0, extent.1]` with fixed
    /// point counts, deriving step sizes as `d = L / (N - 1)` per axis.
    pub fn with_sizes(extent: (f32, f32), sizes: (usize, usize))
        -> GridResult<Self>
    {
        let (lx, ly) = extent;
        let (nx, ny) = sizes;
        GridError::check_extent(lx, ly)?;
        GridError::check_interior(nx, ny)?;
        let dx = lx / (nx - 1) as f32;
        let dy = ly / (ny - 1) as f32;
        Ok(Self { nx, ny, dx, dy, lx, ly })
    }

    /// Total number of grid points along x, boundaries included.
    pub fn nx(&self) -> usize { self.nx }

    /// Total number of grid points along y, boundaries included.
    pub fn ny(&self) -> usize { self.ny }

    /// Step size along x.
    pub fn dx(&self) -> f32 { self.dx }

    /// Step size along y.
    pub fn dy(&self) -> f32 { self.dy }

    /// Domain extent along x.
    pub fn lx(&self) -> f32 { self.lx }

    /// Domain extent along y.
    pub fn ly(&self) -> f32 { self.ly }

    /// Number of interior rows, `Ny - 2`.
    pub fn rows(&self) -> usize { self.ny - 2 }

    /// Number of interior columns, `Nx - 2`.
    pub fn cols(&self) -> usize { self.nx - 2 }

    /// Number of interior unknowns, `(Nx - 2)(Ny - 2)`.
    pub fn n_interior(&self) -> usize { (self.nx - 2) * (self.ny - 2) }

    /// Whether `(iy, jx)` is an interior point.
    pub fn contains(&self, iy: usize, jx: usize) -> bool {
        (1..=self.ny - 2).contains(&iy) && (1..=self.nx - 2).contains(&jx)
    }

    /// Map the interior point `(iy, jx)` to its linear index
    /// `k = (jx-1)(Ny-2) + (iy-1)`.
    ///
    /// *Panics if `(iy, jx)` is not an interior point.*
    pub fn flatten(&self, iy: usize, jx: usize) -> usize {
        assert!(
            self.contains(iy, jx),
            "point ({}, {}) lies outside the {}x{} interior block",
            iy, jx, self.ny - 2, self.nx - 2,
        );
        (jx - 1) * (self.ny - 2) + (iy - 1)
    }

    /// Recover the interior point `(iy, jx)` from a linear index; inverse of
    /// [`Self::flatten`].
    ///
    /// *Panics if `k ≥ N_center`.*
    pub fn unflatten(&self, k: usize) -> (usize, usize) {
        assert!(
            k < self.n_interior(),
            "index {} out of range for {} interior unknowns",
            k, self.n_interior(),
        );
        (1 + k % (self.ny - 2), 1 + k / (self.ny - 2))
    }
}

/// Scalar coefficients of the Crank-Nicolson stencil.
///
/// With the per-axis stability ratios `rx = -dt/(2i dx²)` and
/// `ry = -dt/(2i dy²)` (both purely imaginary), one step of the free
/// Schrödinger equation reads `A ψ' = M ψ`, where `A` carries `a0` on the
/// diagonal and `-rx`/`-ry` off it, and `M` carries `b0` and `+rx`/`+ry`.
/// See [`docs`][crate::docs] for the derivation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Coeffs {
    /// Time step.
    pub dt: f32,
    /// Stability ratio along x.
    pub rx: C32,
    /// Stability ratio along y.
    pub ry: C32,
    /// Implicit diagonal coefficient, `1 + 2rx + 2ry`.
    pub a0: C32,
    /// Explicit diagonal coefficient, `1 - 2rx - 2ry`.
    pub b0: C32,
}

impl Coeffs {
    /// Derive coefficients with the default time step `dt = dx²/4`.
    pub fn derive(grid: &Grid) -> Self {
        Self::with_dt(grid, grid.dx() * grid.dx() / 4.0)
    }

    /// Derive coefficients with an explicit time step.
    pub fn with_dt(grid: &Grid, dt: f32) -> Self {
        let rx = -C32::from(dt) / (C32::i() * 2.0 * grid.dx() * grid.dx());
        let ry = -C32::from(dt) / (C32::i() * 2.0 * grid.dy() * grid.dy());
        let a0 = C32::from(1.0) + (rx + ry) * 2.0;
        let b0 = C32::from(1.0) - (rx + ry) * 2.0;
        Self { dt, rx, ry, a0, b0 }
    }
}
