//! Synthesis of initial wavefunctions on the interior grid.
//!
//! Strategies implement [`WfBuild`] and produce the flattened complex field
//! consumed by the evolution engine. Flattening is column-major through
//! [`Grid::flatten`], the same mapping used by operator assembly and the
//! barrier mask.

use ndarray as nd;
use num_complex::Complex32 as C32;
use num_traits::Zero;
use crate::{
    Arr2,
    error::BuildError,
    grid::Grid,
};

pub type WfResult<T> = Result<T, BuildError>;

/// Default packet spread.
pub const DEF_SIGMA: f32 = 0.2;

/// Default carrier wavenumber.
pub const DEF_WAVENUMBER: f32 = 15.0 * std::f32::consts::PI;

/// Basic requirements for an initial-condition strategy.
pub trait WfBuild {
    /// Produce the flattened initial field for a given discretization.
    fn build_wavefunction(&self, grid: &Grid) -> WfResult<nd::Array1<C32>>;
}

/// Gaussian-modulated plane wave.
///
/// Samples
/// ```text
/// ψ(x, y) = exp(-((x - x0)² + (y - y0)²) / 2σ²) · exp(i kx (x - x0))
/// ```
/// on an `(Ny-2) × (Nx-2)` point grid spanning `[0, Lx] × [0, Ly]`, then
/// optionally clears the outermost ring of samples (see [`zero_rim`]) before
/// flattening.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GaussianPacket {
    /// Packet center along x.
    pub x0: f32,
    /// Packet center along y.
    pub y0: f32,
    /// Packet spread.
    pub sigma: f32,
    /// Carrier wavenumber along x.
    pub kx: f32,
    /// Clear the outermost ring of samples after synthesis.
    pub rim: bool,
}

impl GaussianPacket {
    /// Packet at the reference entry point: centered at `(Lx/5, Ly/2)` with
    /// [`DEF_SIGMA`], [`DEF_WAVENUMBER`], and the rim cleared.
    pub fn entering(grid: &Grid) -> Self {
        Self {
            x0: grid.lx() / 5.0,
            y0: grid.ly() / 2.0,
            sigma: DEF_SIGMA,
            kx: DEF_WAVENUMBER,
            rim: true,
        }
    }

    /// Sample the packet on the interior-sized point grid, without
    /// flattening.
    pub fn sample(&self, grid: &Grid) -> WfResult<nd::Array2<C32>> {
        BuildError::check_spread(self.sigma)?;
        let nrows = grid.rows();
        let ncols = grid.cols();
        let mut store: Vec<C32> = Vec::new();
        store.try_reserve_exact(nrows * ncols)?;
        let sx = if ncols > 1 { grid.lx() / (ncols - 1) as f32 } else { 0.0 };
        let sy = if nrows > 1 { grid.ly() / (nrows - 1) as f32 } else { 0.0 };
        let s2 = self.sigma * self.sigma;
        for iy in 0..nrows {
            let uy = sy * iy as f32 - self.y0;
            for jx in 0..ncols {
                let ux = sx * jx as f32 - self.x0;
                let env = (-0.5 * (ux * ux + uy * uy) / s2).exp();
                store.push(env * C32::cis(self.kx * ux));
            }
        }
        let mut psi: nd::Array2<C32>
            = nd::Array2::from_shape_vec((nrows, ncols), store).unwrap();
        if self.rim {
            zero_rim(&mut psi);
        }
        Ok(psi)
    }
}

impl WfBuild for GaussianPacket {
    fn build_wavefunction(&self, grid: &Grid) -> WfResult<nd::Array1<C32>> {
        let field = self.sample(grid)?;
        flatten(grid, &field)
    }
}

/// Clear the outermost ring of a 2-D field in place.
///
/// On an interior-shaped buffer this zeroes the innermost ring of interior
/// points, not the true domain boundary, which is never stored; strategies
/// carry an explicit switch for the pass so the choice stays visible.
/// Buffers with 2 or fewer rows or columns are cleared entirely.
pub fn zero_rim<S>(field: &mut Arr2<S>)
where S: nd::DataMut<Elem = C32>
{
    if field.is_empty() {
        return;
    }
    let (m, n) = field.dim();
    field.row_mut(0).fill(C32::zero());
    field.row_mut(m - 1).fill(C32::zero());
    field.column_mut(0).fill(C32::zero());
    field.column_mut(n - 1).fill(C32::zero());
}

/// Flatten an interior-shaped field column-major through the shared mapping.
///
/// *Panics if `field` is not `(Ny-2) × (Nx-2)`.*
pub fn flatten<S>(grid: &Grid, field: &Arr2<S>) -> WfResult<nd::Array1<C32>>
where S: nd::Data<Elem = C32>
{
    assert_eq!(
        field.dim(), (grid.rows(), grid.cols()),
        "field shape does not match the interior block",
    );
    let mut store: Vec<C32> = Vec::new();
    store.try_reserve_exact(grid.n_interior())?;
    store.resize(grid.n_interior(), C32::zero());
    for ((iy, jx), p) in field.indexed_iter() {
        store[grid.flatten(iy + 1, jx + 1)] = *p;
    }
    Ok(nd::Array1::from_vec(store))
}

#[cfg(test)]
mod test {
    use super::*;

    fn toy_grid() -> Grid {
        Grid::with_sizes((1.0, 1.0), (6, 6)).unwrap()
    }

    fn centered(rim: bool) -> GaussianPacket {
        GaussianPacket { x0: 0.5, y0: 0.5, sigma: 0.5, kx: 0.0, rim }
    }

    #[test]
    fn peak_sits_at_center() {
        let grid = toy_grid();
        let psi = centered(true).build_wavefunction(&grid).unwrap();
        assert_eq!(psi.len(), 16);
        let vmax = psi.iter().map(|p| p.norm()).fold(f32::NEG_INFINITY, f32::max);
        assert!(vmax > 0.0);
        // the four samples nearest (0.5, 0.5) share the peak
        for (iy, jx) in [(2, 2), (3, 2), (2, 3), (3, 3)] {
            let k = grid.flatten(iy, jx);
            assert!((psi[k].norm() - vmax).abs() < 1e-6, "index {}", k);
        }
    }

    #[test]
    fn rim_pass_clears_the_outer_ring() {
        let grid = toy_grid();
        let psi = centered(true).build_wavefunction(&grid).unwrap();
        for k in 0..grid.n_interior() {
            let (iy, jx) = grid.unflatten(k);
            let on_rim = iy == 1 || iy == grid.rows()
                || jx == 1 || jx == grid.cols();
            if on_rim {
                assert_eq!(psi[k], C32::zero(), "index {}", k);
            } else {
                assert!(psi[k].norm() > 0.0, "index {}", k);
            }
        }
    }

    #[test]
    fn rim_pass_is_optional() {
        let grid = toy_grid();
        let psi = centered(false).build_wavefunction(&grid).unwrap();
        assert!(psi.iter().all(|p| p.norm() > 0.0));
    }

    #[test]
    fn carrier_leaves_modulus_unchanged() {
        let grid = toy_grid();
        let still = centered(false);
        let moving = GaussianPacket { kx: DEF_WAVENUMBER, ..still };
        let a = still.build_wavefunction(&grid).unwrap();
        let b = moving.build_wavefunction(&grid).unwrap();
        for (pa, pb) in a.iter().zip(b.iter()) {
            assert!((pa.norm() - pb.norm()).abs() < 1e-6);
        }
    }

    #[test]
    fn zero_rim_touches_only_the_ring() {
        let mut field: nd::Array2<C32>
            = nd::Array2::from_elem((4, 5), C32::from(1.0));
        zero_rim(&mut field);
        for ((iy, jx), v) in field.indexed_iter() {
            let on_rim = iy == 0 || iy == 3 || jx == 0 || jx == 4;
            if on_rim {
                assert_eq!(*v, C32::zero());
            } else {
                assert_eq!(*v, C32::from(1.0));
            }
        }
    }

    #[test]
    fn zero_rim_clears_thin_buffers() {
        let mut field: nd::Array2<C32>
            = nd::Array2::from_elem((2, 3), C32::from(1.0));
        zero_rim(&mut field);
        assert!(field.iter().all(|v| v.is_zero()));
    }

    #[test]
    fn flatten_matches_shared_mapping() {
        let grid = toy_grid();
        let field: nd::Array2<C32> = nd::Array2::from_shape_fn(
            (grid.rows(), grid.cols()),
            |(iy, jx)| C32::new(iy as f32, jx as f32),
        );
        let psi = flatten(&grid, &field).unwrap();
        for k in 0..grid.n_interior() {
            let (iy, jx) = grid.unflatten(k);
            assert_eq!(psi[k], C32::new((iy - 1) as f32, (jx - 1) as f32));
        }
    }

    #[test]
    fn bad_spread_is_rejected() {
        let grid = toy_grid();
        let packet = GaussianPacket { sigma: 0.0, ..centered(true) };
        assert!(matches!(
            packet.build_wavefunction(&grid),
            Err(BuildError::BadSpread(_)),
        ));
    }

    #[test]
    fn oversized_grid_reports_allocation_failure() {
        // the sample buffer would need more bytes than isize::MAX
        let grid = Grid::with_sizes((1.0, 1.0), (usize::MAX / 32, 6)).unwrap();
        assert!(matches!(
            centered(true).build_wavefunction(&grid),
            Err(BuildError::Alloc(_)),
        ));
    }
}
