//! Shared parameters for the double-slit scattering study.

use ndarray as nd;
use num_complex::Complex32 as C32;
use cn2d::{
    grid::Grid,
    timedep::Evolution,
};

/// Domain extent; x is the propagation direction.
pub const EXTENT: (f32, f32) = (6.0, 4.0);

/// Step sizes, giving a 151 x 101 point grid over [`EXTENT`].
pub const STEP: (f32, f32) = (0.04, 0.04);

/// Number of frames to advance; one frame is one barrier interaction
/// followed by one step.
pub const N_FRAMES: usize = 240;

/// Record a probability-map snapshot every this many frames.
pub const SNAP_EVERY: usize = 8;

/// Sample `|ψ|²` over the interior block as a `(Ny-2) × (Nx-2)` map.
pub fn probability_map(engine: &Evolution) -> nd::Array2<f32> {
    let grid: &Grid = engine.grid();
    let psi: nd::ArrayView1<C32> = engine.psi();
    let mut map: nd::Array2<f32>
        = nd::Array2::zeros((grid.rows(), grid.cols()));
    for (k, p) in psi.iter().enumerate() {
        let (iy, jx) = grid.unflatten(k);
        map[[iy - 1, jx - 1]] = p.norm_sqr();
    }
    map
}
