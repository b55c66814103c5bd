//! End-to-end checks of the interferometer pipeline on the double-slit
//! scattering study.

use num_complex::Complex32 as C32;
use cn2d::{
    grid::{ Coeffs, Grid },
    mask::{ DoubleSlit, SlitParams },
    operator::CrankNicolson,
    timedep::Evolution,
    wavefunction::GaussianPacket,
};

const EXTENT: (f32, f32) = (6.0, 4.0);
const STEP: (f32, f32) = (0.04, 0.04);

#[test]
fn study_dimensions_are_reproduced() {
    let grid = Grid::new(EXTENT, STEP).unwrap();
    assert_eq!((grid.nx(), grid.ny()), (151, 101));
    assert_eq!(grid.n_interior(), 149 * 99);

    let coeffs = Coeffs::derive(&grid);
    assert!((coeffs.rx - C32::new(0.0, 0.125)).norm() < 1e-6);
    assert!((coeffs.ry - coeffs.rx).norm() < 1e-6);

    let params = SlitParams::default_for(&grid);
    assert_eq!(
        (params.thickness, params.width, params.height),
        (3, 18, 37),
    );
    let mask = DoubleSlit::new(&grid, params);
    assert_eq!(mask.slit_origin(), (74, 41));
    // 90 blocked rows in each of the 3 barrier columns
    assert_eq!(mask.indices_to_zero().len(), 270);
}

#[test]
fn packet_crosses_the_barrier_through_the_openings() {
    let grid = Grid::new(EXTENT, STEP).unwrap();
    let packet = GaussianPacket::entering(&grid);
    let mut engine
        = Evolution::assemble(grid, &CrankNicolson, &packet).unwrap();
    let mask = DoubleSlit::new(&grid, SlitParams::default_for(&grid));
    let p0 = engine.probability();
    assert!(p0 > 0.0);

    // before any interaction, one step is near-unitary
    engine.evolve().unwrap();
    let p1 = engine.probability();
    assert!(
        (p1 - p0).abs() / p0 < 1e-3,
        "one-step drift too large: {p0} -> {p1}",
    );

    let barrier_right = mask.slit_origin().0 as usize
        + mask.params().thickness;
    for _ in 0..60 {
        engine.interact(&mask);
        for &k in mask.indices_to_zero() {
            assert_eq!(engine.modulus(k), 0.0);
        }
        engine.evolve().unwrap();
    }

    // probability past the barrier columns means transmission through the
    // two openings
    let transmitted: f32 = engine.psi().iter().enumerate()
        .filter(|(k, _)| grid.unflatten(*k).1 >= barrier_right)
        .map(|(_, p)| p.norm_sqr())
        .sum();
    assert!(
        transmitted / p0 > 1e-5,
        "no probability transmitted: {transmitted:e}",
    );
    assert!(engine.max_amplitude() > 0.0);
    assert!(engine.probability() <= p1 * (1.0 + 1e-4));
}

#[test]
fn reset_replays_the_first_step_bitwise() {
    let grid = Grid::new((2.0, 1.5), (0.05, 0.05)).unwrap();
    let packet = GaussianPacket::entering(&grid);
    let mut engine
        = Evolution::assemble(grid, &CrankNicolson, &packet).unwrap();
    let mask = DoubleSlit::new(
        &grid,
        SlitParams { thickness: 2, width: 4, height: 8 },
    );
    assert!(!mask.indices_to_zero().is_empty());

    engine.evolve().unwrap();
    let first_step = engine.psi().to_owned();

    for _ in 0..4 {
        engine.interact(&mask);
        engine.evolve().unwrap();
    }
    engine.reset();
    engine.evolve().unwrap();
    assert_eq!(engine.psi().to_owned(), first_step);
}
