use std::path::PathBuf;
use ndarray as nd;
use cn2d::{
    mkdir,
    write_npz,
    grid::{ Coeffs, Grid },
    mask::{ DoubleSlit, SlitParams },
    operator::CrankNicolson,
    timedep::Evolution,
    wavefunction::GaussianPacket,
};
use lib::systems::double_slit::{
    EXTENT, STEP, N_FRAMES, SNAP_EVERY, probability_map,
};

fn main() -> anyhow::Result<()> {
    let grid = Grid::new(EXTENT, STEP)?;
    let packet = GaussianPacket::entering(&grid);
    let mut engine = Evolution::assemble(grid, &CrankNicolson, &packet)?;
    let mask = DoubleSlit::new(&grid, SlitParams::default_for(&grid));
    eprintln!(
        "grid {}x{} ({} unknowns), {} masked points",
        grid.nx(), grid.ny(), grid.n_interior(),
        mask.indices_to_zero().len(),
    );

    let mut prob: Vec<f32> = Vec::with_capacity(N_FRAMES + 1);
    let mut vmax: Vec<f32> = Vec::with_capacity(N_FRAMES + 1);
    let mut snaps: Vec<nd::Array2<f32>> = Vec::new();
    prob.push(engine.probability());
    vmax.push(engine.max_amplitude());
    snaps.push(probability_map(&engine));
    for frame in 1..=N_FRAMES {
        engine.interact(&mask);
        engine.evolve()?;
        prob.push(engine.probability());
        vmax.push(engine.max_amplitude());
        if frame % SNAP_EVERY == 0 {
            snaps.push(probability_map(&engine));
        }
        eprint!("\r  {} / {} ", frame, N_FRAMES);
    }
    eprintln!();

    let dt = Coeffs::derive(&grid).dt;
    let x: nd::Array1<f32> = nd::Array1::linspace(0.0, grid.lx(), grid.nx());
    let y: nd::Array1<f32> = nd::Array1::linspace(0.0, grid.ly(), grid.ny());
    let t: nd::Array1<f32> = (0..=N_FRAMES).map(|n| n as f32 * dt).collect();
    let prob: nd::Array1<f32> = prob.into_iter().collect();
    let vmax: nd::Array1<f32> = vmax.into_iter().collect();
    let frames: nd::Array3<f32>
        = nd::stack(
            nd::Axis(0),
            &snaps.iter().map(|s| s.view()).collect::<Vec<_>>(),
        )?;

    let outdir = PathBuf::from("output");
    mkdir!(outdir);
    write_npz!(
        outdir.join("double_slit.npz"),
        arrays: {
            "x" => &x,
            "y" => &y,
            "t" => &t,
            "prob" => &prob,
            "vmax" => &vmax,
            "frames" => &frames,
        }
    );
    println!("done");
    Ok(())
}
