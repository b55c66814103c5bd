use std::path::PathBuf;
use ndarray as nd;
use cn2d::{
    mkdir,
    write_npz,
    grid::{ Coeffs, Grid },
    operator::CrankNicolson,
    timedep::Evolution,
    wavefunction::GaussianPacket,
};

const EXTENT: (f32, f32) = (2.0, 2.0);
const STEP: (f32, f32) = (0.04, 0.04);
const N_STEPS: usize = 100;

fn main() -> anyhow::Result<()> {
    let grid = Grid::new(EXTENT, STEP)?;
    let packet = GaussianPacket {
        x0: grid.lx() / 2.0,
        y0: grid.ly() / 2.0,
        sigma: 0.2,
        kx: 0.0,
        rim: true,
    };
    let dt0 = Coeffs::derive(&grid).dt;
    let scales = [0.25_f32, 0.5, 1.0, 2.0, 4.0, 8.0];

    let mut drift: Vec<f32> = Vec::with_capacity(scales.len());
    for &scale in scales.iter() {
        let mut engine = Evolution::assemble_with_dt(
            grid, scale * dt0, &CrankNicolson, &packet)?;
        let p0 = engine.probability();
        for _ in 0..N_STEPS {
            engine.evolve()?;
        }
        let rel = (engine.probability() - p0).abs() / p0;
        eprintln!(
            "dt = {:.2e}: relative drift {:.3e} after {} steps",
            scale * dt0, rel, N_STEPS,
        );
        drift.push(rel);
    }

    let dts: nd::Array1<f32> = scales.iter().map(|s| s * dt0).collect();
    let drift: nd::Array1<f32> = drift.into_iter().collect();

    let outdir = PathBuf::from("output");
    mkdir!(outdir);
    write_npz!(
        outdir.join("norm_drift.npz"),
        arrays: {
            "dt" => &dts,
            "drift" => &drift,
        }
    );
    println!("done");
    Ok(())
}
