//! Provides the engine that advances solutions to the 2+1-dimensional
//! (time-dependent) Schrödinger equation (TDSE) for free motion among
//! hard-wall obstacles.
//!
//! One Crank-Nicolson step solves `A ψ' = M ψ` for the next state `ψ'`.
//! `A` is factorized once at construction, so each step costs one sparse
//! multiply and a pair of banded substitutions; obstacles enter between
//! steps by zeroing the state over a [`DoubleSlit`] mask.

use std::mem;
use ndarray as nd;
use num_complex::Complex32 as C32;
use num_traits::Zero;
use crate::{
    error::{ EvolveError, SolveError },
    grid::{ Coeffs, Grid },
    mask::DoubleSlit,
    operator::{ OpBuild, OperatorPair },
    solve::BandedLu,
    sparse::CsrMatrix,
    utils,
    wavefunction::WfBuild,
};

pub type EvolveResult<T> = Result<T, EvolveError>;

/// Time stepper holding a factorized operator pair and the current state.
///
/// The state snapshot taken at construction backs [`reset`][Self::reset],
/// and scratch storage for the explicit product is reused across steps, so
/// stepping allocates nothing.
#[derive(Clone, Debug)]
pub struct Evolution {
    grid: Grid,
    solver: BandedLu,
    explicit: CsrMatrix,
    psi: nd::Array1<C32>,
    psi_backup: nd::Array1<C32>,
    psi_temp: nd::Array1<C32>,
}

impl Evolution {
    /// Create a new engine from a prebuilt operator pair and initial state,
    /// factorizing the implicit operator.
    ///
    /// The backup for [`reset`][Self::reset] is captured here, before any
    /// interaction or step has touched `psi`.
    pub fn new(grid: Grid, operators: OperatorPair, psi: nd::Array1<C32>)
        -> EvolveResult<Self>
    {
        let n = grid.n_interior();
        EvolveError::check_sizes(n, psi.len())?;
        let (mrows, mcols) = operators.explicit.shape();
        EvolveError::check_sizes(n, mrows)?;
        EvolveError::check_sizes(n, mcols)?;
        let solver = BandedLu::factorize(&operators.implicit)?;
        EvolveError::check_sizes(n, solver.dim())?;
        let mut backup: Vec<C32> = Vec::new();
        backup.try_reserve_exact(n)?;
        backup.extend(psi.iter().copied());
        let psi_backup = nd::Array1::from_vec(backup);
        let mut temp: Vec<C32> = Vec::new();
        temp.try_reserve_exact(n)?;
        temp.resize(n, C32::zero());
        let psi_temp = nd::Array1::from_vec(temp);
        Ok(Self {
            grid,
            solver,
            explicit: operators.explicit,
            psi,
            psi_backup,
            psi_temp,
        })
    }

    /// Run both builders over a grid and assemble the engine, using the
    /// default time step.
    ///
    /// See also [`Self::assemble_with_dt`].
    pub fn assemble<O, W>(grid: Grid, op_builder: &O, wf_builder: &W)
        -> EvolveResult<Self>
    where
        O: OpBuild,
        W: WfBuild,
    {
        let coeffs = Coeffs::derive(&grid);
        let operators = op_builder.build_operators(&grid, &coeffs)?;
        let psi = wf_builder.build_wavefunction(&grid)?;
        Self::new(grid, operators, psi)
    }

    /// Run both builders over a grid and assemble the engine with an
    /// explicit time step.
    ///
    /// See also [`Self::assemble`].
    pub fn assemble_with_dt<O, W>(
        grid: Grid,
        dt: f32,
        op_builder: &O,
        wf_builder: &W,
    ) -> EvolveResult<Self>
    where
        O: OpBuild,
        W: WfBuild,
    {
        let coeffs = Coeffs::with_dt(&grid, dt);
        let operators = op_builder.build_operators(&grid, &coeffs)?;
        let psi = wf_builder.build_wavefunction(&grid)?;
        Self::new(grid, operators, psi)
    }

    /// The grid the engine was assembled over.
    pub fn grid(&self) -> &Grid { &self.grid }

    /// Number of interior unknowns.
    pub fn n_interior(&self) -> usize { self.psi.len() }

    /// View of the current state.
    pub fn psi(&self) -> nd::ArrayView1<'_, C32> { self.psi.view() }

    /// Zero the state at every index blocked by a barrier mask. No
    /// allocation.
    ///
    /// *Panics if the mask indexes outside this engine's interior block.*
    pub fn interact(&mut self, mask: &DoubleSlit) {
        if let Some(&last) = mask.indices_to_zero().last() {
            assert!(
                last < self.psi.len(),
                "masked index {} out of range for {} interior unknowns",
                last, self.psi.len(),
            );
        }
        for &k in mask.indices_to_zero() {
            self.psi[k] = C32::zero();
        }
    }

    /// Advance the state by one time step.
    ///
    /// The step is deterministic given the current state and the fixed
    /// operator pair. On failure the prior state is left untouched, so the
    /// caller may [`reset`][Self::reset] and continue.
    pub fn evolve(&mut self) -> EvolveResult<()> {
        self.explicit.mul_vec_into(&self.psi, &mut self.psi_temp);
        self.solver.solve_in_place(&mut self.psi_temp);
        if self.psi_temp.iter().any(|p| !p.is_finite()) {
            return Err(SolveError::NonFinite.into());
        }
        mem::swap(&mut self.psi, &mut self.psi_temp);
        Ok(())
    }

    /// Modulus of the state at linear index `k`.
    ///
    /// *Panics if `k` is out of range; see [`Grid::flatten`] for the index
    /// convention.*
    pub fn modulus(&self, k: usize) -> f32 { self.psi[k].norm() }

    /// Find the largest modulus over all interior points.
    ///
    /// An all-zero state yields `0.0`; an empty one yields the sentinel
    /// `-1.0`.
    pub fn max_amplitude(&self) -> f32 {
        utils::wf_max_modulus(&self.psi).unwrap_or(-1.0)
    }

    /// Total probability currently carried by the state.
    ///
    /// No renormalization is ever applied, so this drifts slowly away from
    /// its initial value as boundary truncation error accumulates.
    pub fn probability(&self) -> f32 { utils::wf_probability(&self.psi) }

    /// Restore the state captured at construction.
    pub fn reset(&mut self) {
        self.psi.assign(&self.psi_backup);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        mask::SlitParams,
        operator::CrankNicolson,
        wavefunction::GaussianPacket,
    };

    fn toy_engine() -> Evolution {
        let grid = Grid::with_sizes((1.0, 1.0), (6, 6)).unwrap();
        let packet = GaussianPacket {
            x0: 0.5,
            y0: 0.5,
            sigma: 0.5,
            kx: 0.0,
            rim: true,
        };
        Evolution::assemble(grid, &CrankNicolson, &packet).unwrap()
    }

    #[test]
    fn mismatched_sizes_are_rejected() {
        let grid = Grid::with_sizes((1.0, 1.0), (6, 6)).unwrap();
        let coeffs = Coeffs::derive(&grid);
        let ops = CrankNicolson.build_operators(&grid, &coeffs).unwrap();
        let psi: nd::Array1<C32> = nd::Array1::zeros(7);
        assert!(matches!(
            Evolution::new(grid, ops, psi),
            Err(EvolveError::SizeMismatch(16, 7)),
        ));
    }

    #[test]
    fn one_step_nearly_preserves_probability() {
        let mut engine = toy_engine();
        let p0 = engine.probability();
        assert!(p0 > 0.0);
        engine.evolve().unwrap();
        let p1 = engine.probability();
        assert!((p1 - p0).abs() / p0 < 1e-3, "drift too large: {p0} -> {p1}");
    }

    #[test]
    fn interact_zeroes_blocked_points() {
        let mut engine = toy_engine();
        let grid = *engine.grid();
        let mask = DoubleSlit::new(
            &grid,
            SlitParams { thickness: 1, width: 1, height: 1 },
        );
        assert!(!mask.indices_to_zero().is_empty());
        let before = engine.psi().to_owned();
        engine.interact(&mask);
        for k in 0..engine.n_interior() {
            if mask.indices_to_zero().contains(&k) {
                assert_eq!(engine.modulus(k), 0.0);
            } else {
                assert_eq!(engine.psi()[k], before[k]);
            }
        }
    }

    #[test]
    fn reset_restores_the_construction_snapshot() {
        let mut engine = toy_engine();
        let initial = engine.psi().to_owned();
        let mask = DoubleSlit::new(
            engine.grid(),
            SlitParams { thickness: 1, width: 1, height: 1 },
        );
        engine.interact(&mask);
        engine.evolve().unwrap();
        engine.evolve().unwrap();
        engine.reset();
        assert_eq!(engine.psi().to_owned(), initial);
    }

    #[test]
    fn replay_after_reset_is_bitwise_identical() {
        let mut engine = toy_engine();
        engine.evolve().unwrap();
        engine.evolve().unwrap();
        engine.evolve().unwrap();
        let first_run = engine.psi().to_owned();
        engine.reset();
        engine.evolve().unwrap();
        engine.evolve().unwrap();
        engine.evolve().unwrap();
        assert_eq!(engine.psi().to_owned(), first_run);
    }

    #[test]
    fn failed_step_leaves_the_state_in_place() {
        let grid = Grid::with_sizes((1.0, 1.0), (6, 6)).unwrap();
        let coeffs = Coeffs::derive(&grid);
        let ops = CrankNicolson.build_operators(&grid, &coeffs).unwrap();
        let mut psi: nd::Array1<C32> = nd::Array1::ones(grid.n_interior());
        psi[3] = C32::new(f32::NAN, 0.0);
        let mut engine = Evolution::new(grid, ops, psi).unwrap();
        assert!(matches!(
            engine.evolve(),
            Err(EvolveError::Solve(SolveError::NonFinite)),
        ));
        assert!(engine.psi()[3].re.is_nan());
        assert_eq!(engine.psi()[0], C32::new(1.0, 0.0));
    }

    #[test]
    fn zero_state_scans_to_zero() {
        let grid = Grid::with_sizes((1.0, 1.0), (6, 6)).unwrap();
        let coeffs = Coeffs::derive(&grid);
        let ops = CrankNicolson.build_operators(&grid, &coeffs).unwrap();
        let psi: nd::Array1<C32> = nd::Array1::zeros(grid.n_interior());
        let engine = Evolution::new(grid, ops, psi).unwrap();
        assert_eq!(engine.max_amplitude(), 0.0);
        assert_eq!(engine.probability(), 0.0);
    }

    #[test]
    fn modulus_reads_single_points() {
        let engine = toy_engine();
        for k in 0..engine.n_interior() {
            assert_eq!(engine.modulus(k), engine.psi()[k].norm());
        }
    }
}
