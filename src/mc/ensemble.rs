// src/mc/ensemble.rs
//! Parallel ensembles of independent simulation runs
//!
//! Runs never share state: run `i` draws from its own `StdRng` created by
//! `RngFactory::create_std_rng(i)`, so an ensemble is reproducible for a fixed
//! seed regardless of how rayon schedules the runs.

use crate::error::{validation::*, SdeError, SdeResult};
use crate::rng::RngFactory;
use crate::schedule::Timesteps;
use crate::solvers::simulator::Simulator;
use crate::trajectory::Trajectory;
use ndarray::{concatenate, Array2, ArrayView2, Axis};
use rayon::prelude::*;

#[derive(Debug, Clone)]
pub struct EnsembleConfig {
    pub runs: usize,
    pub t_start: f64,
    pub t_end: f64,
    pub num_timesteps: usize,
    pub seed: u64,
}

impl EnsembleConfig {
    /// Validate the ensemble configuration
    pub fn validate(&self) -> SdeResult<()> {
        validate_count("runs", self.runs)?;
        validate_count("num_timesteps", self.num_timesteps)?;
        validate_finite("t_start", self.t_start)?;
        validate_finite("t_end", self.t_end)?;
        if self.num_timesteps > 1 && self.t_end <= self.t_start {
            return Err(SdeError::InvalidConfiguration {
                field: "t_end".to_string(),
                reason: format!("must exceed t_start ({})", self.t_start),
            });
        }
        Ok(())
    }

    /// Uniform schedule over `[t_start, t_end]`
    pub fn timesteps(&self) -> SdeResult<Timesteps> {
        self.validate()?;
        Timesteps::linspace(self.t_start, self.t_end, self.num_timesteps)
    }
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        EnsembleConfig {
            runs: 100,
            t_start: 0.0,
            t_end: 1.0,
            num_timesteps: 1000,
            seed: 12345,
        }
    }
}

/// Final states of `cfg.runs` independent rollouts from the same initial batch
pub fn simulate_ensemble<S>(
    simulator: &S,
    x_init: &Array2<f64>,
    cfg: &EnsembleConfig,
) -> SdeResult<Vec<Array2<f64>>>
where
    S: Simulator + Sync,
{
    let timesteps = cfg.timesteps()?;
    let factory = RngFactory::new(cfg.seed);
    tracing::debug!(runs = cfg.runs, batch = x_init.nrows(), "simulate_ensemble");

    (0..cfg.runs)
        .into_par_iter()
        .map(|i| {
            let mut rng = factory.create_std_rng(i as u64);
            simulator.simulate(x_init, &timesteps, &mut rng)
        })
        .collect()
}

/// Full trajectories of `cfg.runs` independent rollouts
pub fn simulate_ensemble_trajectories<S>(
    simulator: &S,
    x_init: &Array2<f64>,
    cfg: &EnsembleConfig,
) -> SdeResult<Vec<Trajectory>>
where
    S: Simulator + Sync,
{
    let timesteps = cfg.timesteps()?;
    let factory = RngFactory::new(cfg.seed);
    tracing::debug!(runs = cfg.runs, batch = x_init.nrows(), "simulate_ensemble_trajectories");

    (0..cfg.runs)
        .into_par_iter()
        .map(|i| {
            let mut rng = factory.create_std_rng(i as u64);
            simulator.simulate_with_trajectory(x_init, &timesteps, &mut rng)
        })
        .collect()
}

/// Stack per-run final states into one `(runs · batch_size, dim)` array
pub fn pool_final_states(states: &[Array2<f64>]) -> SdeResult<Array2<f64>> {
    let views: Vec<ArrayView2<f64>> = states.iter().map(|s| s.view()).collect();
    concatenate(Axis(0), &views).map_err(|e| SdeError::ShapeMismatch {
        context: format!("pooling ensemble states ({})", e),
        expected: states.first().map(|s| s.shape().to_vec()).unwrap_or_default(),
        found: states
            .iter()
            .find(|s| Some(s.ncols()) != states.first().map(|f| f.ncols()))
            .map(|s| s.shape().to_vec())
            .unwrap_or_default(),
    })
}
