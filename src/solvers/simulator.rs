// src/solvers/simulator.rs
//! Generic discretized integrator
//!
//! A `Simulator` only has to say how to advance one step; rolling out a whole
//! schedule is shared. For a schedule `ts[0] < … < ts[n-1]` the rollout applies
//! ```text
//! x_{i+1} = step(x_i, ts[i], ts[i+1] - ts[i])
//! ```
//! for `i = 0 … n-2`, so non-uniform schedules are supported. A one-entry
//! schedule returns the initial state unchanged.

use crate::error::{validation::*, SdeError, SdeResult};
use crate::schedule::Timesteps;
use crate::trajectory::Trajectory;
use ndarray::Array2;
use rand::Rng;

pub trait Simulator {
    /// Advance `xt` (shape `(batch_size, dim)`) from `t` to `t + dt`
    fn step<R: Rng + ?Sized>(
        &self,
        xt: &Array2<f64>,
        t: f64,
        dt: f64,
        rng: &mut R,
    ) -> SdeResult<Array2<f64>>;

    /// Roll out the whole schedule and return the state at `ts[n-1]`
    fn simulate<R: Rng + ?Sized>(
        &self,
        x_init: &Array2<f64>,
        timesteps: &Timesteps,
        rng: &mut R,
    ) -> SdeResult<Array2<f64>> {
        tracing::debug!(
            batch = x_init.nrows(),
            dim = x_init.ncols(),
            timesteps = timesteps.len(),
            "simulate"
        );
        let mut x = x_init.clone();
        for (t, dt) in timesteps.steps() {
            x = self.step(&x, t, dt, rng)?;
        }
        Ok(x)
    }

    /// Roll out the whole schedule, recording every state including `x_init`
    fn simulate_with_trajectory<R: Rng + ?Sized>(
        &self,
        x_init: &Array2<f64>,
        timesteps: &Timesteps,
        rng: &mut R,
    ) -> SdeResult<Trajectory> {
        tracing::debug!(
            batch = x_init.nrows(),
            dim = x_init.ncols(),
            timesteps = timesteps.len(),
            "simulate_with_trajectory"
        );
        let mut trajectory = Trajectory::with_capacity(timesteps, x_init.clone());
        let mut x = x_init.clone();
        for (t, dt) in timesteps.steps() {
            x = self.step(&x, t, dt, rng)?;
            trajectory.push(x.clone());
        }
        Ok(trajectory)
    }
}

/// Checks shared by every step: a finite positive `dt` and a coefficient
/// with the state's shape
pub(crate) fn validate_step(dt: f64) -> SdeResult<()> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(SdeError::InvalidParameters {
            parameter: "dt".to_string(),
            value: dt,
            constraint: "must be positive and finite".to_string(),
        });
    }
    Ok(())
}

pub(crate) fn validate_coefficient(
    name: &str,
    xt: &Array2<f64>,
    coefficient: &Array2<f64>,
) -> SdeResult<()> {
    validate_shape(name, xt.shape(), coefficient.shape())
}
