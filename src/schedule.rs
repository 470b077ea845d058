// src/schedule.rs
//! Timestep schedules
//!
//! A schedule is the ordered set of evaluation times `ts[0] < ts[1] < … < ts[n-1]`
//! handed to a simulator. Step sizes are the differences between consecutive
//! entries, so schedules need not be uniform.

use crate::error::{validation::*, SdeError, SdeResult};
use ndarray::Array1;

/// Validated, strictly increasing sequence of simulation times
#[derive(Debug, Clone, PartialEq)]
pub struct Timesteps {
    ts: Array1<f64>,
}

impl Timesteps {
    /// Build a schedule from explicit times.
    ///
    /// Fails on an empty sequence, a non-finite entry, any pair with
    /// `ts[i+1] <= ts[i]`, or a gap too wide to represent as a finite `dt`. Entries are never reordered or deduplicated.
    pub fn new(ts: impl Into<Array1<f64>>) -> SdeResult<Self> {
        let ts = ts.into();
        if ts.is_empty() {
            return Err(SdeError::InvalidSchedule {
                reason: "at least one timestep is required".to_string(),
            });
        }
        for (i, &t) in ts.iter().enumerate() {
            if !t.is_finite() {
                return Err(SdeError::InvalidSchedule {
                    reason: format!("timestep {} is not finite ({})", i, t),
                });
            }
        }
        for i in 0..ts.len() - 1 {
            if ts[i + 1] <= ts[i] {
                return Err(SdeError::InvalidSchedule {
                    reason: format!(
                        "timesteps must be strictly increasing, but ts[{}] = {} and ts[{}] = {}",
                        i,
                        ts[i],
                        i + 1,
                        ts[i + 1]
                    ),
                });
            }
            if !(ts[i + 1] - ts[i]).is_finite() {
                return Err(SdeError::InvalidSchedule {
                    reason: format!(
                        "step from ts[{}] = {} to ts[{}] = {} overflows",
                        i,
                        ts[i],
                        i + 1,
                        ts[i + 1]
                    ),
                });
            }
        }
        Ok(Self { ts })
    }

    /// `n` evenly spaced times from `t0` to `t1` inclusive
    pub fn linspace(t0: f64, t1: f64, n: usize) -> SdeResult<Self> {
        validate_finite("t0", t0)?;
        validate_finite("t1", t1)?;
        if n == 0 {
            return Err(SdeError::InvalidSchedule {
                reason: "at least one timestep is required".to_string(),
            });
        }
        if n == 1 {
            return Self::new(vec![t0]);
        }
        Self::new(Array1::linspace(t0, t1, n))
    }

    pub fn len(&self) -> usize {
        self.ts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ts.is_empty()
    }

    pub fn as_array(&self) -> &Array1<f64> {
        &self.ts
    }

    pub fn start(&self) -> f64 {
        self.ts[0]
    }

    pub fn end(&self) -> f64 {
        self.ts[self.ts.len() - 1]
    }

    /// `(t_i, dt_i)` for every consecutive pair, in order
    pub fn steps(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.ts
            .windows(2)
            .into_iter()
            .map(|w| (w[0], w[1] - w[0]))
    }
}

impl TryFrom<Vec<f64>> for Timesteps {
    type Error = SdeError;

    fn try_from(ts: Vec<f64>) -> SdeResult<Self> {
        Self::new(ts)
    }
}
