// src/models/ou_process.rs
use super::model::{ODEModel, SDEModel};
use crate::error::{validation::*, SdeError, SdeResult};
use ndarray::Array2;

/// Ornstein-Uhlenbeck process `dX_t = -θ X_t dt + σ dW_t`, mean-reverting to 0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OUProcess {
    theta: f64,
    sigma: f64,
}

impl OUProcess {
    pub fn new(theta: f64, sigma: f64) -> SdeResult<Self> {
        validate_finite("theta", theta)?;
        validate_non_negative("sigma", sigma)?;
        Ok(OUProcess { theta, sigma })
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Long-run variance `σ² / (2θ)`; only defined for `θ > 0`
    pub fn stationary_variance(&self) -> SdeResult<f64> {
        if self.theta <= 0.0 {
            return Err(SdeError::InvalidParameters {
                parameter: "theta".to_string(),
                value: self.theta,
                constraint: "stationary distribution requires theta > 0".to_string(),
            });
        }
        Ok(self.sigma * self.sigma / (2.0 * self.theta))
    }
}

impl ODEModel for OUProcess {
    fn drift(&self, xt: &Array2<f64>, _t: f64) -> SdeResult<Array2<f64>> {
        Ok(xt * -self.theta)
    }
}

impl SDEModel for OUProcess {
    fn diffusion(&self, xt: &Array2<f64>, _t: f64) -> SdeResult<Array2<f64>> {
        Ok(Array2::from_elem(xt.raw_dim(), self.sigma))
    }
}
