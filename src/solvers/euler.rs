// src/solvers/euler.rs
//! Explicit Euler Scheme for ODE Integration
//!
//! For `dX_t = u_t(X_t) dt` the scheme is
//! ```text
//! X_{n+1} = X_n + Δt · u(X_n, t_n)
//! ```
//! First order, deterministic. The random generator passed to `step` is
//! never touched.

use super::simulator::{validate_coefficient, validate_step, Simulator};
use crate::error::SdeResult;
use crate::models::model::ODEModel;
use ndarray::Array2;
use rand::Rng;

/// Euler numerical scheme for ODE integration
#[derive(Debug, Clone)]
pub struct EulerSimulator<M: ODEModel> {
    pub ode: M,
}

impl<M: ODEModel> EulerSimulator<M> {
    pub fn new(ode: M) -> Self {
        EulerSimulator { ode }
    }
}

impl<M: ODEModel> Simulator for EulerSimulator<M> {
    fn step<R: Rng + ?Sized>(
        &self,
        xt: &Array2<f64>,
        t: f64,
        dt: f64,
        _rng: &mut R,
    ) -> SdeResult<Array2<f64>> {
        validate_step(dt)?;
        let drift = self.ode.drift(xt, t)?;
        validate_coefficient("drift", xt, &drift)?;
        Ok(xt + &(drift * dt))
    }
}
