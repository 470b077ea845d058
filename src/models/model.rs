// src/models/model.rs
//! Vector field contracts
//!
//! An ODE `dX_t = u_t(X_t) dt` is described by its drift `u`. An SDE
//! `dX_t = u_t(X_t) dt + σ_t(X_t) dW_t` adds a diffusion coefficient.
//!
//! Both act on a batch: `xt` has shape `(batch_size, dim)` and every
//! coefficient returned has exactly that shape.

use crate::error::SdeResult;
use ndarray::Array2;

pub trait ODEModel {
    fn drift(&self, xt: &Array2<f64>, t: f64) -> SdeResult<Array2<f64>>;
}

pub trait SDEModel: ODEModel {
    fn diffusion(&self, xt: &Array2<f64>, t: f64) -> SdeResult<Array2<f64>>;
}

impl<M: ODEModel + ?Sized> ODEModel for &M {
    fn drift(&self, xt: &Array2<f64>, t: f64) -> SdeResult<Array2<f64>> {
        (**self).drift(xt, t)
    }
}

impl<M: SDEModel + ?Sized> SDEModel for &M {
    fn diffusion(&self, xt: &Array2<f64>, t: f64) -> SdeResult<Array2<f64>> {
        (**self).diffusion(xt, t)
    }
}
