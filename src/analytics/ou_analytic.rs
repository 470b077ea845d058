// src/analytics/ou_analytic.rs
//! Closed-form moments used to validate simulated ensembles
//!
//! For `dX_t = -θ X_t dt + σ dW_t`, `X_0 = x_0`:
//! ```text
//! E[X_t]   = x_0 e^{-θt}
//! Var[X_t] = σ²/(2θ) (1 - e^{-2θt})      (θ ≠ 0)
//! ```
//! Brownian motion `dX_t = σ dW_t` has `Var[X_t] = σ² t`.

pub fn ou_mean(x0: f64, theta: f64, t: f64) -> f64 {
    x0 * (-theta * t).exp()
}

pub fn ou_variance(theta: f64, sigma: f64, t: f64) -> f64 {
    if theta == 0.0 {
        return brownian_variance(sigma, t);
    }
    sigma * sigma / (2.0 * theta) * (1.0 - (-2.0 * theta * t).exp())
}

pub fn ou_stationary_variance(theta: f64, sigma: f64) -> f64 {
    sigma * sigma / (2.0 * theta)
}

pub fn brownian_variance(sigma: f64, t: f64) -> f64 {
    sigma * sigma * t
}

pub fn brownian_std(sigma: f64, t: f64) -> f64 {
    brownian_variance(sigma, t).sqrt()
}
