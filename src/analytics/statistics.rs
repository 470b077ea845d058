// src/analytics/statistics.rs
//! Empirical summaries of simulated batches
//!
//! Thin wrappers over `statrs::statistics::Statistics` applied per column of a
//! `(batch_size, dim)` state, plus a grid-quadrature check that a 2-D density
//! integrates to one.

use crate::distributions::density::Density;
use crate::error::{validation::*, SdeError, SdeResult};
use ndarray::{Array1, Array2, Axis};
use statrs::distribution::{ContinuousCDF, Normal};
use statrs::statistics::Statistics;

/// Per-column sample mean
pub fn column_means(x: &Array2<f64>) -> SdeResult<Array1<f64>> {
    validate_count("batch_size", x.nrows())?;
    Ok(x.map_axis(Axis(0), |col| col.iter().mean()))
}

/// Per-column unbiased sample standard deviation
pub fn column_std_devs(x: &Array2<f64>) -> SdeResult<Array1<f64>> {
    if x.nrows() < 2 {
        return Err(SdeError::InvalidConfiguration {
            field: "batch_size".to_string(),
            reason: "at least two samples are needed for a standard deviation".to_string(),
        });
    }
    Ok(x.map_axis(Axis(0), |col| col.iter().std_dev()))
}

/// Kolmogorov-Smirnov distance between a 1-D sample and `N(mean, std²)`
pub fn ks_distance_normal(samples: &[f64], mean: f64, std: f64) -> SdeResult<f64> {
    validate_count("samples", samples.len())?;
    let normal = Normal::new(mean, std).map_err(|e| SdeError::InvalidParameters {
        parameter: "std".to_string(),
        value: std,
        constraint: e.to_string(),
    })?;

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len() as f64;
    Ok(sorted
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let cdf = normal.cdf(x);
            (cdf - i as f64 / n).abs().max(((i + 1) as f64 / n - cdf).abs())
        })
        .fold(0.0, f64::max))
}

/// Midpoint-rule integral of `exp(log_density)` over `[-scale, scale]²` with `bins²` cells
pub fn integrate_density_2d<D: Density + ?Sized>(density: &D, scale: f64, bins: usize) -> SdeResult<f64> {
    validate_positive("scale", scale)?;
    validate_count("bins", bins)?;
    validate_shape("density dimension", &[2], &[density.dim()])?;

    let h = 2.0 * scale / bins as f64;
    let centers = Array1::from_shape_fn(bins, |i| -scale + (i as f64 + 0.5) * h);
    let grid = Array2::from_shape_fn((bins * bins, 2), |(k, j)| {
        if j == 0 {
            centers[k / bins]
        } else {
            centers[k % bins]
        }
    });
    let log_p = density.log_density(&grid)?;
    Ok(log_p.mapv(f64::exp).sum() * h * h)
}
