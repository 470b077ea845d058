// src/error.rs
use thiserror::Error;

/// Error types for the langevin-sde library
#[derive(Debug, Error)]
pub enum SdeError {
    /// Invalid parameter values
    #[error("Invalid parameter '{parameter}' = {value}: {constraint}")]
    InvalidParameters {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Arrays whose shapes must agree do not
    #[error("Shape mismatch in {context}: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        context: String,
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    /// Timestep schedule is empty, non-finite or not strictly increasing
    #[error("Invalid timestep schedule: {reason}")]
    InvalidSchedule { reason: String },

    /// Covariance matrix failed its Cholesky factorization
    #[error("Covariance is not positive definite: {context}")]
    NonPositiveDefinite { context: String },

    /// Invalid configuration
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfiguration { field: String, reason: String },

    /// Failure writing simulation output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for langevin-sde operations
pub type SdeResult<T> = Result<T, SdeError>;

/// Validation utilities
pub mod validation {
    use super::{SdeError, SdeResult};

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> SdeResult<()> {
        if !(value > 0.0) || !value.is_finite() {
            Err(SdeError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0) and finite".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> SdeResult<()> {
        if !(value >= 0.0) || !value.is_finite() {
            Err(SdeError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0) and finite".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> SdeResult<()> {
        if !value.is_finite() {
            Err(SdeError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that two shapes agree exactly
    pub fn validate_shape(context: &str, expected: &[usize], found: &[usize]) -> SdeResult<()> {
        if expected != found {
            Err(SdeError::ShapeMismatch {
                context: context.to_string(),
                expected: expected.to_vec(),
                found: found.to_vec(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a batch of points has `dim` columns
    pub fn validate_dim(context: &str, dim: usize, points: &[usize]) -> SdeResult<()> {
        if points.len() != 2 || points[1] != dim {
            Err(SdeError::ShapeMismatch {
                context: context.to_string(),
                expected: vec![points.first().copied().unwrap_or(0), dim],
                found: points.to_vec(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate a requested sample/run count
    pub fn validate_count(field: &str, count: usize) -> SdeResult<()> {
        if count == 0 {
            Err(SdeError::InvalidConfiguration {
                field: field.to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else {
            Ok(())
        }
    }
}
