//! Error taxonomy shared by every simulation.
//!
//! Numeric failures carry the offending parameter or the last solver iterate
//! so the caller can diagnose without re-running. Nothing in the library
//! recovers from these on its own.

use thiserror::Error;

/// Errors produced by the simulations and their output sinks
#[derive(Error, Debug)]
pub enum SimError {
    /// Malformed numeric parameter (non-positive count, non-finite value, ...)
    #[error("invalid argument `{parameter}` = {value}: {reason}")]
    InvalidArgument {
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Physically undefined input
    #[error("domain error: `{parameter}` = {value} exceeds {limit}")]
    DomainError {
        parameter: &'static str,
        value: f64,
        limit: f64,
    },

    /// Integrator or evaluation produced no usable result
    #[error("numerical failure in {context} at t = {t}: {reason}")]
    NumericalFailure {
        context: &'static str,
        t: f64,
        reason: String,
    },

    /// Iterative root-finder did not converge
    #[error("no convergence after {iterations} iterations (last iterate {last_iterate}, residual {residual:e})")]
    ConvergenceError {
        last_iterate: f64,
        iterations: usize,
        residual: f64,
    },

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    pub(crate) fn invalid(parameter: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidArgument {
            parameter,
            value,
            reason,
        }
    }

    /// Short name of the error kind, used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::DomainError { .. } => "domain_error",
            Self::NumericalFailure { .. } => "numerical_failure",
            Self::ConvergenceError { .. } => "convergence_error",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Image(_) => "image",
            Self::Json(_) => "json",
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;

/// Reject NaN and infinities for a named parameter
pub(crate) fn ensure_finite(parameter: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimError::invalid(parameter, value, "must be finite"))
    }
}

/// Reject non-positive (or non-finite) values for a named parameter
pub(crate) fn ensure_positive(parameter: &'static str, value: f64) -> Result<()> {
    ensure_finite(parameter, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid(parameter, value, "must be positive"))
    }
}

/// Reject zero counts
pub(crate) fn ensure_count(parameter: &'static str, value: usize) -> Result<()> {
    if value == 0 {
        Err(SimError::invalid(parameter, 0.0, "count must be at least 1"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = SimError::ConvergenceError {
            last_iterate: 1.25,
            iterations: 100,
            residual: 0.5,
        };
        let msg = err.to_string();
        assert!(msg.contains("1.25"));
        assert!(msg.contains("100"));
        assert_eq!(err.kind(), "convergence_error");
    }

    #[test]
    fn test_guards() {
        assert!(ensure_positive("wavelength", 1e-9).is_ok());
        assert!(matches!(
            ensure_positive("wavelength", 0.0),
            Err(SimError::InvalidArgument { parameter: "wavelength", .. })
        ));
        assert!(ensure_finite("f1", f64::NAN).is_err());
        assert!(ensure_count("num_points", 0).is_err());
        assert!(ensure_count("num_points", 1).is_ok());
    }
}
