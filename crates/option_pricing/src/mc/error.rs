//! Error types for the Monte Carlo engine.
//!
//! Configuration problems are caught when a [`MonteCarloConfig`] is built
//! or when a simulation is requested with out-of-range counts, and surface
//! to callers as `PricingError::InvalidParameters`.
//!
//! [`MonteCarloConfig`]: super::MonteCarloConfig

use option_core::types::PricingError;
use thiserror::Error;

use super::config::MIN_HEDGE_STEPS;

/// Configuration error for the Monte Carlo engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Zero paths requested.
    #[error("Invalid path count {0}: at least one path is required")]
    InvalidPathCount(usize),
    /// Step count below the hedge minimum.
    #[error("Invalid step count {0}: at least {min} steps are required", min = MIN_HEDGE_STEPS)]
    InvalidStepCount(usize),
    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

impl From<ConfigError> for PricingError {
    fn from(err: ConfigError) -> Self {
        PricingError::InvalidParameters(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidPathCount(0);
        assert!(err.to_string().contains("Invalid path count 0"));

        let err = ConfigError::InvalidStepCount(1);
        assert!(err.to_string().contains("Invalid step count 1"));

        let err = ConfigError::InvalidParameter {
            name: "mu",
            value: "must be finite".to_string(),
        };
        assert!(err.to_string().contains("mu"));
    }

    #[test]
    fn test_converts_to_invalid_parameters() {
        let err: PricingError = ConfigError::InvalidPathCount(0).into();
        assert!(matches!(err, PricingError::InvalidParameters(msg) if msg.contains("path count")));
    }
}
