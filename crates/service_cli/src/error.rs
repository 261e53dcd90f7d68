//! CLI error types.

use option_core::types::PricingError;
use thiserror::Error;

/// Errors surfaced by the `vanilla` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration sources could not be read or merged.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// A pricing engine rejected the request.
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Output could not be serialised.
    #[error("Serialisation error: {0}")]
    Serialisation(String),

    /// Command-line arguments are inconsistent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Serialisation(err.to_string())
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        CliError::Serialisation(err.to_string())
    }
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
