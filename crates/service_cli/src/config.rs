//! Layered application configuration.
//!
//! Sources, lowest priority first:
//! 1. Built-in defaults of every engine configuration
//! 2. TOML file (`--config`, default `vanilla.toml`; a missing file is fine)
//! 3. Environment variables prefixed `VANILLA_`, nested keys joined by `__`
//!    (`VANILLA_LOG_LEVEL=debug`, `VANILLA_MONTE_CARLO__SEED=7`)

use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use option_core::math::quadrature::QuadratureConfig;
use option_models::analytical::ImpliedVolConfig;
use option_models::jump::JumpSeriesConfig;
use option_pricing::mc::MonteCarloConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, Result};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "VANILLA";

/// Log levels accepted by the `log_level` key.
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Resolved configuration of the `vanilla` binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Tracing filter used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Implied-volatility bracket and solver settings.
    pub implied_vol: ImpliedVolConfig,
    /// Fourier quadrature settings.
    pub quadrature: QuadratureConfig,
    /// Jump series term budget.
    pub jump_series: JumpSeriesConfig,
    /// Monte Carlo defaults (paths, steps, seed, parallel).
    pub monte_carlo: MonteCarloConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            implied_vol: ImpliedVolConfig::default(),
            quadrature: QuadratureConfig::default(),
            jump_series: JumpSeriesConfig::default(),
            monte_carlo: MonteCarloConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the configuration from the file at `path` and the environment.
    pub fn load(path: &Path) -> Result<Self> {
        let source = Config::builder().add_source(File::from(path).required(false));
        Self::from_builder(source)
    }

    /// Loads the configuration from TOML text and the environment.
    #[cfg(test)]
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let source = Config::builder().add_source(File::from_str(text, FileFormat::Toml));
        Self::from_builder(source)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self> {
        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Checks every section.
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(CliError::InvalidArgument(format!(
                "invalid log level '{}': must be one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }
        self.implied_vol.validate()?;
        self.monte_carlo
            .validate()
            .map_err(|err| CliError::Pricing(err.into()))?;
        if self.jump_series.max_terms == 0 {
            return Err(CliError::InvalidArgument(
                "jump_series.max_terms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.implied_vol.lower_bound, 1e-9);
        assert_eq!(config.quadrature.max_subdivisions, 200);
        assert_eq!(config.jump_series.max_terms, 1000);
        assert_eq!(config.monte_carlo.seed(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            log_level = "debug"

            [monte_carlo]
            seed = 7
            n_paths = 5000

            [implied_vol]
            upper_bound = 10.0
            "#,
        )
        .unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.monte_carlo.seed(), Some(7));
        assert_eq!(config.monte_carlo.n_paths(), 5000);
        assert_eq!(config.monte_carlo.n_steps(), 100);
        assert_eq!(config.implied_vol.upper_bound, 10.0);
        assert_eq!(config.implied_vol.lower_bound, 1e-9);
    }

    #[test]
    fn test_missing_file_is_tolerated() {
        let path = std::env::temp_dir().join("vanilla-config-that-does-not-exist.toml");
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.quadrature, QuadratureConfig::default());
    }

    #[test]
    fn test_invalid_sections_rejected() {
        let bad_level = AppConfig::from_toml_str(r#"log_level = "loud""#);
        assert!(matches!(bad_level, Err(CliError::InvalidArgument(_))));

        let bad_bracket = AppConfig::from_toml_str("[implied_vol]\nlower_bound = -1.0");
        assert!(matches!(bad_bracket, Err(CliError::Pricing(_))));

        let bad_paths = AppConfig::from_toml_str("[monte_carlo]\nn_paths = 0");
        assert!(matches!(bad_paths, Err(CliError::Pricing(_))));
    }

    #[test]
    fn test_toml_dump_round_trips() {
        let config = AppConfig::default();
        let text = config.to_toml().unwrap();
        assert!(text.contains("[monte_carlo]"));
        let reloaded = AppConfig::from_toml_str(&text).unwrap();
        assert_eq!(reloaded, config);
    }
}
