//! Monte Carlo simulation configuration.
//!
//! This module provides the configuration type and builder shared by the
//! price estimator and the hedge simulation.

use super::error::ConfigError;

/// Smallest rebalancing grid accepted by the hedge simulation.
pub const MIN_HEDGE_STEPS: usize = 2;

const DEFAULT_PATHS: usize = 100_000;
const DEFAULT_STEPS: usize = 100;

/// Monte Carlo simulation configuration.
///
/// `n_paths` and `n_steps` are the defaults used when a caller does not pass
/// explicit counts (the CLI reads them from its configuration file). `seed`
/// fixes the random stream; without one every run draws a fresh seed.
/// `parallel` spreads path chunks over the rayon pool without changing the
/// result.
///
/// Use [`MonteCarloConfigBuilder`] to construct validated instances.
///
/// # Examples
///
/// ```rust
/// use option_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(10_000)
///     .n_steps(252)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths(), 10_000);
/// assert_eq!(config.n_steps(), 252);
/// assert!(config.parallel());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MonteCarloConfig {
    /// Number of simulation paths.
    n_paths: usize,
    /// Number of time steps per path.
    n_steps: usize,
    /// Optional seed for reproducibility.
    seed: Option<u64>,
    /// Evaluate chunks on the rayon pool.
    parallel: bool,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            n_paths: DEFAULT_PATHS,
            n_steps: DEFAULT_STEPS,
            seed: None,
            parallel: true,
        }
    }
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Returns the default number of simulation paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the default number of time steps per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns whether chunks run on the rayon pool.
    #[inline]
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Returns a copy with the seed replaced.
    pub fn with_seed(&self, seed: Option<u64>) -> Self {
        Self {
            seed,
            ..self.clone()
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_paths` is 0
    /// - `n_steps` is below 2
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_paths(self.n_paths)?;
        validate_steps(self.n_steps)
    }
}

/// Checks that at least one path is requested.
///
/// Statistics are reduced chunk by chunk, so there is no upper limit.
pub fn validate_paths(n_paths: usize) -> Result<(), ConfigError> {
    if n_paths == 0 {
        return Err(ConfigError::InvalidPathCount(n_paths));
    }
    Ok(())
}

/// Checks a step count against `MIN_HEDGE_STEPS`.
pub fn validate_steps(n_steps: usize) -> Result<(), ConfigError> {
    if n_steps < MIN_HEDGE_STEPS {
        return Err(ConfigError::InvalidStepCount(n_steps));
    }
    Ok(())
}

/// Builder for [`MonteCarloConfig`].
///
/// Unset counts fall back to 100,000 paths and 100 steps; validation runs
/// at build time.
///
/// # Examples
///
/// ```rust
/// use option_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(50_000)
///     .n_steps(252)  // Daily rebalancing for 1 year
///     .parallel(false)
///     .build()
///     .expect("valid config");
/// assert_eq!(config.seed(), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MonteCarloConfigBuilder {
    n_paths: Option<usize>,
    n_steps: Option<usize>,
    seed: Option<u64>,
    parallel: Option<bool>,
}

impl MonteCarloConfigBuilder {
    /// Sets the number of simulation paths (at least 1).
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the number of time steps per path (at least 2).
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel chunk evaluation.
    #[inline]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `n_paths` is 0 or `n_steps` is below 2.
    pub fn build(self) -> Result<MonteCarloConfig, ConfigError> {
        let config = MonteCarloConfig {
            n_paths: self.n_paths.unwrap_or(DEFAULT_PATHS),
            n_steps: self.n_steps.unwrap_or(DEFAULT_STEPS),
            seed: self.seed,
            parallel: self.parallel.unwrap_or(true),
        };

        config.validate()?;
        Ok(config)
    }
}
