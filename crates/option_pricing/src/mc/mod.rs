//! Monte Carlo pricing and hedging.
//!
//! This module provides:
//! - [`MonteCarloConfig`]: validated simulation settings with a builder
//! - [`MonteCarloHedgeEngine`]: price estimate and delta-hedge P&L
//! - [`SimulationResult`]: estimate, standard error and optional band
//! - [`RunningStats`]: mergeable mean/variance accumulator
//!
//! # Architecture
//!
//! ```text
//! MonteCarloHedgeEngine
//! ├── MonteCarloConfig  (counts, seed, parallel switch)
//! ├── PricerRng         (one stream per chunk of CHUNK_SIZE paths)
//! └── RunningStats      (per chunk, merged in chunk order)
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod result;

pub use config::{MonteCarloConfig, MonteCarloConfigBuilder, MIN_HEDGE_STEPS};
pub use engine::{MonteCarloHedgeEngine, CHUNK_SIZE};
pub use error::ConfigError;
pub use result::{RunningStats, SimulationResult, INTERVAL_WIDTH};
