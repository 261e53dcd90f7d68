//! # Option Pricing (Simulation Layer)
//!
//! Monte Carlo engines for vanilla European options.
//!
//! This crate provides:
//! - [`rng`]: Seeded pseudo-random generation with per-chunk seed derivation
//! - [`mc`]: Simulation configuration, running statistics and the
//!   [`MonteCarloHedgeEngine`](mc::MonteCarloHedgeEngine)
//!
//! ## Reproducibility
//!
//! Paths are grouped into fixed-size chunks. Each chunk draws from its own
//! generator seeded by `(seed, chunk index)` and chunk statistics are merged
//! in chunk order, so a seeded run gives bitwise identical results whether
//! chunks are evaluated sequentially or on the rayon pool.
//!
//! ## Usage Example
//!
//! ```rust
//! use option_core::types::{ContractParameters, OptionType};
//! use option_pricing::mc::{MonteCarloConfig, MonteCarloHedgeEngine};
//!
//! let contract = ContractParameters::builder()
//!     .spot(100.0)
//!     .strike(100.0)
//!     .rate(0.05)
//!     .maturity(1.0)
//!     .volatility(0.2)
//!     .option_type(OptionType::Call)
//!     .build()
//!     .unwrap();
//!
//! let config = MonteCarloConfig::builder().seed(42).build().unwrap();
//! let engine = MonteCarloHedgeEngine::new(&contract, config).unwrap();
//!
//! let estimate = engine.price_estimate(200_000, true).unwrap();
//! let (lower, upper) = estimate.confidence_interval.unwrap();
//! assert!(lower < upper);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod mc;
pub mod rng;
