//! Jump-diffusion pricing.
//!
//! This module provides the Merton compound-Poisson model priced as a
//! Poisson-weighted mixture of Black-Scholes-Merton prices.

pub mod merton;

pub use merton::{JumpDiffusionEngine, JumpSeriesConfig, JumpSeriesResult};
