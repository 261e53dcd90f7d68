//! Analytical pricing for European options.
//!
//! This module provides:
//! - Black-Scholes-Merton closed form with continuous carry (`black_scholes`)
//! - First and second order Greeks bundle (`greeks`)
//! - Implied volatility by Brent root finding (`implied_vol`)
//!
//! ## Design Principles
//!
//! - **Immutable snapshots**: engines capture a contract and its derived
//!   quantities at construction; bumps build a new engine
//! - **Numerical Stability**: Uses erfc-based CDF for accuracy

pub mod black_scholes;
pub mod greeks;
pub mod implied_vol;

// Re-export main types at module level
pub use black_scholes::{bsm_price, BlackScholesEngine};
pub use greeks::Greeks;
pub use implied_vol::{ImpliedVolConfig, ImpliedVolatilitySolver};
