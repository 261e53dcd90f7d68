//! # Option Models (L2: Pricing Engines)
//!
//! Deterministic pricing engines for European options.
//!
//! This crate provides:
//! - Black-Scholes-Merton closed form and its Greeks (`analytical`)
//! - Implied volatility from an observed price (`analytical::implied_vol`)
//! - Merton jump-diffusion series (`jump`)
//! - Fourier inversion of a characteristic function (`fourier`)
//!
//! ## Design Principles
//!
//! - **Snapshot engines**: each engine owns a copy of the validated
//!   contract it prices, so calls are pure and repeatable
//! - **Explicit failure**: non-convergence surfaces as `PricingError`
//!   rather than a silently truncated value
//! - **Shared closed form**: every engine reuses [`analytical::bsm_price`]

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod fourier;
pub mod jump;
