//! # Random Number Generation Infrastructure
//!
//! Random number generation for Monte Carlo simulations.
//!
//! - **Reproducibility**: every generator is seeded; a run seed fans out
//!   into per-chunk seeds with [`chunk_seed`]
//! - **Efficiency**: zero-allocation batch draws via `&mut [f64]` slices
//!
//! ## Usage Example
//!
//! ```rust
//! use option_pricing::rng::{chunk_seed, PricerRng};
//!
//! let mut rng = PricerRng::from_seed(chunk_seed(12345, 0));
//! let z = rng.gen_normal();
//! assert!(z.is_finite());
//! ```

pub mod prng;

pub use prng::{chunk_seed, fresh_seed, PricerRng};
