//! Core traits for pricing engines and volatility providers.
//!
//! This module defines:
//! - Generic floating-point operations (`Float` trait)
//! - Contract valuation (`PricingEngine` trait)
//! - External volatility estimation (`VolatilitySource` trait)

/// Generic floating-point trait used by the numerical kernels.
///
/// # Examples
/// ```
/// use option_core::traits::Float;
///
/// fn compute_discount<T: Float>(rate: T, time: T) -> T {
///     (-rate * time).exp()
/// }
///
/// let discount_f64: f64 = compute_discount(0.05, 1.0);
/// assert!((discount_f64 - 0.951229).abs() < 1e-5);
/// ```
pub use num_traits::Float;

pub mod priceable;
pub mod volatility;

pub use priceable::{parity_residual, PricingEngine};
pub use volatility::{ConstantVolatility, VolatilityEstimate, VolatilitySource};
