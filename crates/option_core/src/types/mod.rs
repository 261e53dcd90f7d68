//! Contract data model and error types.
//!
//! This module provides:
//! - `option_type`: The call/put discriminator
//! - `contract`: Immutable contract snapshots and their builder
//! - `derived`: d1/d2/φ(d1) and discount factors, recomputed on demand
//! - `jump`: Jump-diffusion model parameters
//! - `error`: Structured error types for pricing, solver and quadrature operations
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level.

pub mod contract;
pub mod derived;
pub mod error;
pub mod jump;
pub mod option_type;

// Re-export commonly used types at module level
pub use contract::{ContractParameters, ContractParametersBuilder, VolatilityQuote};
pub use derived::{d1_d2, DerivedQuantities};
pub use error::{PricingError, PricingResult, QuadratureError, SolverError};
pub use jump::JumpModelParameters;
pub use option_type::OptionType;
