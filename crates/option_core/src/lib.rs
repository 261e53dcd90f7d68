//! # option_core: Contract Model and Numerical Kernels
//!
//! ## Layer 1 (Foundation) Role
//!
//! option_core is the bottom layer of the workspace, providing:
//! - Contract parameters with validated construction (`types::contract`)
//! - Option type parsing and payoffs (`types::option_type`)
//! - Derived Black-Scholes quantities d₁, d₂, discount factors (`types::derived`)
//! - Jump-diffusion parameters (`types::jump`)
//! - Error types: `PricingError`, `SolverError`, `QuadratureError` (`types::error`)
//! - Normal distribution, Brent root finder, Gauss-Kronrod quadrature (`math`)
//! - Engine and volatility-provider traits (`traits`)
//!
//! ## Minimal Dependencies
//!
//! Layer 1 has no dependencies on other option_* crates:
//! - num-traits: Generic floating-point solver code
//! - statrs: Complementary error function and log-gamma
//! - chrono: Date ranges for volatility providers
//! - thiserror: Error enums
//! - tracing: Diagnostic events (no subscriber is installed here)
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use option_core::types::{ContractParameters, OptionType};
//!
//! let contract = ContractParameters::builder()
//!     .spot(100.0)
//!     .strike(100.0)
//!     .rate(0.05)
//!     .maturity(1.0)
//!     .volatility(0.2)
//!     .option_type("call".parse::<OptionType>().unwrap())
//!     .build()
//!     .unwrap();
//!
//! let d = contract.derived().unwrap();
//! assert!((d.d1 - 0.35).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for contracts, configs and errors

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod traits;
pub mod types;
