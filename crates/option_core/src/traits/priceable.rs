//! Traits for priced engines.
//!
//! This module defines:
//! - Price calculation (`PricingEngine` trait)
//! - Put-call parity residual helper (`parity_residual`)

use crate::types::{ContractParameters, PricingResult};

/// Engine that values the contract it was constructed for.
///
/// Implemented by every deterministic engine (closed form, jump series,
/// Fourier). Construction captures an immutable contract snapshot, so
/// repeated calls are pure and return the same value.
///
/// ```
/// use option_core::traits::PricingEngine;
/// use option_core::types::{ContractParameters, OptionType, PricingResult};
///
/// struct Intrinsic(ContractParameters);
///
/// impl PricingEngine for Intrinsic {
///     fn contract(&self) -> &ContractParameters {
///         &self.0
///     }
///
///     fn price(&self) -> PricingResult<f64> {
///         Ok(self.0.option_type().payoff(self.0.spot(), self.0.strike()))
///     }
/// }
///
/// let contract = ContractParameters::builder()
///     .spot(110.0)
///     .strike(100.0)
///     .maturity(1.0)
///     .volatility(0.2)
///     .option_type(OptionType::Call)
///     .build()
///     .unwrap();
/// assert_eq!(Intrinsic(contract).price().unwrap(), 10.0);
/// ```
pub trait PricingEngine {
    /// Contract snapshot the engine prices.
    fn contract(&self) -> &ContractParameters;

    /// Calculate the present value of the contract.
    ///
    /// # Errors
    /// Engine-specific numerical failures (non-convergent quadrature,
    /// series budget exhausted) surface as `PricingError`.
    fn price(&self) -> PricingResult<f64>;
}

/// Residual of put-call parity, `C − P − (S·gDisc − K·rDisc)`.
///
/// Near zero for any consistent pair of call and put prices on the same
/// contract terms.
pub fn parity_residual(call: f64, put: f64, contract: &ContractParameters) -> f64 {
    call - put - (contract.spot() * contract.g_disc() - contract.strike() * contract.r_disc())
}
