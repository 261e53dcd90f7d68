//! Merton jump-diffusion series.
//!
//! ## Mathematical Formulas
//!
//! Price = Σₙ P(n)·BSM(σₙ, rₙ)
//!
//! Where:
//! - λ' = λ(1 + k)
//! - P(n) = e^(-λ'T)(λ'T)ⁿ / n!
//! - rₙ = r − λk + n·ln(1 + k)/T
//! - σₙ² = σ² + n·δ²/T
//!
//! Poisson weights are evaluated in log space, so large `λ'T` does not
//! overflow `(λ'T)ⁿ` or `n!`.
//!
//! ## Term Envelope
//!
//! A call is worth at most `S·e^(-gT)`, so term n is bounded by
//! `S·e^(-gT)·P(n; λ'T)`. A put is worth at most `K·e^(-rₙT)`, and
//! `e^(-rₙT)·P(n; λ'T)` collapses to `e^(-rT)·P(n; λT)`. Put terms therefore
//! peak near `λT`, which lies past `λ'T` when k < 0.

use option_core::traits::PricingEngine;
use option_core::types::{
    ContractParameters, JumpModelParameters, OptionType, PricingError, PricingResult,
};
use statrs::function::gamma::ln_gamma;
use tracing::{debug, warn};

use crate::analytical::bsm_price;

/// Series truncation budget.
///
/// # Example
///
/// ```
/// use option_models::jump::JumpSeriesConfig;
///
/// assert_eq!(JumpSeriesConfig::default().max_terms, 1000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct JumpSeriesConfig {
    /// Maximum number of series terms evaluated before giving up.
    pub max_terms: usize,
}

impl Default for JumpSeriesConfig {
    fn default() -> Self {
        Self { max_terms: 1000 }
    }
}

/// Converged series value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JumpSeriesResult {
    /// Option price.
    pub price: f64,
    /// Number of terms added to the sum.
    pub terms: usize,
}

/// Jump-diffusion engine bound to one contract and jump specification.
///
/// # Truncation
///
/// Terms are summed in order of jump count `n`. The sum ends at the first
/// `n` past the mode of the term envelope (`⌊λ'T⌋` for calls, `⌊λT⌋` for
/// puts) where the envelope is at or below `eps`; that term is not added.
/// The envelope falls monotonically past its mode, so every later term is
/// also within `eps`. A single small term before that point says nothing
/// about the tail: a deep out-of-the-money put with large negative jumps
/// has negligible terms near `λ'T` and most of its value near `λT`.
///
/// # Examples
/// ```
/// use option_core::types::{ContractParameters, JumpModelParameters, OptionType};
/// use option_models::analytical::bsm_price;
/// use option_models::jump::JumpDiffusionEngine;
///
/// let contract = ContractParameters::builder()
///     .spot(100.0)
///     .strike(100.0)
///     .rate(0.05)
///     .maturity(1.0)
///     .volatility(0.2)
///     .option_type(OptionType::Call)
///     .build()
///     .unwrap();
///
/// // No jumps: the series collapses to the closed form.
/// let jumps = JumpModelParameters::new(0.0, 0.0, 0.0, 1e-12).unwrap();
/// let engine = JumpDiffusionEngine::new(&contract, jumps).unwrap();
/// let bs = bsm_price(OptionType::Call, 100.0, 100.0, 0.0, 0.05, 0.2, 1.0);
/// assert!((engine.evaluate().unwrap().price - bs).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct JumpDiffusionEngine {
    contract: ContractParameters,
    volatility: f64,
    jumps: JumpModelParameters,
    config: JumpSeriesConfig,
}

impl JumpDiffusionEngine {
    /// Creates an engine with the default term budget.
    ///
    /// # Errors
    /// `InvalidParameters` if the contract carries no volatility.
    pub fn new(contract: &ContractParameters, jumps: JumpModelParameters) -> PricingResult<Self> {
        Self::with_config(contract, jumps, JumpSeriesConfig::default())
    }

    /// Creates an engine with an explicit term budget.
    pub fn with_config(
        contract: &ContractParameters,
        jumps: JumpModelParameters,
        config: JumpSeriesConfig,
    ) -> PricingResult<Self> {
        if config.max_terms == 0 {
            return Err(PricingError::invalid("jump series needs at least one term"));
        }
        let volatility = contract.require_volatility()?;
        Ok(Self {
            contract: *contract,
            volatility,
            jumps,
            config,
        })
    }

    /// Jump parameters.
    pub fn jumps(&self) -> &JumpModelParameters {
        &self.jumps
    }

    /// Series configuration.
    pub fn config(&self) -> &JumpSeriesConfig {
        &self.config
    }

    /// Sums the series.
    ///
    /// # Errors
    /// `SeriesNotConverged` if the term envelope does not fall to `eps`
    /// within `max_terms` terms.
    pub fn evaluate(&self) -> PricingResult<JumpSeriesResult> {
        let c = &self.contract;
        let t = c.maturity();
        let lambda = self.jumps.intensity();
        let k = self.jumps.jump_mean();
        let delta = self.jumps.jump_volatility();
        let eps = self.jumps.tolerance();

        let lt = self.jumps.adjusted_intensity() * t;
        let base_rate = c.rate() - lambda * k;
        let sigma2 = self.volatility * self.volatility;

        if lt == 0.0 {
            // P(0) = 1 and every other weight vanishes.
            let price = bsm_price(
                c.option_type(),
                c.spot(),
                c.strike(),
                c.dividend_yield(),
                base_rate,
                self.volatility,
                t,
            );
            return Ok(JumpSeriesResult { price, terms: 1 });
        }

        let gamma = self.jumps.log_jump_mean();
        let ln_lt = lt.ln();
        let (bound, envelope_mean) = match c.option_type() {
            OptionType::Call => (c.spot() * c.g_disc(), lt),
            OptionType::Put => (c.strike() * c.r_disc(), lambda * t),
        };
        let ln_bound = bound.ln();
        let ln_envelope_mean = envelope_mean.ln();
        let mode = envelope_mean.floor() as usize;

        let mut sum = 0.0;
        let mut last_term = f64::NAN;
        for n in 0..self.config.max_terms {
            let nf = n as f64;
            let ln_factorial = ln_gamma(nf + 1.0);
            let weight = (-lt + nf * ln_lt - ln_factorial).exp();
            let rate_n = base_rate + nf * gamma / t;
            let vol_n = (sigma2 + nf * delta * delta / t).sqrt();
            let bs = bsm_price(
                c.option_type(),
                c.spot(),
                c.strike(),
                c.dividend_yield(),
                rate_n,
                vol_n,
                t,
            );
            let term = weight * bs;
            last_term = term;

            let envelope =
                (ln_bound - envelope_mean + nf * ln_envelope_mean - ln_factorial).exp();
            if n >= mode && envelope <= eps {
                debug!(terms = n, price = sum, "jump series converged");
                return Ok(JumpSeriesResult {
                    price: sum,
                    terms: n,
                });
            }
            sum += term;
        }

        warn!(
            max_terms = self.config.max_terms,
            last_term, "jump series hit its term budget"
        );
        Err(PricingError::SeriesNotConverged {
            terms: self.config.max_terms,
            last_term,
        })
    }
}

impl PricingEngine for JumpDiffusionEngine {
    fn contract(&self) -> &ContractParameters {
        &self.contract
    }

    fn price(&self) -> PricingResult<f64> {
        self.evaluate().map(|result| result.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn contract(option_type: OptionType) -> ContractParameters {
        ContractParameters::builder()
            .spot(100.0)
            .strike(100.0)
            .rate(0.05)
            .maturity(1.0)
            .volatility(0.2)
            .option_type(option_type)
            .build()
            .unwrap()
    }

    fn bs(option_type: OptionType) -> f64 {
        bsm_price(option_type, 100.0, 100.0, 0.0, 0.05, 0.2, 1.0)
    }

    #[test]
    fn test_zero_intensity_is_black_scholes() {
        let jumps = JumpModelParameters::new(-0.2, 0.0, 0.3, 1e-12).unwrap();
        let engine = JumpDiffusionEngine::new(&contract(OptionType::Put), jumps).unwrap();
        let result = engine.evaluate().unwrap();
        assert_eq!(result.terms, 1);
        assert_relative_eq!(result.price, bs(OptionType::Put), epsilon = 1e-14);
    }

    #[test]
    fn test_small_intensity_approaches_black_scholes() {
        let jumps = JumpModelParameters::new(0.1, 1e-8, 0.2, 1e-14).unwrap();
        let engine = JumpDiffusionEngine::new(&contract(OptionType::Call), jumps).unwrap();
        assert_relative_eq!(engine.price().unwrap(), bs(OptionType::Call), epsilon = 1e-6);
    }

    #[test]
    fn test_zero_jump_size_is_black_scholes() {
        // k = 0, δ = 0: jumps carry no information, every term is BSM(σ, r).
        let jumps = JumpModelParameters::new(0.0, 3.0, 0.0, 1e-14).unwrap();
        let engine = JumpDiffusionEngine::new(&contract(OptionType::Call), jumps).unwrap();
        assert_relative_eq!(engine.price().unwrap(), bs(OptionType::Call), epsilon = 1e-10);
    }

    #[test]
    fn test_jump_variance_raises_atm_value() {
        let jumps = JumpModelParameters::new(0.0, 1.0, 0.3, 1e-12).unwrap();
        let engine = JumpDiffusionEngine::new(&contract(OptionType::Call), jumps).unwrap();
        assert!(engine.price().unwrap() > bs(OptionType::Call));
    }

    #[test]
    fn test_put_call_parity_holds() {
        let jumps = JumpModelParameters::new(-0.1, 0.8, 0.25, 1e-13).unwrap();
        let call = JumpDiffusionEngine::new(&contract(OptionType::Call), jumps)
            .unwrap()
            .price()
            .unwrap();
        let put = JumpDiffusionEngine::new(&contract(OptionType::Put), jumps)
            .unwrap()
            .price()
            .unwrap();
        let forward = 100.0 - 100.0 * (-0.05_f64).exp();
        assert_relative_eq!(call - put, forward, epsilon = 1e-9);
    }

    #[test]
    fn test_large_intensity_does_not_stop_before_mode() {
        // λ'T = 40: early terms are far below eps but the mass sits near n = 40.
        let jumps = JumpModelParameters::new(0.0, 40.0, 0.05, 1e-10).unwrap();
        let engine = JumpDiffusionEngine::new(&contract(OptionType::Call), jumps).unwrap();
        let result = engine.evaluate().unwrap();
        assert!(result.terms > 40);
        // Total variance σ² + λδ² gives the same price when k = 0.
        let sigma_eff = (0.04_f64 + 40.0 * 0.0025).sqrt();
        let expected = bsm_price(OptionType::Call, 100.0, 100.0, 0.0, 0.05, sigma_eff, 1.0);
        assert!(result.price < expected);
        assert!(result.price > bs(OptionType::Call));
    }

    /// Brute-force sum of the first `terms` series terms.
    fn explicit_sum(c: &ContractParameters, jumps: &JumpModelParameters, terms: usize) -> f64 {
        let t = c.maturity();
        let lt = jumps.adjusted_intensity() * t;
        let sigma = c.volatility().unwrap();
        (0..terms)
            .map(|n| {
                let nf = n as f64;
                let weight = (-lt + nf * lt.ln() - ln_gamma(nf + 1.0)).exp();
                let rate_n = c.rate() - jumps.intensity() * jumps.jump_mean()
                    + nf * jumps.log_jump_mean() / t;
                let vol_n = (sigma * sigma + nf * jumps.jump_volatility().powi(2) / t).sqrt();
                weight
                    * bsm_price(
                        c.option_type(),
                        c.spot(),
                        c.strike(),
                        c.dividend_yield(),
                        rate_n,
                        vol_n,
                        t,
                    )
            })
            .sum()
    }

    #[test]
    fn test_deep_otm_put_with_large_negative_jumps() {
        // Put terms are negligible near λ'T = 5 and peak near λT = 10.
        let put = contract(OptionType::Put).with_strike(50.0).unwrap();
        let call = put.with_option_type(OptionType::Call);
        let jumps = JumpModelParameters::new(-0.5, 10.0, 0.1, 1e-8).unwrap();

        let put_result = JumpDiffusionEngine::new(&put, jumps).unwrap().evaluate().unwrap();
        let call_price = JumpDiffusionEngine::new(&call, jumps).unwrap().price().unwrap();

        assert!(put_result.terms > 10);
        assert_relative_eq!(put_result.price, explicit_sum(&put, &jumps, 400), epsilon = 1e-6);
        let forward = 100.0 - 50.0 * (-0.05_f64).exp();
        assert_relative_eq!(call_price - put_result.price, forward, epsilon = 1e-6);
    }

    #[test]
    fn test_matches_explicit_sum_across_regimes() {
        let cases = [
            (OptionType::Put, 70.0, -0.3, 3.0, 0.2),
            (OptionType::Put, 40.0, -0.8, 6.0, 0.05),
            (OptionType::Call, 250.0, 1.0, 2.0, 0.1),
            (OptionType::Call, 100.0, -0.5, 10.0, 0.1),
            (OptionType::Put, 130.0, 0.4, 4.0, 0.3),
        ];
        for (option_type, strike, k, lambda, delta) in cases {
            let c = contract(option_type).with_strike(strike).unwrap();
            let jumps = JumpModelParameters::new(k, lambda, delta, 1e-10).unwrap();
            let price = JumpDiffusionEngine::new(&c, jumps).unwrap().price().unwrap();
            let expected = explicit_sum(&c, &jumps, 400);
            assert!(
                (price - expected).abs() < 1e-8,
                "{:?} K={} k={} λ={}: {} vs {}",
                option_type,
                strike,
                k,
                lambda,
                price,
                expected
            );
        }
    }

    #[test]
    fn test_term_budget_exhaustion_is_reported() {
        let jumps = JumpModelParameters::new(0.05, 50.0, 0.1, 1e-12).unwrap();
        let engine = JumpDiffusionEngine::with_config(
            &contract(OptionType::Call),
            jumps,
            JumpSeriesConfig { max_terms: 5 },
        )
        .unwrap();
        assert!(matches!(
            engine.evaluate(),
            Err(PricingError::SeriesNotConverged { terms: 5, .. })
        ));
    }

    #[test]
    fn test_price_quoted_contract_rejected() {
        let quoted = contract(OptionType::Call).with_target_price(10.0).unwrap();
        let jumps = JumpModelParameters::new(0.0, 1.0, 0.1, 1e-10).unwrap();
        assert!(matches!(
            JumpDiffusionEngine::new(&quoted, jumps),
            Err(PricingError::InvalidParameters(_))
        ));
    }
}
