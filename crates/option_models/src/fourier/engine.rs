//! Fourier inversion pricing engine.
//!
//! ## Mathematical Formulas
//!
//! π₂ = ½ + (1/π)∫₀^∞ Re[e^(−iω ln K)·Φ(ω) / (iω)] dω
//! π₁ = ½ + (1/π)∫₀^∞ Re[e^(−iω ln K)·Φ(ω − i) / (iω·Φ(−i))] dω
//!
//! **Call Price**: C = S·e^(-gT)·π₁ − K·e^(-rT)·π₂
//! **Put Price**: P = K·e^(-rT)·(1 − π₂) − S·e^(-gT)·(1 − π₁)
//!
//! `Φ(−i) = E[S_T]` normalises the share-measure integrand, so any
//! characteristic function of the log-price can be plugged in.

use std::f64::consts::PI;

use num_complex::Complex64;
use option_core::math::quadrature::{AdaptiveQuadrature, QuadratureConfig};
use option_core::traits::PricingEngine;
use option_core::types::{ContractParameters, OptionType, PricingError, PricingResult};
use tracing::debug;

use super::characteristic::{BlackScholesCharacteristic, CharacteristicFunction};

/// Exercise probabilities recovered by Fourier inversion.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FourierProbabilities {
    /// Share-measure probability of finishing in the money (call side).
    pub pi1: f64,
    /// Risk-neutral probability of finishing in the money (call side).
    pub pi2: f64,
}

/// Engine pricing a European option from a characteristic function.
///
/// # Examples
/// ```
/// use option_core::types::{ContractParameters, OptionType};
/// use option_models::analytical::BlackScholesEngine;
/// use option_models::fourier::FourierEngine;
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
/// let fourier = FourierEngine::new(&contract).unwrap();
/// let closed = BlackScholesEngine::new(&contract).unwrap();
/// assert!((fourier.price().unwrap() - closed.price()).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct FourierEngine<C = BlackScholesCharacteristic> {
    contract: ContractParameters,
    characteristic: C,
    quadrature: AdaptiveQuadrature,
}

impl FourierEngine<BlackScholesCharacteristic> {
    /// Lognormal engine with default quadrature settings.
    ///
    /// # Errors
    /// `InvalidParameters` if the contract carries no volatility.
    pub fn new(contract: &ContractParameters) -> PricingResult<Self> {
        let characteristic = BlackScholesCharacteristic::from_contract(contract)?;
        Ok(Self::with_characteristic(contract, characteristic))
    }
}

impl<C: CharacteristicFunction> FourierEngine<C> {
    /// Engine for an arbitrary characteristic function of `ln S_T`.
    pub fn with_characteristic(contract: &ContractParameters, characteristic: C) -> Self {
        Self {
            contract: *contract,
            characteristic,
            quadrature: AdaptiveQuadrature::with_defaults(),
        }
    }

    /// Replaces the quadrature settings.
    pub fn with_quadrature(mut self, config: QuadratureConfig) -> Self {
        self.quadrature = AdaptiveQuadrature::new(config);
        self
    }

    /// Characteristic function in use.
    pub fn characteristic(&self) -> &C {
        &self.characteristic
    }

    /// Computes π₁ and π₂.
    ///
    /// # Errors
    /// `NonConvergentQuadrature` if either integral misses its tolerance
    /// or meets a non-finite integrand value.
    pub fn probabilities(&self) -> PricingResult<FourierProbabilities> {
        let ln_k = self.contract.strike().ln();
        let minus_i = Complex64::new(0.0, -1.0);
        let forward = self.characteristic.evaluate(minus_i);
        if !(forward.re.is_finite() && forward.re > 0.0) {
            return Err(PricingError::NonConvergentQuadrature(format!(
                "characteristic function gives a non-positive forward: {}",
                forward
            )));
        }

        let cf = &self.characteristic;
        // Re[z / (iω)] = Im(z) / ω
        let p1 = |w: f64| {
            let z = (Complex64::new(0.0, -w * ln_k)).exp() * cf.evaluate(Complex64::new(w, -1.0))
                / forward;
            z.im / w
        };
        let p2 = |w: f64| {
            let z = (Complex64::new(0.0, -w * ln_k)).exp() * cf.evaluate(Complex64::new(w, 0.0));
            z.im / w
        };

        let i1 = self.quadrature.integrate_semi_infinite(p1, 0.0)?;
        let i2 = self.quadrature.integrate_semi_infinite(p2, 0.0)?;
        debug!(
            panels1 = i1.subdivisions,
            panels2 = i2.subdivisions,
            error1 = i1.error_estimate,
            error2 = i2.error_estimate,
            "fourier integrals converged"
        );

        Ok(FourierProbabilities {
            pi1: 0.5 + i1.value / PI,
            pi2: 0.5 + i2.value / PI,
        })
    }

    /// Present value of the option.
    pub fn price(&self) -> PricingResult<f64> {
        let FourierProbabilities { pi1, pi2 } = self.probabilities()?;
        let c = &self.contract;
        let spot_leg = c.spot() * c.g_disc();
        let strike_leg = c.strike() * c.r_disc();
        Ok(match c.option_type() {
            OptionType::Call => spot_leg * pi1 - strike_leg * pi2,
            OptionType::Put => strike_leg * (1.0 - pi2) - spot_leg * (1.0 - pi1),
        })
    }
}

impl<C: CharacteristicFunction> PricingEngine for FourierEngine<C> {
    fn contract(&self) -> &ContractParameters {
        &self.contract
    }

    fn price(&self) -> PricingResult<f64> {
        FourierEngine::price(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytical::bsm_price;
    use approx::assert_relative_eq;
    use option_core::math::distributions::norm_cdf;

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

    #[test]
    fn test_probabilities_match_normal_cdf() {
        let engine = FourierEngine::new(&contract(OptionType::Call)).unwrap();
        let p = engine.probabilities().unwrap();
        assert_relative_eq!(p.pi1, norm_cdf(0.35), epsilon = 1e-8);
        assert_relative_eq!(p.pi2, norm_cdf(0.15), epsilon = 1e-8);
    }

    #[test]
    fn test_reference_prices() {
        let call = FourierEngine::new(&contract(OptionType::Call)).unwrap();
        let put = FourierEngine::new(&contract(OptionType::Put)).unwrap();
        assert_relative_eq!(call.price().unwrap(), 10.450_583_572_185_565, epsilon = 1e-6);
        assert_relative_eq!(put.price().unwrap(), 5.573_526_022_256_971, epsilon = 1e-6);
    }

    #[test]
    fn test_matches_closed_form_with_carry() {
        let c = ContractParameters::builder()
            .spot(90.0)
            .strike(110.0)
            .dividend_yield(0.02)
            .rate(0.03)
            .maturity(2.0)
            .volatility(0.35)
            .option_type(OptionType::Put)
            .build()
            .unwrap();
        let fourier = FourierEngine::new(&c).unwrap().price().unwrap();
        let closed = bsm_price(OptionType::Put, 90.0, 110.0, 0.02, 0.03, 0.35, 2.0);
        assert_relative_eq!(fourier, closed, epsilon = 1e-6);
    }

    #[test]
    fn test_starved_quadrature_is_reported() {
        let engine = FourierEngine::new(&contract(OptionType::Call))
            .unwrap()
            .with_quadrature(QuadratureConfig {
                abs_tolerance: 1e-15,
                rel_tolerance: 0.0,
                max_subdivisions: 1,
            });
        assert!(matches!(
            engine.price(),
            Err(PricingError::NonConvergentQuadrature(_))
        ));
    }

    struct Broken;

    impl CharacteristicFunction for Broken {
        fn evaluate(&self, _omega: Complex64) -> Complex64 {
            Complex64::new(f64::NAN, 0.0)
        }
    }

    #[test]
    fn test_non_finite_characteristic_is_reported() {
        let engine = FourierEngine::with_characteristic(&contract(OptionType::Call), Broken);
        assert!(matches!(
            engine.price(),
            Err(PricingError::NonConvergentQuadrature(_))
        ));
    }
}
