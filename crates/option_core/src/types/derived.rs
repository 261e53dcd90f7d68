//! Derived Black-Scholes quantities.
//!
//! ## Mathematical Formulas
//!
//! - d₁ = (ln(S/K) + (r − g + σ²/2)τ) / (σ√τ)
//! - d₂ = d₁ − σ√τ
//! - pdfNorm = φ(d₁)
//! - rDisc = e^(−rτ), gDisc = e^(−gτ)

use crate::math::distributions::norm_pdf;

/// Snapshot of the quantities derived from a contract and a volatility.
///
/// All fields are computed together by [`DerivedQuantities::compute`], so
/// `d2 = d1 − σ√τ` and `pdf_norm = φ(d1)` always hold for a value of this
/// type.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedQuantities {
    /// Moneyness term d₁.
    pub d1: f64,
    /// d₂ = d₁ − σ√τ.
    pub d2: f64,
    /// Standard normal density at d₁.
    pub pdf_norm: f64,
    /// e^(−rτ)
    pub r_disc: f64,
    /// e^(−gτ)
    pub g_disc: f64,
    /// σ√τ
    pub vol_sqrt_t: f64,
}

impl DerivedQuantities {
    /// Computes every derived quantity from explicit inputs.
    ///
    /// # Arguments
    /// * `spot` - Underlying price
    /// * `strike` - Strike price
    /// * `dividend_yield` - Continuous carry yield g
    /// * `rate` - Continuous risk-free rate r
    /// * `volatility` - Annualised volatility σ
    /// * `tau` - Remaining time to maturity in years
    ///
    /// # Examples
    /// ```
    /// use option_core::types::DerivedQuantities;
    ///
    /// let d = DerivedQuantities::compute(100.0, 100.0, 0.0, 0.0, 0.2, 1.0);
    /// assert!((d.d1 - 0.1).abs() < 1e-12);
    /// assert!((d.d2 + 0.1).abs() < 1e-12);
    /// ```
    #[inline]
    pub fn compute(
        spot: f64,
        strike: f64,
        dividend_yield: f64,
        rate: f64,
        volatility: f64,
        tau: f64,
    ) -> Self {
        let (d1, d2) = d1_d2(spot, strike, dividend_yield, rate, volatility, tau);
        Self {
            d1,
            d2,
            pdf_norm: norm_pdf(d1),
            r_disc: (-rate * tau).exp(),
            g_disc: (-dividend_yield * tau).exp(),
            vol_sqrt_t: volatility * tau.sqrt(),
        }
    }
}

/// Computes `(d1, d2)` for the given inputs.
///
/// This is the building block reused per time step by the hedge simulator
/// and per jump count by the jump-diffusion series.
#[inline]
pub fn d1_d2(
    spot: f64,
    strike: f64,
    dividend_yield: f64,
    rate: f64,
    volatility: f64,
    tau: f64,
) -> (f64, f64) {
    let vol_sqrt_t = volatility * tau.sqrt();
    let drift = (rate - dividend_yield + 0.5 * volatility * volatility) * tau;
    let d1 = ((spot / strike).ln() + drift) / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_d1_d2_relationship() {
        let (d1, d2) = d1_d2(100.0, 105.0, 0.02, 0.05, 0.2, 0.5);
        assert_relative_eq!(d2, d1 - 0.2 * 0.5_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_dividend_lowers_d1() {
        let (with_carry, _) = d1_d2(100.0, 100.0, 0.03, 0.05, 0.2, 1.0);
        let (no_carry, _) = d1_d2(100.0, 100.0, 0.0, 0.05, 0.2, 1.0);
        assert_relative_eq!(no_carry - with_carry, 0.03 / 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_snapshot_is_consistent() {
        let d = DerivedQuantities::compute(90.0, 100.0, 0.01, 0.03, 0.35, 2.0);
        assert_relative_eq!(d.d2, d.d1 - d.vol_sqrt_t, epsilon = 1e-12);
        assert_relative_eq!(d.pdf_norm, norm_pdf(d.d1), epsilon = 1e-15);
        assert_relative_eq!(d.r_disc, (-0.06_f64).exp(), epsilon = 1e-15);
        assert_relative_eq!(d.g_disc, (-0.02_f64).exp(), epsilon = 1e-15);
    }

    #[test]
    fn test_deep_itm_and_otm_signs() {
        let (itm, _) = d1_d2(150.0, 100.0, 0.0, 0.05, 0.2, 1.0);
        let (otm, _) = d1_d2(50.0, 100.0, 0.0, 0.05, 0.2, 1.0);
        assert!(itm > 1.0);
        assert!(otm < -1.0);
    }
}
