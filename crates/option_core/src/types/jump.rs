//! Jump-diffusion model parameters.

use super::error::{PricingError, PricingResult};

/// Compound-Poisson jump parameters layered on top of a contract.
///
/// # Fields
/// - `jump_mean` (`k`): mean relative jump size, must exceed −1
/// - `intensity` (`λ`): expected number of jumps per year, non-negative
/// - `jump_volatility` (`δ`): volatility of the log jump size, non-negative
/// - `tolerance` (`eps`): series truncation tolerance, positive
///
/// # Examples
/// ```
/// use option_core::types::JumpModelParameters;
///
/// let jumps = JumpModelParameters::new(-0.1, 0.5, 0.3, 1e-10).unwrap();
/// assert_eq!(jumps.intensity(), 0.5);
/// assert!(JumpModelParameters::new(-1.5, 0.5, 0.3, 1e-10).is_err());
/// ```
///
/// Deserialisation goes through [`new`](JumpModelParameters::new).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct JumpModelParameters {
    jump_mean: f64,
    intensity: f64,
    jump_volatility: f64,
    tolerance: f64,
}

impl JumpModelParameters {
    /// Creates validated jump parameters.
    ///
    /// # Errors
    /// `InvalidParameters` if `k ≤ −1`, `λ < 0`, `δ < 0`, `eps ≤ 0` or any
    /// input is not finite.
    pub fn new(
        jump_mean: f64,
        intensity: f64,
        jump_volatility: f64,
        tolerance: f64,
    ) -> PricingResult<Self> {
        if !jump_mean.is_finite() || jump_mean <= -1.0 {
            return Err(PricingError::invalid(format!(
                "jump mean k must be finite and greater than -1, got {}",
                jump_mean
            )));
        }
        if !intensity.is_finite() || intensity < 0.0 {
            return Err(PricingError::invalid(format!(
                "jump intensity must be finite and non-negative, got {}",
                intensity
            )));
        }
        if !jump_volatility.is_finite() || jump_volatility < 0.0 {
            return Err(PricingError::invalid(format!(
                "jump volatility must be finite and non-negative, got {}",
                jump_volatility
            )));
        }
        validate_tolerance(tolerance)?;

        Ok(Self {
            jump_mean,
            intensity,
            jump_volatility,
            tolerance,
        })
    }

    /// Mean relative jump size `k`.
    #[inline]
    pub fn jump_mean(&self) -> f64 {
        self.jump_mean
    }

    /// Jump intensity `λ`.
    #[inline]
    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    /// Jump-size volatility `δ`.
    #[inline]
    pub fn jump_volatility(&self) -> f64 {
        self.jump_volatility
    }

    /// Series truncation tolerance `eps`.
    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns a copy with a different truncation tolerance.
    pub fn with_tolerance(&self, tolerance: f64) -> PricingResult<Self> {
        validate_tolerance(tolerance)?;
        Ok(Self { tolerance, ..*self })
    }

    /// Risk-neutral jump intensity `λ' = λ(1 + k)`.
    #[inline]
    pub fn adjusted_intensity(&self) -> f64 {
        self.intensity * (1.0 + self.jump_mean)
    }

    /// Log of the mean jump multiplier, `γ = ln(1 + k)`.
    #[inline]
    pub fn log_jump_mean(&self) -> f64 {
        self.jump_mean.ln_1p()
    }
}

fn validate_tolerance(tolerance: f64) -> PricingResult<()> {
    if tolerance.is_finite() && tolerance > 0.0 {
        Ok(())
    } else {
        Err(PricingError::invalid(format!(
            "series tolerance must be positive and finite, got {}",
            tolerance
        )))
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::JumpModelParameters;
    use serde::{de, Deserialize, Deserializer};

    #[derive(Deserialize)]
    struct Record {
        jump_mean: f64,
        intensity: f64,
        jump_volatility: f64,
        tolerance: f64,
    }

    impl<'de> Deserialize<'de> for JumpModelParameters {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let r = Record::deserialize(deserializer)?;
            JumpModelParameters::new(r.jump_mean, r.intensity, r.jump_volatility, r.tolerance)
                .map_err(de::Error::custom)
        }
    }
}
