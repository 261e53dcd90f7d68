//! Volatility provider seam.
//!
//! Historical volatility estimation lives outside this workspace. A provider
//! turns a ticker set and a date range into a scalar or per-ticker estimate
//! which callers then feed into a contract as `sigma`. No engine calls a
//! provider itself.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::types::{PricingError, PricingResult};

/// Volatility estimate returned by a [`VolatilitySource`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VolatilityEstimate {
    /// One annualised volatility for the whole ticker set.
    Scalar(f64),
    /// Annualised volatility per ticker symbol.
    PerTicker(BTreeMap<String, f64>),
}

impl VolatilityEstimate {
    /// Volatility for `ticker`; a scalar estimate applies to every ticker.
    pub fn for_ticker(&self, ticker: &str) -> Option<f64> {
        match self {
            VolatilityEstimate::Scalar(v) => Some(*v),
            VolatilityEstimate::PerTicker(map) => map.get(ticker).copied(),
        }
    }
}

/// External historical volatility provider.
pub trait VolatilitySource {
    /// Estimate volatility for `tickers` over `[start, end]`.
    ///
    /// # Errors
    /// `InvalidParameters` if the range is empty or reversed.
    fn estimate(
        &self,
        tickers: &[&str],
        start: NaiveDate,
        end: NaiveDate,
    ) -> PricingResult<VolatilityEstimate>;
}

/// Provider returning the same annualised volatility for every request.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use option_core::traits::{ConstantVolatility, VolatilitySource};
///
/// let source = ConstantVolatility::new(0.25).unwrap();
/// let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 6, 28).unwrap();
/// let est = source.estimate(&["AAPL"], start, end).unwrap();
/// assert_eq!(est.for_ticker("AAPL"), Some(0.25));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstantVolatility {
    volatility: f64,
}

impl ConstantVolatility {
    /// Creates a provider; `volatility` must be positive and finite.
    pub fn new(volatility: f64) -> PricingResult<Self> {
        if volatility.is_finite() && volatility > 0.0 {
            Ok(Self { volatility })
        } else {
            Err(PricingError::invalid(format!(
                "volatility must be positive and finite, got {}",
                volatility
            )))
        }
    }

    /// The constant volatility.
    pub fn volatility(&self) -> f64 {
        self.volatility
    }
}

impl VolatilitySource for ConstantVolatility {
    fn estimate(
        &self,
        tickers: &[&str],
        start: NaiveDate,
        end: NaiveDate,
    ) -> PricingResult<VolatilityEstimate> {
        if end <= start {
            return Err(PricingError::invalid(format!(
                "date range is empty: {} .. {}",
                start, end
            )));
        }
        tracing::debug!(tickers = tickers.len(), %start, %end, "constant volatility estimate");
        Ok(VolatilityEstimate::Scalar(self.volatility))
    }
}
