//! Contract parameters shared by every pricing engine.
//!
//! A [`ContractParameters`] value is an immutable snapshot. Bumping an input
//! (`with_spot`, `with_volatility`, ...) returns a new, re-validated
//! snapshot; derived quantities are recomputed from the snapshot on demand
//! through [`ContractParameters::derived`], never cached.

use super::derived::DerivedQuantities;
use super::error::{PricingError, PricingResult};
use super::option_type::OptionType;

/// How the volatility of a contract is specified.
///
/// Exactly one of the two is present on a valid contract.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VolatilityQuote {
    /// Annualised volatility given directly.
    Volatility(f64),
    /// Observed market price; volatility must be implied from it.
    TargetPrice(f64),
}

/// Inputs of a vanilla European option.
///
/// # Examples
/// ```
/// use option_core::types::{ContractParameters, OptionType};
///
/// let contract = ContractParameters::builder()
///     .spot(100.0)
///     .strike(100.0)
///     .rate(0.05)
///     .maturity(1.0)
///     .option_type(OptionType::Call)
///     .volatility(0.2)
///     .build()
///     .unwrap();
///
/// assert_eq!(contract.volatility(), Some(0.2));
/// let derived = contract.derived().unwrap();
/// assert!((derived.d2 - (derived.d1 - 0.2)).abs() < 1e-12);
/// ```
///
/// Deserialisation runs the same validation as
/// [`build`](ContractParametersBuilder::build).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContractParameters {
    spot: f64,
    strike: f64,
    dividend_yield: f64,
    rate: f64,
    maturity: f64,
    option_type: OptionType,
    quote: VolatilityQuote,
}

impl ContractParameters {
    /// Creates a new contract builder.
    #[inline]
    pub fn builder() -> ContractParametersBuilder {
        ContractParametersBuilder::default()
    }

    /// Spot price of the underlying (`S0`).
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Strike price (`K`).
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Continuous dividend / carry yield (`g`).
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Continuous risk-free rate (`r`).
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Time to maturity in years (`T`).
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Call or put.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Volatility specification.
    #[inline]
    pub fn quote(&self) -> VolatilityQuote {
        self.quote
    }

    /// Volatility, when given directly.
    #[inline]
    pub fn volatility(&self) -> Option<f64> {
        match self.quote {
            VolatilityQuote::Volatility(sigma) => Some(sigma),
            VolatilityQuote::TargetPrice(_) => None,
        }
    }

    /// Observed market price, when volatility must be implied.
    #[inline]
    pub fn target_price(&self) -> Option<f64> {
        match self.quote {
            VolatilityQuote::TargetPrice(price) => Some(price),
            VolatilityQuote::Volatility(_) => None,
        }
    }

    /// Volatility, failing if the contract is still quoted by price.
    pub fn require_volatility(&self) -> PricingResult<f64> {
        self.volatility().ok_or_else(|| {
            PricingError::invalid("volatility is not resolved; imply it from the target price first")
        })
    }

    /// Discount factor `e^(-rT)`.
    #[inline]
    pub fn r_disc(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }

    /// Carry discount factor `e^(-gT)`.
    #[inline]
    pub fn g_disc(&self) -> f64 {
        (-self.dividend_yield * self.maturity).exp()
    }

    /// Recomputes `d1`, `d2`, `φ(d1)` and the discount factors for this snapshot.
    ///
    /// # Errors
    /// `InvalidParameters` if the volatility has not been resolved.
    pub fn derived(&self) -> PricingResult<DerivedQuantities> {
        let sigma = self.require_volatility()?;
        Ok(DerivedQuantities::compute(
            self.spot,
            self.strike,
            self.dividend_yield,
            self.rate,
            sigma,
            self.maturity,
        ))
    }

    /// Returns a snapshot with a directly given volatility.
    pub fn with_volatility(&self, sigma: f64) -> PricingResult<Self> {
        self.rebuild(|b| b.quote = Some(VolatilityQuote::Volatility(sigma)))
    }

    /// Returns a snapshot quoted by an observed market price.
    pub fn with_target_price(&self, price: f64) -> PricingResult<Self> {
        self.rebuild(|b| b.quote = Some(VolatilityQuote::TargetPrice(price)))
    }

    /// Returns a snapshot with a bumped spot.
    pub fn with_spot(&self, spot: f64) -> PricingResult<Self> {
        self.rebuild(|b| b.spot = Some(spot))
    }

    /// Returns a snapshot with a bumped strike.
    pub fn with_strike(&self, strike: f64) -> PricingResult<Self> {
        self.rebuild(|b| b.strike = Some(strike))
    }

    /// Returns a snapshot with a bumped risk-free rate.
    pub fn with_rate(&self, rate: f64) -> PricingResult<Self> {
        self.rebuild(|b| b.rate = rate)
    }

    /// Returns a snapshot with a bumped dividend yield.
    pub fn with_dividend_yield(&self, dividend_yield: f64) -> PricingResult<Self> {
        self.rebuild(|b| b.dividend_yield = dividend_yield)
    }

    /// Returns a snapshot with a bumped maturity.
    pub fn with_maturity(&self, maturity: f64) -> PricingResult<Self> {
        self.rebuild(|b| b.maturity = Some(maturity))
    }

    /// Returns the same contract with the opposite option type.
    pub fn with_option_type(&self, option_type: OptionType) -> Self {
        Self {
            option_type,
            ..*self
        }
    }

    fn rebuild(&self, edit: impl FnOnce(&mut ContractParametersBuilder)) -> PricingResult<Self> {
        let mut builder = ContractParametersBuilder::from(*self);
        edit(&mut builder);
        builder.build()
    }
}

/// Builder for [`ContractParameters`].
///
/// Validation happens in [`build`](ContractParametersBuilder::build):
/// `spot`, `strike` and `maturity` must be positive and finite, `rate`
/// and `dividend_yield` finite, and exactly one of `volatility` /
/// `target_price` must be supplied.
#[derive(Debug, Clone, Default)]
pub struct ContractParametersBuilder {
    spot: Option<f64>,
    strike: Option<f64>,
    dividend_yield: f64,
    rate: f64,
    maturity: Option<f64>,
    option_type: Option<OptionType>,
    volatility: Option<f64>,
    target_price: Option<f64>,
    quote: Option<VolatilityQuote>,
}

impl From<ContractParameters> for ContractParametersBuilder {
    fn from(contract: ContractParameters) -> Self {
        Self {
            spot: Some(contract.spot),
            strike: Some(contract.strike),
            dividend_yield: contract.dividend_yield,
            rate: contract.rate,
            maturity: Some(contract.maturity),
            option_type: Some(contract.option_type),
            volatility: None,
            target_price: None,
            quote: Some(contract.quote),
        }
    }
}

impl ContractParametersBuilder {
    /// Sets the spot price.
    pub fn spot(mut self, spot: f64) -> Self {
        self.spot = Some(spot);
        self
    }

    /// Sets the strike price.
    pub fn strike(mut self, strike: f64) -> Self {
        self.strike = Some(strike);
        self
    }

    /// Sets the continuous dividend yield (default 0).
    pub fn dividend_yield(mut self, dividend_yield: f64) -> Self {
        self.dividend_yield = dividend_yield;
        self
    }

    /// Sets the risk-free rate (default 0).
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Sets the time to maturity in years.
    pub fn maturity(mut self, maturity: f64) -> Self {
        self.maturity = Some(maturity);
        self
    }

    /// Sets the option type.
    pub fn option_type(mut self, option_type: OptionType) -> Self {
        self.option_type = Some(option_type);
        self
    }

    /// Supplies the volatility directly.
    pub fn volatility(mut self, sigma: f64) -> Self {
        self.volatility = Some(sigma);
        self
    }

    /// Supplies an observed market price to imply volatility from.
    pub fn target_price(mut self, price: f64) -> Self {
        self.target_price = Some(price);
        self
    }

    /// Validates the inputs and builds the contract.
    ///
    /// # Errors
    /// `InvalidParameters` for missing or out-of-domain inputs, and when
    /// both or neither of `volatility` / `target_price` are given.
    pub fn build(self) -> PricingResult<ContractParameters> {
        let spot = positive("spot", self.spot)?;
        let strike = positive("strike", self.strike)?;
        let maturity = positive("maturity", self.maturity)?;
        let option_type = self
            .option_type
            .ok_or_else(|| PricingError::invalid("option_type must be specified"))?;
        finite("rate", self.rate)?;
        finite("dividend_yield", self.dividend_yield)?;

        let quote = match (self.volatility, self.target_price, self.quote) {
            (Some(_), Some(_), _) => {
                return Err(PricingError::invalid(
                    "volatility and target_price are mutually exclusive",
                ))
            }
            (Some(sigma), None, _) => VolatilityQuote::Volatility(sigma),
            (None, Some(price), _) => VolatilityQuote::TargetPrice(price),
            (None, None, Some(quote)) => quote,
            (None, None, None) => {
                return Err(PricingError::invalid(
                    "either volatility or target_price must be supplied",
                ))
            }
        };

        match quote {
            VolatilityQuote::Volatility(sigma) => {
                positive("volatility", Some(sigma))?;
            }
            VolatilityQuote::TargetPrice(price) => {
                if !price.is_finite() || price < 0.0 {
                    return Err(PricingError::invalid(format!(
                        "target_price must be finite and non-negative, got {}",
                        price
                    )));
                }
            }
        }

        Ok(ContractParameters {
            spot,
            strike,
            dividend_yield: self.dividend_yield,
            rate: self.rate,
            maturity,
            option_type,
            quote,
        })
    }
}

fn positive(name: &str, value: Option<f64>) -> PricingResult<f64> {
    match value {
        None => Err(PricingError::invalid(format!("{} must be specified", name))),
        Some(v) if v.is_finite() && v > 0.0 => Ok(v),
        Some(v) => Err(PricingError::invalid(format!(
            "{} must be positive and finite, got {}",
            name, v
        ))),
    }
}

fn finite(name: &str, value: f64) -> PricingResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::invalid(format!("{} must be finite, got {}", name, value)))
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::{ContractParameters, ContractParametersBuilder, OptionType, VolatilityQuote};
    use serde::{de, Deserialize, Deserializer};

    #[derive(Deserialize)]
    struct Record {
        spot: f64,
        strike: f64,
        #[serde(default)]
        dividend_yield: f64,
        #[serde(default)]
        rate: f64,
        maturity: f64,
        option_type: OptionType,
        quote: VolatilityQuote,
    }

    impl<'de> Deserialize<'de> for ContractParameters {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let record = Record::deserialize(deserializer)?;
            ContractParametersBuilder {
                spot: Some(record.spot),
                strike: Some(record.strike),
                dividend_yield: record.dividend_yield,
                rate: record.rate,
                maturity: Some(record.maturity),
                option_type: Some(record.option_type),
                volatility: None,
                target_price: None,
                quote: Some(record.quote),
            }
            .build()
            .map_err(de::Error::custom)
        }
    }
}
