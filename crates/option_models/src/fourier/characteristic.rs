//! Characteristic functions of the terminal log-price.

use num_complex::Complex64;
use option_core::types::{ContractParameters, PricingResult};

/// Characteristic function `Φ(ω) = E[exp(iω·ln S_T)]` under the pricing
/// measure.
///
/// Implementations must accept complex arguments: the Fourier engine
/// evaluates `Φ(ω − i)` for the share-measure probability.
pub trait CharacteristicFunction {
    /// Evaluates `Φ(ω)`.
    fn evaluate(&self, omega: Complex64) -> Complex64;
}

/// Lognormal characteristic function, `Φ(ω) = exp(iωμ̄ − ½ω²σ̄)`.
///
/// - μ̄ = ln S + (r − g)T − ½σ²T
/// - σ̄ = σ²T
///
/// # Examples
/// ```
/// use num_complex::Complex64;
/// use option_core::types::{ContractParameters, OptionType};
/// use option_models::fourier::{BlackScholesCharacteristic, CharacteristicFunction};
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
/// let cf = BlackScholesCharacteristic::from_contract(&contract).unwrap();
///
/// // Φ(−i) = E[S_T] is the forward.
/// let forward = cf.evaluate(Complex64::new(0.0, -1.0));
/// assert!((forward.re - 100.0 * 0.05_f64.exp()).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholesCharacteristic {
    mean: f64,
    variance: f64,
}

impl BlackScholesCharacteristic {
    /// Builds the function from explicit log-price moments.
    pub fn new(mean: f64, variance: f64) -> Self {
        Self { mean, variance }
    }

    /// Builds the function for a contract with a resolved volatility.
    ///
    /// # Errors
    /// `InvalidParameters` if the contract carries no volatility.
    pub fn from_contract(contract: &ContractParameters) -> PricingResult<Self> {
        let sigma = contract.require_volatility()?;
        let t = contract.maturity();
        let variance = sigma * sigma * t;
        let mean = contract.spot().ln() + (contract.rate() - contract.dividend_yield()) * t
            - 0.5 * variance;
        Ok(Self::new(mean, variance))
    }

    /// Mean of the log-price, μ̄.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Variance of the log-price, σ̄.
    pub fn variance(&self) -> f64 {
        self.variance
    }
}

impl CharacteristicFunction for BlackScholesCharacteristic {
    fn evaluate(&self, omega: Complex64) -> Complex64 {
        let i = Complex64::i();
        (i * omega * self.mean - 0.5 * omega * omega * self.variance).exp()
    }
}
