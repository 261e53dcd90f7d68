//! Contract arguments shared by every pricing subcommand.

use clap::Args;
use option_core::types::{ContractParameters, OptionType};
use option_models::analytical::ImpliedVolatilitySolver;
use tracing::info;

use crate::config::AppConfig;
use crate::error::Result;

/// Market and contract inputs.
#[derive(Args, Debug, Clone)]
pub struct ContractArgs {
    /// Spot price of the underlying
    #[arg(long)]
    pub spot: f64,

    /// Strike price
    #[arg(long)]
    pub strike: f64,

    /// Continuous dividend (carry) yield
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub dividend: f64,

    /// Continuous risk-free rate
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub rate: f64,

    /// Time to maturity in years
    #[arg(long)]
    pub maturity: f64,

    /// Option type: call, put, 1 or -1
    #[arg(long = "option-type", default_value = "call", allow_hyphen_values = true)]
    pub option_type: String,

    /// Annualised volatility
    #[arg(long, conflicts_with = "target_price")]
    pub sigma: Option<f64>,

    /// Observed option price to imply volatility from
    #[arg(long = "target-price")]
    pub target_price: Option<f64>,
}

impl ContractArgs {
    /// Builds the contract exactly as quoted.
    pub fn to_contract(&self) -> Result<ContractParameters> {
        let option_type: OptionType = self.option_type.parse()?;
        let mut builder = ContractParameters::builder()
            .spot(self.spot)
            .strike(self.strike)
            .dividend_yield(self.dividend)
            .rate(self.rate)
            .maturity(self.maturity)
            .option_type(option_type);
        if let Some(sigma) = self.sigma {
            builder = builder.volatility(sigma);
        }
        if let Some(price) = self.target_price {
            builder = builder.target_price(price);
        }
        Ok(builder.build()?)
    }

    /// Builds the contract and, when it is quoted by price, replaces the
    /// quote with the implied volatility.
    pub fn resolve(&self, config: &AppConfig) -> Result<ContractParameters> {
        let contract = self.to_contract()?;
        if contract.volatility().is_some() {
            return Ok(contract);
        }
        let solver = ImpliedVolatilitySolver::new(config.implied_vol)?;
        let resolved = solver.resolve(&contract)?;
        info!(
            target_price = ?contract.target_price(),
            sigma = ?resolved.volatility(),
            "volatility implied from target price"
        );
        Ok(resolved)
    }
}
