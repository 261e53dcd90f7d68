//! `price` and `greeks` commands.

use option_models::analytical::{BlackScholesEngine, Greeks};
use serde::Serialize;
use tracing::info;

use super::contract::ContractArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::output::{emit, number, OutputFormat, Report};

/// Closed-form value with the quantities it was derived from.
#[derive(Debug, Clone, Serialize)]
pub struct PriceReport {
    /// Option value.
    pub price: f64,
    /// Volatility used (quoted or implied).
    pub volatility: f64,
    /// d₁ of the snapshot.
    pub d1: f64,
    /// d₂ of the snapshot.
    pub d2: f64,
}

impl Report for PriceReport {
    fn title(&self) -> &str {
        "Black-Scholes"
    }

    fn rows(&self) -> Vec<(String, String)> {
        vec![
            ("price".to_string(), number(self.price)),
            ("volatility".to_string(), number(self.volatility)),
            ("d1".to_string(), number(self.d1)),
            ("d2".to_string(), number(self.d2)),
        ]
    }
}

/// Price plus the full Greek set.
#[derive(Debug, Clone, Serialize)]
pub struct GreeksReport {
    /// Option value.
    pub price: f64,
    /// First and second order sensitivities.
    pub greeks: Greeks,
}

impl Report for GreeksReport {
    fn title(&self) -> &str {
        "Greeks"
    }

    fn rows(&self) -> Vec<(String, String)> {
        std::iter::once(("price".to_string(), number(self.price)))
            .chain(
                self.greeks
                    .entries()
                    .iter()
                    .map(|(name, value)| (name.to_string(), number(*value))),
            )
            .collect()
    }
}

/// Prices the contract in closed form.
pub fn price(args: &ContractArgs, config: &AppConfig) -> Result<PriceReport> {
    let contract = args.resolve(config)?;
    let engine = BlackScholesEngine::new(&contract)?;
    Ok(PriceReport {
        price: engine.price(),
        volatility: engine.volatility(),
        d1: engine.d1(),
        d2: engine.d2(),
    })
}

/// Computes the price and every Greek.
pub fn greeks(args: &ContractArgs, config: &AppConfig) -> Result<GreeksReport> {
    let contract = args.resolve(config)?;
    let engine = BlackScholesEngine::new(&contract)?;
    Ok(GreeksReport {
        price: engine.price(),
        greeks: engine.greeks(),
    })
}

/// Run the price command
pub fn run_price(args: &ContractArgs, config: &AppConfig, format: OutputFormat) -> Result<()> {
    let report = price(args, config)?;
    info!(price = report.price, "closed-form price computed");
    emit(&report, format)
}

/// Run the greeks command
pub fn run_greeks(args: &ContractArgs, config: &AppConfig, format: OutputFormat) -> Result<()> {
    let report = greeks(args, config)?;
    info!(delta = report.greeks.delta, "greeks computed");
    emit(&report, format)
}
