//! `implied-vol` command.

use option_models::analytical::ImpliedVolatilitySolver;
use serde::Serialize;
use tracing::info;

use super::contract::ContractArgs;
use crate::config::AppConfig;
use crate::error::{CliError, Result};
use crate::output::{emit, number, OutputFormat, Report};

/// Implied volatility of a quoted price.
#[derive(Debug, Clone, Serialize)]
pub struct ImpliedVolReport {
    /// Observed option price.
    pub target_price: f64,
    /// Volatility reproducing the target price.
    pub implied_volatility: f64,
    /// Lower end of the search bracket.
    pub lower_bound: f64,
    /// Upper end of the search bracket.
    pub upper_bound: f64,
}

impl Report for ImpliedVolReport {
    fn title(&self) -> &str {
        "Implied volatility"
    }

    fn rows(&self) -> Vec<(String, String)> {
        vec![
            ("target price".to_string(), number(self.target_price)),
            ("implied volatility".to_string(), number(self.implied_volatility)),
            (
                "bracket".to_string(),
                format!("[{}, {}]", self.lower_bound, self.upper_bound),
            ),
        ]
    }
}

/// Solves for σ* with the configured bracket.
pub fn implied_vol(args: &ContractArgs, config: &AppConfig) -> Result<ImpliedVolReport> {
    let target_price = args.target_price.ok_or_else(|| {
        CliError::InvalidArgument("implied-vol needs --target-price".to_string())
    })?;
    let contract = args.to_contract()?;
    let solver = ImpliedVolatilitySolver::new(config.implied_vol)?;
    let implied_volatility = solver.solve(&contract)?;
    Ok(ImpliedVolReport {
        target_price,
        implied_volatility,
        lower_bound: solver.config().lower_bound,
        upper_bound: solver.config().upper_bound,
    })
}

/// Run the implied-vol command
pub fn run(args: &ContractArgs, config: &AppConfig, format: OutputFormat) -> Result<()> {
    let report = implied_vol(args, config)?;
    info!(sigma = report.implied_volatility, "implied volatility solved");
    emit(&report, format)
}
