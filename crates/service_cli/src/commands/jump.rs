//! `jump` command.

use clap::Args;
use option_core::types::JumpModelParameters;
use option_models::analytical::BlackScholesEngine;
use option_models::jump::JumpDiffusionEngine;
use serde::Serialize;
use tracing::info;

use super::contract::ContractArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::output::{emit, number, OutputFormat, Report};

/// Jump specification.
#[derive(Args, Debug, Clone)]
pub struct JumpArgs {
    /// Jump intensity λ (jumps per year)
    #[arg(long)]
    pub lambda: f64,

    /// Mean relative jump size k
    #[arg(long = "jump-mean", allow_negative_numbers = true)]
    pub jump_mean: f64,

    /// Volatility of the log jump size δ
    #[arg(long = "jump-vol")]
    pub jump_vol: f64,

    /// Series truncation tolerance
    #[arg(long, default_value_t = 1e-10)]
    pub eps: f64,
}

/// Merton series value.
#[derive(Debug, Clone, Serialize)]
pub struct JumpReport {
    /// Jump-diffusion value.
    pub price: f64,
    /// Series terms added.
    pub terms: usize,
    /// Value without jumps.
    pub black_scholes: f64,
}

impl Report for JumpReport {
    fn title(&self) -> &str {
        "Merton jump diffusion"
    }

    fn rows(&self) -> Vec<(String, String)> {
        vec![
            ("price".to_string(), number(self.price)),
            ("terms".to_string(), self.terms.to_string()),
            ("black-scholes".to_string(), number(self.black_scholes)),
        ]
    }
}

/// Sums the jump series with the configured term budget.
pub fn jump(contract_args: &ContractArgs, jump: &JumpArgs, config: &AppConfig) -> Result<JumpReport> {
    let contract = contract_args.resolve(config)?;
    let jumps = JumpModelParameters::new(jump.jump_mean, jump.lambda, jump.jump_vol, jump.eps)?;
    let engine = JumpDiffusionEngine::with_config(&contract, jumps, config.jump_series)?;
    let series = engine.evaluate()?;
    Ok(JumpReport {
        price: series.price,
        terms: series.terms,
        black_scholes: BlackScholesEngine::new(&contract)?.price(),
    })
}

/// Run the jump command
pub fn run(
    contract_args: &ContractArgs,
    jump_args: &JumpArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<()> {
    let report = jump(contract_args, jump_args, config)?;
    info!(price = report.price, terms = report.terms, "jump series summed");
    emit(&report, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use option_core::types::PricingError;

    fn contract() -> ContractArgs {
        ContractArgs {
            spot: 100.0,
            strike: 100.0,
            dividend: 0.0,
            rate: 0.05,
            maturity: 1.0,
            option_type: "put".to_string(),
            sigma: Some(0.2),
            target_price: None,
        }
    }

    #[test]
    fn test_jumps_raise_atm_value() {
        let args = JumpArgs {
            lambda: 1.0,
            jump_mean: -0.1,
            jump_vol: 0.3,
            eps: 1e-12,
        };
        let report = jump(&contract(), &args, &AppConfig::default()).unwrap();
        assert!(report.price > report.black_scholes);
        assert!(report.terms > 0);
    }

    #[test]
    fn test_invalid_jump_mean() {
        let args = JumpArgs {
            lambda: 1.0,
            jump_mean: -1.5,
            jump_vol: 0.3,
            eps: 1e-12,
        };
        assert!(matches!(
            jump(&contract(), &args, &AppConfig::default()),
            Err(CliError::Pricing(PricingError::InvalidParameters(_)))
        ));
    }
}
