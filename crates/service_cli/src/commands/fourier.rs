//! `fourier` command.

use option_models::analytical::BlackScholesEngine;
use option_models::fourier::FourierEngine;
use serde::Serialize;
use tracing::info;

use super::contract::ContractArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::output::{emit, number, OutputFormat, Report};

/// Transform value with its exercise probabilities.
#[derive(Debug, Clone, Serialize)]
pub struct FourierReport {
    /// Option value by Fourier inversion.
    pub price: f64,
    /// Share-measure exercise probability.
    pub pi1: f64,
    /// Risk-neutral exercise probability.
    pub pi2: f64,
    /// Closed-form value for comparison.
    pub black_scholes: f64,
}

impl Report for FourierReport {
    fn title(&self) -> &str {
        "Fourier inversion"
    }

    fn rows(&self) -> Vec<(String, String)> {
        vec![
            ("price".to_string(), number(self.price)),
            ("pi1".to_string(), number(self.pi1)),
            ("pi2".to_string(), number(self.pi2)),
            ("black-scholes".to_string(), number(self.black_scholes)),
        ]
    }
}

/// Prices by Fourier inversion with the configured quadrature.
pub fn fourier(args: &ContractArgs, config: &AppConfig) -> Result<FourierReport> {
    let contract = args.resolve(config)?;
    let engine = FourierEngine::new(&contract)?.with_quadrature(config.quadrature);
    let probabilities = engine.probabilities()?;
    Ok(FourierReport {
        price: engine.price()?,
        pi1: probabilities.pi1,
        pi2: probabilities.pi2,
        black_scholes: BlackScholesEngine::new(&contract)?.price(),
    })
}

/// Run the fourier command
pub fn run(args: &ContractArgs, config: &AppConfig, format: OutputFormat) -> Result<()> {
    let report = fourier(args, config)?;
    info!(price = report.price, "fourier price computed");
    emit(&report, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_matches_closed_form() {
        let args = ContractArgs {
            spot: 100.0,
            strike: 110.0,
            dividend: 0.01,
            rate: 0.03,
            maturity: 0.5,
            option_type: "call".to_string(),
            sigma: Some(0.25),
            target_price: None,
        };
        let report = fourier(&args, &AppConfig::default()).unwrap();
        assert_relative_eq!(report.price, report.black_scholes, epsilon = 1e-6);
        assert!(report.pi1 > report.pi2);
    }
}
