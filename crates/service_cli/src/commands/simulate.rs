//! `mc-price` and `hedge` commands.

use clap::Args;
use option_models::analytical::BlackScholesEngine;
use option_pricing::mc::{MonteCarloHedgeEngine, SimulationResult};
use serde::Serialize;
use tracing::info;

use super::contract::ContractArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::output::{emit, number, OutputFormat, Report};

/// Simulation controls shared by both commands.
#[derive(Args, Debug, Clone, Default)]
pub struct SimulationArgs {
    /// Number of paths (defaults to monte_carlo.n_paths)
    #[arg(long)]
    pub paths: Option<usize>,

    /// Seed overriding monte_carlo.seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Report the estimate ± 2·stderr band
    #[arg(long)]
    pub interval: bool,
}

/// Monte Carlo output next to its closed-form reference.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    /// Table title.
    #[serde(skip)]
    pub title: &'static str,
    /// Real-world drift of a hedge run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mu: Option<f64>,
    /// Rebalancing steps of a hedge run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_steps: Option<usize>,
    /// Closed-form value of the contract.
    pub black_scholes: f64,
    /// Simulation statistics.
    #[serde(flatten)]
    pub result: SimulationResult,
}

impl Report for SimulationReport {
    fn title(&self) -> &str {
        self.title
    }

    fn rows(&self) -> Vec<(String, String)> {
        let mut rows = Vec::new();
        if let Some(mu) = self.mu {
            rows.push(("mu".to_string(), number(mu)));
        }
        if let Some(steps) = self.n_steps {
            rows.push(("steps".to_string(), steps.to_string()));
        }
        rows.push(("paths".to_string(), self.result.n_paths.to_string()));
        rows.push(("seed".to_string(), self.result.seed.to_string()));
        rows.push(("estimate".to_string(), number(self.result.estimate)));
        rows.push(("std error".to_string(), number(self.result.std_error)));
        if let Some((lower, upper)) = self.result.confidence_interval {
            rows.push((
                "95% interval".to_string(),
                format!("[{}, {}]", number(lower), number(upper)),
            ));
        }
        rows.push(("black-scholes".to_string(), number(self.black_scholes)));
        rows
    }
}

fn engine(
    contract_args: &ContractArgs,
    sim: &SimulationArgs,
    config: &AppConfig,
) -> Result<(MonteCarloHedgeEngine, f64)> {
    let contract = contract_args.resolve(config)?;
    let black_scholes = BlackScholesEngine::new(&contract)?.price();
    let mc_config = config
        .monte_carlo
        .with_seed(sim.seed.or(config.monte_carlo.seed()));
    Ok((MonteCarloHedgeEngine::new(&contract, mc_config)?, black_scholes))
}

/// Estimates the price from terminal draws.
pub fn mc_price(
    contract_args: &ContractArgs,
    sim: &SimulationArgs,
    config: &AppConfig,
) -> Result<SimulationReport> {
    let (engine, black_scholes) = engine(contract_args, sim, config)?;
    let n_paths = sim.paths.unwrap_or(config.monte_carlo.n_paths());
    let result = engine.price_estimate(n_paths, sim.interval)?;
    Ok(SimulationReport {
        title: "Monte Carlo price",
        mu: None,
        n_steps: None,
        black_scholes,
        result,
    })
}

/// Simulates the delta hedge under drift `mu`.
pub fn hedge(
    contract_args: &ContractArgs,
    sim: &SimulationArgs,
    mu: f64,
    steps: Option<usize>,
    config: &AppConfig,
) -> Result<SimulationReport> {
    let (engine, black_scholes) = engine(contract_args, sim, config)?;
    let n_paths = sim.paths.unwrap_or(config.monte_carlo.n_paths());
    let n_steps = steps.unwrap_or(config.monte_carlo.n_steps());
    let result = engine.hedge_pnl(mu, n_paths, n_steps, sim.interval)?;
    Ok(SimulationReport {
        title: "Delta hedge P&L",
        mu: Some(mu),
        n_steps: Some(n_steps),
        black_scholes,
        result,
    })
}

/// Run the mc-price command
pub fn run_mc_price(
    contract_args: &ContractArgs,
    sim: &SimulationArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<()> {
    let report = mc_price(contract_args, sim, config)?;
    info!(
        estimate = report.result.estimate,
        std_error = report.result.std_error,
        "monte carlo price complete"
    );
    emit(&report, format)
}

/// Run the hedge command
pub fn run_hedge(
    contract_args: &ContractArgs,
    sim: &SimulationArgs,
    mu: f64,
    steps: Option<usize>,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<()> {
    let report = hedge(contract_args, sim, mu, steps, config)?;
    info!(
        mean = report.result.estimate,
        std_error = report.result.std_error,
        "hedge simulation complete"
    );
    emit(&report, format)
}
