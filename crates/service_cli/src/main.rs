//! Vanilla CLI - European option pricing from the command line
//!
//! # Commands
//!
//! - `vanilla price` - Closed-form Black-Scholes-Merton value
//! - `vanilla greeks` - Price with first and second order Greeks
//! - `vanilla implied-vol` - Volatility implied by `--target-price`
//! - `vanilla mc-price` - Monte Carlo price estimate
//! - `vanilla hedge` - Discrete delta-hedge P&L under a real-world drift
//! - `vanilla jump` - Merton jump-diffusion value
//! - `vanilla fourier` - Value by Fourier inversion
//! - `vanilla config` - Print the resolved configuration
//!
//! # Architecture
//!
//! The binary is the service layer over `option_core`, `option_models` and
//! `option_pricing`: it resolves configuration, builds a contract from the
//! command line and hands it to the selected engine.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

use commands::contract::ContractArgs;
use commands::jump::JumpArgs;
use commands::simulate::SimulationArgs;
use config::AppConfig;
use error::Result;
use output::OutputFormat;

/// Vanilla European option pricer
#[derive(Parser, Debug)]
#[command(name = "vanilla")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "vanilla.toml")]
    config: PathBuf,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Closed-form price
    Price {
        #[command(flatten)]
        contract: ContractArgs,
    },

    /// Price with the full Greek set
    Greeks {
        #[command(flatten)]
        contract: ContractArgs,
    },

    /// Implied volatility of --target-price
    ImpliedVol {
        #[command(flatten)]
        contract: ContractArgs,
    },

    /// Monte Carlo price estimate
    McPrice {
        #[command(flatten)]
        contract: ContractArgs,

        #[command(flatten)]
        simulation: SimulationArgs,
    },

    /// Delta-hedge P&L simulation
    Hedge {
        #[command(flatten)]
        contract: ContractArgs,

        #[command(flatten)]
        simulation: SimulationArgs,

        /// Real-world drift of the underlying
        #[arg(long, allow_negative_numbers = true)]
        mu: f64,

        /// Rebalancing steps (defaults to monte_carlo.n_steps)
        #[arg(long)]
        steps: Option<usize>,
    },

    /// Merton jump-diffusion price
    Jump {
        #[command(flatten)]
        contract: ContractArgs,

        #[command(flatten)]
        jump: JumpArgs,
    },

    /// Price by Fourier inversion
    Fourier {
        #[command(flatten)]
        contract: ContractArgs,
    },

    /// Print the resolved configuration
    Config,
}

fn init_tracing(verbose: bool, log_level: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli, config: &AppConfig) -> Result<()> {
    let format = cli.format;
    match cli.command {
        Commands::Price { contract } => commands::price::run_price(&contract, config, format),
        Commands::Greeks { contract } => commands::price::run_greeks(&contract, config, format),
        Commands::ImpliedVol { contract } => commands::implied_vol::run(&contract, config, format),
        Commands::McPrice {
            contract,
            simulation,
        } => commands::simulate::run_mc_price(&contract, &simulation, config, format),
        Commands::Hedge {
            contract,
            simulation,
            mu,
            steps,
        } => commands::simulate::run_hedge(&contract, &simulation, mu, steps, config, format),
        Commands::Jump { contract, jump } => commands::jump::run(&contract, &jump, config, format),
        Commands::Fourier { contract } => commands::fourier::run(&contract, config, format),
        Commands::Config => commands::show_config::run(config, format),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(cli.verbose, &config.log_level);
    info!(config = %cli.config.display(), "vanilla starting");

    match run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
