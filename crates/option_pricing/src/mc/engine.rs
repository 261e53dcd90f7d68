//! Monte Carlo price estimator and delta-hedge simulator.
//!
//! ## Price estimate
//!
//! S_T = S₀·exp((r − g − σ²/2)T + σ√T·Z), value = e^(−rT)·max(±(S_T − K), 0)
//!
//! ## Hedge P&L
//!
//! The hedger sells the option for its Black-Scholes value and holds the
//! replicating portfolio: `e^(−gτ)·a` shares (dividends reinvested) and a
//! bond position of `−K·e^(−rτ)·b`, where `(a, b) = (Φ(d₁), Φ(d₂))` for a
//! call and `(−Φ(−d₁), −Φ(−d₂))` for a put, evaluated on the remaining time
//! τ. The underlying follows the real-world drift μ:
//!
//! ln S_{j} = ln S_{j−1} + (μ − g − σ²/2)·dt + σ√dt·Z_j
//!
//! At each interior rebalance t_j the surplus of the old holdings over the
//! new ones is carried to maturity at the risk-free rate:
//!
//! P&L_j = [S_j·e^(−gτ_j)·(a_{j−1} − a_j) − K·e^(−rτ_j)·(b_{j−1} − b_j)]·e^(rτ_j)
//!
//! At T the last holdings close out against the realised payoff:
//!
//! P&L_m = S_T·a_{m−1} − K·b_{m−1} − payoff(S_T)
//!
//! The portfolio starts at the option value, so with μ = r every step has
//! zero expected P&L and the mean reflects sampling noise only. The spread
//! shrinks as the grid is refined.

use option_core::math::distributions::norm_cdf;
use option_core::types::{d1_d2, ContractParameters, OptionType, PricingResult};
use rayon::prelude::*;
use tracing::debug;

use super::config::{validate_paths, validate_steps, MonteCarloConfig};
use super::error::ConfigError;
use super::result::{RunningStats, SimulationResult};
use crate::rng::{fresh_seed, PricerRng};

/// Number of paths simulated from one generator stream.
pub const CHUNK_SIZE: usize = 8192;

/// Quantities of one rebalancing date, shared by every path.
#[derive(Clone, Copy, Debug)]
struct RebalanceDate {
    tau: f64,
    g_disc: f64,
    r_disc: f64,
    r_grow: f64,
}

/// Monte Carlo engine bound to one contract.
///
/// # Examples
///
/// ```rust
/// use option_core::types::{ContractParameters, OptionType};
/// use option_pricing::mc::{MonteCarloConfig, MonteCarloHedgeEngine};
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
///
/// let config = MonteCarloConfig::builder().seed(7).build().unwrap();
/// let engine = MonteCarloHedgeEngine::new(&contract, config).unwrap();
///
/// let hedge = engine.hedge_pnl(0.05, 5_000, 50, false).unwrap();
/// assert!(hedge.estimate.abs() < 4.0 * hedge.std_error + 1e-12);
/// ```
#[derive(Clone, Debug)]
pub struct MonteCarloHedgeEngine {
    contract: ContractParameters,
    volatility: f64,
    config: MonteCarloConfig,
}

impl MonteCarloHedgeEngine {
    /// Creates an engine.
    ///
    /// # Errors
    /// `InvalidParameters` if the contract carries no volatility or the
    /// configuration is out of range.
    pub fn new(contract: &ContractParameters, config: MonteCarloConfig) -> PricingResult<Self> {
        config.validate()?;
        let volatility = contract.require_volatility()?;
        Ok(Self {
            contract: *contract,
            volatility,
            config,
        })
    }

    /// Creates an engine with the default configuration (unseeded).
    pub fn with_defaults(contract: &ContractParameters) -> PricingResult<Self> {
        Self::new(contract, MonteCarloConfig::default())
    }

    /// Contract being simulated.
    pub fn contract(&self) -> &ContractParameters {
        &self.contract
    }

    /// Volatility driving the simulation.
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Get the simulation configuration.
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Estimates the option value from `n_paths` terminal draws under the
    /// risk-neutral drift.
    ///
    /// # Errors
    /// `InvalidParameters` if `n_paths` is zero.
    pub fn price_estimate(
        &self,
        n_paths: usize,
        report_interval: bool,
    ) -> PricingResult<SimulationResult> {
        validate_paths(n_paths)?;

        let c = &self.contract;
        let sigma = self.volatility;
        let t = c.maturity();
        let drift = (c.rate() - c.dividend_yield() - 0.5 * sigma * sigma) * t;
        let diffusion = sigma * t.sqrt();
        let discount = c.r_disc();
        let (spot, strike, option_type) = (c.spot(), c.strike(), c.option_type());

        let (stats, seed) = self.simulate(n_paths, 1, |z| {
            let terminal = spot * (drift + diffusion * z[0]).exp();
            discount * option_type.payoff(terminal, strike)
        });

        let result = SimulationResult::from_stats(&stats, seed, report_interval);
        debug!(
            n_paths,
            seed,
            estimate = result.estimate,
            std_error = result.std_error,
            "monte carlo price estimate"
        );
        Ok(result)
    }

    /// Estimates the P&L of the discretely rebalanced delta hedge.
    ///
    /// `mu` is the real-world drift of the underlying (total return), `n_steps`
    /// the number of equal steps between inception and maturity.
    ///
    /// # Errors
    /// `InvalidParameters` if `mu` is not finite, `n_paths` is zero or
    /// `n_steps` is below 2.
    pub fn hedge_pnl(
        &self,
        mu: f64,
        n_paths: usize,
        n_steps: usize,
        report_interval: bool,
    ) -> PricingResult<SimulationResult> {
        if !mu.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "mu",
                value: format!("drift must be finite, got {}", mu),
            }
            .into());
        }
        validate_paths(n_paths)?;
        validate_steps(n_steps)?;

        let c = &self.contract;
        let sigma = self.volatility;
        let (spot, strike, g, r) = (c.spot(), c.strike(), c.dividend_yield(), c.rate());
        let option_type = c.option_type();
        let t = c.maturity();
        let dt = t / n_steps as f64;
        let drift = (mu - g - 0.5 * sigma * sigma) * dt;
        let diffusion = sigma * dt.sqrt();

        let dates: Vec<RebalanceDate> = (0..n_steps)
            .map(|j| {
                let tau = t - j as f64 * dt;
                RebalanceDate {
                    tau,
                    g_disc: (-g * tau).exp(),
                    r_disc: (-r * tau).exp(),
                    r_grow: (r * tau).exp(),
                }
            })
            .collect();

        let holdings = |s: f64, tau: f64| -> (f64, f64) {
            let (d1, d2) = d1_d2(s, strike, g, r, sigma, tau);
            match option_type {
                OptionType::Call => (norm_cdf(d1), norm_cdf(d2)),
                OptionType::Put => (-norm_cdf(-d1), -norm_cdf(-d2)),
            }
        };

        let (stats, seed) = self.simulate(n_paths, n_steps, |z| {
            let mut log_spot = spot.ln();
            let (mut a_prev, mut b_prev) = holdings(spot, dates[0].tau);
            let mut pnl = 0.0;

            for (date, dz) in dates[1..].iter().zip(z) {
                log_spot += drift + diffusion * dz;
                let s = log_spot.exp();
                let (a, b) = holdings(s, date.tau);
                let surplus =
                    s * date.g_disc * (a_prev - a) - strike * date.r_disc * (b_prev - b);
                pnl += surplus * date.r_grow;
                a_prev = a;
                b_prev = b;
            }

            log_spot += drift + diffusion * z[n_steps - 1];
            let terminal = log_spot.exp();
            pnl + terminal * a_prev - strike * b_prev - option_type.payoff(terminal, strike)
        });

        let result = SimulationResult::from_stats(&stats, seed, report_interval);
        debug!(
            mu,
            n_paths,
            n_steps,
            seed,
            mean = result.estimate,
            std_error = result.std_error,
            "delta hedge simulation"
        );
        Ok(result)
    }

    /// Runs `sample` once per path on `draws_per_path` fresh normals and
    /// reduces the chunk statistics in chunk order.
    fn simulate<F>(
        &self,
        n_paths: usize,
        draws_per_path: usize,
        sample: F,
    ) -> (RunningStats, u64)
    where
        F: Fn(&[f64]) -> f64 + Sync,
    {
        let seed = self.config.seed().unwrap_or_else(fresh_seed);
        let n_chunks = n_paths.div_ceil(CHUNK_SIZE);

        let run_chunk = |index: usize| -> RunningStats {
            let start = index * CHUNK_SIZE;
            let len = CHUNK_SIZE.min(n_paths - start);
            let mut rng = PricerRng::for_chunk(seed, index as u64);
            let mut normals = vec![0.0; draws_per_path];
            (0..len)
                .map(|_| {
                    rng.fill_normal(&mut normals);
                    sample(&normals)
                })
                .collect()
        };

        let chunks: Vec<RunningStats> = if self.config.parallel() && n_chunks > 1 {
            (0..n_chunks).into_par_iter().map(run_chunk).collect()
        } else {
            (0..n_chunks).map(run_chunk).collect()
        };

        let stats = chunks
            .into_iter()
            .fold(RunningStats::new(), RunningStats::merge);
        (stats, seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use option_core::types::PricingError;

    fn contract(option_type: OptionType) -> ContractParameters {
        ContractParameters::builder()
            .spot(100.0)
            .strike(100.0)
            .rate(0.05)
            .maturity(1.0)
            .volatility(0.2)
            .option_type(option_type)
            .build()
            .unwrap()
    }

    fn engine(option_type: OptionType, seed: u64, parallel: bool) -> MonteCarloHedgeEngine {
        let config = MonteCarloConfig::builder()
            .seed(seed)
            .parallel(parallel)
            .build()
            .unwrap();
        MonteCarloHedgeEngine::new(&contract(option_type), config).unwrap()
    }

    // ================================================================
    // Construction
    // ================================================================

    #[test]
    fn test_price_quoted_contract_rejected() {
        let quoted = contract(OptionType::Call).with_target_price(10.0).unwrap();
        let result = MonteCarloHedgeEngine::with_defaults(&quoted);
        assert!(matches!(result, Err(PricingError::InvalidParameters(_))));
    }

    #[test]
    fn test_accessors() {
        let e = engine(OptionType::Call, 1, true);
        assert_eq!(e.volatility(), 0.2);
        assert_eq!(e.config().seed(), Some(1));
        assert_eq!(e.contract().strike(), 100.0);
    }

    // ================================================================
    // Price estimate
    // ================================================================

    #[test]
    fn test_price_estimate_near_closed_form() {
        let result = engine(OptionType::Call, 42, true)
            .price_estimate(200_000, true)
            .unwrap();
        let closed = 10.450_583_572_185_565;
        assert!((result.estimate - closed).abs() < 4.0 * result.std_error);
        assert_eq!(result.n_paths, 200_000);
        assert_eq!(result.seed, 42);
    }

    #[test]
    fn test_put_estimate_near_closed_form() {
        let result = engine(OptionType::Put, 11, true)
            .price_estimate(200_000, false)
            .unwrap();
        let closed = 5.573_526_022_256_971;
        assert!((result.estimate - closed).abs() < 4.0 * result.std_error);
        assert_eq!(result.confidence_interval, None);
    }

    #[test]
    fn test_parallel_matches_sequential_bitwise() {
        // Not a multiple of the chunk size, so the tail chunk is exercised.
        let n = 3 * CHUNK_SIZE + 17;
        let par = engine(OptionType::Call, 2024, true).price_estimate(n, true).unwrap();
        let seq = engine(OptionType::Call, 2024, false).price_estimate(n, true).unwrap();
        assert_eq!(par.estimate.to_bits(), seq.estimate.to_bits());
        assert_eq!(par.std_error.to_bits(), seq.std_error.to_bits());

        let par = engine(OptionType::Put, 5, true).hedge_pnl(0.1, n, 8, false).unwrap();
        let seq = engine(OptionType::Put, 5, false).hedge_pnl(0.1, n, 8, false).unwrap();
        assert_eq!(par.estimate.to_bits(), seq.estimate.to_bits());
    }

    #[test]
    fn test_seed_reproducibility() {
        let a = engine(OptionType::Call, 9, true).price_estimate(10_000, false).unwrap();
        let b = engine(OptionType::Call, 9, true).price_estimate(10_000, false).unwrap();
        let c = engine(OptionType::Call, 10, true).price_estimate(10_000, false).unwrap();
        assert_eq!(a, b);
        assert_ne!(a.estimate, c.estimate);
    }

    #[test]
    fn test_unseeded_run_reports_reproducing_seed() {
        let unseeded = MonteCarloHedgeEngine::with_defaults(&contract(OptionType::Call)).unwrap();
        let first = unseeded.price_estimate(5_000, false).unwrap();
        let replay = engine(OptionType::Call, first.seed, true)
            .price_estimate(5_000, false)
            .unwrap();
        assert_eq!(first.estimate.to_bits(), replay.estimate.to_bits());
    }

    #[test]
    fn test_single_path() {
        let result = engine(OptionType::Call, 3, true).price_estimate(1, true).unwrap();
        assert_eq!(result.n_paths, 1);
        assert_eq!(result.std_error, 0.0);
        assert!(result.estimate >= 0.0);
    }

    #[test]
    fn test_single_path_replays_chunk_stream() {
        let result = engine(OptionType::Call, 3, false).price_estimate(1, false).unwrap();
        let z = PricerRng::for_chunk(3, 0).gen_normal();
        let terminal = 100.0 * (0.03 + 0.2 * z).exp();
        let expected = (-0.05_f64).exp() * (terminal - 100.0).max(0.0);
        approx::assert_relative_eq!(result.estimate, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_invalid_path_counts_rejected() {
        let e = engine(OptionType::Call, 1, true);
        assert!(matches!(
            e.price_estimate(0, false),
            Err(PricingError::InvalidParameters(_))
        ));
        assert!(matches!(
            e.hedge_pnl(0.05, 0, 10, false),
            Err(PricingError::InvalidParameters(_))
        ));
    }

    // ================================================================
    // Hedge P&L
    // ================================================================

    #[test]
    fn test_hedge_mean_vanishes_under_risk_neutral_drift() {
        for option_type in [OptionType::Call, OptionType::Put] {
            let result = engine(option_type, 77, true)
                .hedge_pnl(0.05, 10_000, 100, true)
                .unwrap();
            assert!(
                result.estimate.abs() < 4.0 * result.std_error,
                "{:?}: mean {} stderr {}",
                option_type,
                result.estimate,
                result.std_error
            );
        }
    }

    #[test]
    fn test_hedge_error_shrinks_with_rebalancing() {
        let e = engine(OptionType::Call, 123, true);
        let coarse = e.hedge_pnl(0.05, 5_000, 10, false).unwrap();
        let fine = e.hedge_pnl(0.05, 5_000, 200, false).unwrap();
        assert!(fine.std_error < 0.5 * coarse.std_error);
    }

    #[test]
    fn test_hedge_rejects_single_step_and_bad_drift() {
        let e = engine(OptionType::Call, 1, true);
        assert!(matches!(
            e.hedge_pnl(0.05, 100, 1, false),
            Err(PricingError::InvalidParameters(_))
        ));
        assert!(matches!(
            e.hedge_pnl(f64::NAN, 100, 10, false),
            Err(PricingError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_hedge_accepts_fine_rebalancing_grid() {
        let result = engine(OptionType::Put, 4, false)
            .hedge_pnl(0.05, 3, 20_000, false)
            .unwrap();
        assert_eq!(result.n_paths, 3);
        assert!(result.estimate.is_finite());
        assert!(result.estimate.abs() < 1.0);
    }

    #[test]
    fn test_zero_volatility_limit_hedge_is_nearly_exact() {
        // Tiny σ: the option is a forward in disguise and the hedge replicates it.
        let c = contract(OptionType::Call).with_volatility(1e-4).unwrap();
        let config = MonteCarloConfig::builder().seed(8).build().unwrap();
        let e = MonteCarloHedgeEngine::new(&c, config).unwrap();
        let result = e.hedge_pnl(0.2, 2_000, 20, false).unwrap();
        assert!(result.estimate.abs() < 1e-3);
    }
}
