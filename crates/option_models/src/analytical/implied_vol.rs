//! Implied volatility by bracketed root finding.
//!
//! The objective `f(σ) = BSM(σ) − target` is increasing in σ, so a sign
//! change on `[lower, upper]` brackets exactly one root. A target outside
//! `[BSM(lower), BSM(upper)]` (below the discounted forward intrinsic value
//! or above the price ceiling `S·e^(-gT)` for a call, `K·e^(-rT)` for a
//! put) has no bracket and is reported as `NoBracketingRoot`.

use option_core::math::solvers::{BrentSolver, SolverConfig};
use option_core::types::{ContractParameters, OptionType, PricingError, PricingResult};
use tracing::debug;

use super::black_scholes::bsm_price;

/// Search settings for the implied-volatility solve.
///
/// # Example
///
/// ```
/// use option_models::analytical::ImpliedVolConfig;
///
/// let config = ImpliedVolConfig::default();
/// assert_eq!(config.lower_bound, 1e-9);
/// assert_eq!(config.upper_bound, 1000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ImpliedVolConfig {
    /// Lowest volatility searched; must be positive.
    pub lower_bound: f64,
    /// Highest volatility searched.
    pub upper_bound: f64,
    /// Root-finder tolerance and iteration budget.
    pub solver: SolverConfig<f64>,
}

impl Default for ImpliedVolConfig {
    fn default() -> Self {
        Self {
            lower_bound: 1e-9,
            upper_bound: 1000.0,
            solver: SolverConfig {
                tolerance: 1e-12,
                max_iterations: 200,
            },
        }
    }
}

impl ImpliedVolConfig {
    /// Checks the bracket and solver settings.
    ///
    /// # Errors
    /// `InvalidParameters` if `lower_bound ≤ 0`, `upper_bound ≤ lower_bound`,
    /// the tolerance is not positive or the iteration budget is zero.
    pub fn validate(&self) -> PricingResult<()> {
        if !(self.lower_bound.is_finite() && self.lower_bound > 0.0) {
            return Err(PricingError::invalid(format!(
                "implied-vol lower bound must be positive, got {}",
                self.lower_bound
            )));
        }
        if !(self.upper_bound.is_finite() && self.upper_bound > self.lower_bound) {
            return Err(PricingError::invalid(format!(
                "implied-vol upper bound {} must exceed lower bound {}",
                self.upper_bound, self.lower_bound
            )));
        }
        if !(self.solver.tolerance > 0.0) || self.solver.max_iterations == 0 {
            return Err(PricingError::invalid(
                "solver tolerance must be positive and max_iterations non-zero",
            ));
        }
        Ok(())
    }
}

/// Recovers σ* from an observed option price.
///
/// # Examples
/// ```
/// use option_core::types::{ContractParameters, OptionType};
/// use option_models::analytical::ImpliedVolatilitySolver;
///
/// let quoted = ContractParameters::builder()
///     .spot(100.0)
///     .strike(100.0)
///     .rate(0.05)
///     .maturity(1.0)
///     .target_price(10.450_583_572_185_565)
///     .option_type(OptionType::Call)
///     .build()
///     .unwrap();
///
/// let solver = ImpliedVolatilitySolver::with_defaults();
/// let resolved = solver.resolve(&quoted).unwrap();
/// assert!((resolved.volatility().unwrap() - 0.2).abs() < 1e-8);
/// ```
#[derive(Debug, Clone)]
pub struct ImpliedVolatilitySolver {
    config: ImpliedVolConfig,
}

impl ImpliedVolatilitySolver {
    /// Creates a solver after validating `config`.
    pub fn new(config: ImpliedVolConfig) -> PricingResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Solver over the default bracket `[1e-9, 1000]`.
    pub fn with_defaults() -> Self {
        Self {
            config: ImpliedVolConfig::default(),
        }
    }

    /// Get the solver configuration.
    pub fn config(&self) -> &ImpliedVolConfig {
        &self.config
    }

    /// Implied volatility for explicit inputs.
    ///
    /// # Errors
    /// - `InvalidParameters` for a negative or non-finite target
    /// - `NoBracketingRoot` if the target is unreachable on the bracket
    /// - `RootNotConverged` if the iteration budget runs out
    #[allow(clippy::too_many_arguments)]
    pub fn implied_volatility(
        &self,
        option_type: OptionType,
        spot: f64,
        strike: f64,
        dividend_yield: f64,
        rate: f64,
        tau: f64,
        target_price: f64,
    ) -> PricingResult<f64> {
        if !target_price.is_finite() || target_price < 0.0 {
            return Err(PricingError::invalid(format!(
                "target price must be finite and non-negative, got {}",
                target_price
            )));
        }

        let objective = |sigma: f64| {
            bsm_price(option_type, spot, strike, dividend_yield, rate, sigma, tau) - target_price
        };

        let solver = BrentSolver::new(self.config.solver);
        let sigma = solver
            .find_root(objective, self.config.lower_bound, self.config.upper_bound)
            .map_err(|err| {
                debug!(target_price, %err, "implied volatility solve failed");
                PricingError::from(err)
            })?;

        debug!(target_price, sigma, "implied volatility solved");
        Ok(sigma)
    }

    /// Implied volatility of a contract quoted by target price.
    ///
    /// # Errors
    /// `InvalidParameters` if the contract carries a volatility instead of a
    /// target price, plus every error of [`implied_volatility`](Self::implied_volatility).
    pub fn solve(&self, contract: &ContractParameters) -> PricingResult<f64> {
        let target = contract.target_price().ok_or_else(|| {
            PricingError::invalid("contract has no target price to imply volatility from")
        })?;
        self.implied_volatility(
            contract.option_type(),
            contract.spot(),
            contract.strike(),
            contract.dividend_yield(),
            contract.rate(),
            contract.maturity(),
            target,
        )
    }

    /// New contract snapshot carrying the implied volatility σ*.
    ///
    /// The input contract is left untouched; the returned snapshot derives
    /// `d1`, `d2` and `pdf_norm` from σ*.
    pub fn resolve(&self, contract: &ContractParameters) -> PricingResult<ContractParameters> {
        let sigma = self.solve(contract)?;
        contract.with_volatility(sigma)
    }
}

impl Default for ImpliedVolatilitySolver {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn quoted(option_type: OptionType, target: f64) -> ContractParameters {
        ContractParameters::builder()
            .spot(100.0)
            .strike(100.0)
            .rate(0.05)
            .maturity(1.0)
            .target_price(target)
            .option_type(option_type)
            .build()
            .unwrap()
    }

    #[test]
    fn test_recovers_reference_volatility() {
        let solver = ImpliedVolatilitySolver::with_defaults();
        let call = solver.solve(&quoted(OptionType::Call, 10.450_583_572_185_565)).unwrap();
        let put = solver.solve(&quoted(OptionType::Put, 5.573_526_022_256_971)).unwrap();
        assert_relative_eq!(call, 0.2, epsilon = 1e-9);
        assert_relative_eq!(put, 0.2, epsilon = 1e-9);
    }

    #[test]
    fn test_resolve_returns_new_snapshot() {
        let solver = ImpliedVolatilitySolver::with_defaults();
        let original = quoted(OptionType::Call, 10.450_583_572_185_565);
        let resolved = solver.resolve(&original).unwrap();
        assert_eq!(original.volatility(), None);
        assert_eq!(resolved.target_price(), None);
        let d = resolved.derived().unwrap();
        assert_relative_eq!(d.d1, 0.35, epsilon = 1e-8);
        assert_relative_eq!(d.d2, d.d1 - resolved.volatility().unwrap(), epsilon = 1e-12);
    }

    #[test]
    fn test_target_below_intrinsic_has_no_bracket() {
        // Forward intrinsic of this call is 100 - 100·e^(-0.05) ≈ 4.877.
        let solver = ImpliedVolatilitySolver::with_defaults();
        let result = solver.solve(&quoted(OptionType::Call, 1.0));
        assert_eq!(
            result,
            Err(PricingError::NoBracketingRoot {
                lower: 1e-9,
                upper: 1000.0
            })
        );
    }

    #[test]
    fn test_target_above_ceiling_has_no_bracket() {
        let solver = ImpliedVolatilitySolver::with_defaults();
        let result = solver.solve(&quoted(OptionType::Put, 99.0));
        assert!(matches!(result, Err(PricingError::NoBracketingRoot { .. })));
    }

    #[test]
    fn test_contract_with_volatility_is_rejected() {
        let c = quoted(OptionType::Call, 10.0).with_volatility(0.2).unwrap();
        let result = ImpliedVolatilitySolver::with_defaults().solve(&c);
        assert!(matches!(result, Err(PricingError::InvalidParameters(_))));
    }

    #[test]
    fn test_non_positive_lower_bound_rejected() {
        let config = ImpliedVolConfig {
            lower_bound: -1000.0,
            ..ImpliedVolConfig::default()
        };
        assert!(matches!(
            ImpliedVolatilitySolver::new(config),
            Err(PricingError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_tiny_budget_reports_non_convergence() {
        let config = ImpliedVolConfig {
            solver: SolverConfig {
                tolerance: 1e-14,
                max_iterations: 2,
            },
            ..ImpliedVolConfig::default()
        };
        let solver = ImpliedVolatilitySolver::new(config).unwrap();
        let result = solver.solve(&quoted(OptionType::Call, 10.45));
        assert_eq!(result, Err(PricingError::RootNotConverged { iterations: 2 }));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_round_trip(
            spot in 90.0f64..110.0,
            strike in 90.0f64..110.0,
            g in 0.0f64..0.05,
            r in 0.0f64..0.08,
            sigma in 0.1f64..1.0,
            t in 0.25f64..2.0,
            is_call in any::<bool>(),
        ) {
            let option_type = if is_call { OptionType::Call } else { OptionType::Put };
            let price = bsm_price(option_type, spot, strike, g, r, sigma, t);
            let solver = ImpliedVolatilitySolver::with_defaults();
            let implied = solver
                .implied_volatility(option_type, spot, strike, g, r, t, price)
                .unwrap();
            let repriced = bsm_price(option_type, spot, strike, g, r, implied, t);
            prop_assert!((repriced - price).abs() < 1e-8);
            prop_assert!((implied - sigma).abs() < 1e-6);
        }
    }
}
