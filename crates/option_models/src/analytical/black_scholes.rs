//! Black-Scholes-Merton pricing engine for European options.
//!
//! This module provides the closed-form price of a European call or put on
//! an underlying paying a continuous yield `g`, together with its full set
//! of first and second order Greeks.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-gT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-gT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - g + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! ## Greek Conventions
//!
//! - Per unit: Delta, Gamma, Lambda (elasticity, not scaled), Charm, Vanna,
//!   Speed, Color, Zomma
//! - Per 1% (scaled by 1/100): Vega, Rho, Epsilon, Theta, Veta, Vomma,
//!   Vera, Ultima
//! - Theta, Charm, Veta and Color measure decay with calendar time, i.e.
//!   `-∂/∂T`

use option_core::math::distributions::{norm_cdf, norm_pdf};
use option_core::traits::PricingEngine;
use option_core::types::{
    ContractParameters, DerivedQuantities, OptionType, PricingResult, VolatilityQuote,
};

use super::greeks::Greeks;
use super::implied_vol::ImpliedVolatilitySolver;

/// Percentage-point scaling applied to the per-1% Greeks.
const PER_PERCENT: f64 = 0.01;

/// Closed-form price of a European option.
///
/// Pure function of its inputs; reused by the implied-volatility objective,
/// the jump-diffusion series and the hedge simulator.
///
/// # Arguments
/// * `option_type` - Call or put
/// * `spot` - Underlying price `S`
/// * `strike` - Strike `K`
/// * `dividend_yield` - Continuous carry yield `g`
/// * `rate` - Continuous risk-free rate `r`
/// * `volatility` - Annualised volatility `σ`
/// * `tau` - Time to maturity in years
///
/// # Examples
/// ```
/// use option_core::types::OptionType;
/// use option_models::analytical::bsm_price;
///
/// let call = bsm_price(OptionType::Call, 100.0, 100.0, 0.0, 0.05, 0.2, 1.0);
/// assert!((call - 10.450_583_572_185_565).abs() < 1e-10);
/// ```
#[inline]
pub fn bsm_price(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    dividend_yield: f64,
    rate: f64,
    volatility: f64,
    tau: f64,
) -> f64 {
    let d = DerivedQuantities::compute(spot, strike, dividend_yield, rate, volatility, tau);
    price_from(option_type, spot, strike, &d)
}

#[inline]
fn price_from(option_type: OptionType, spot: f64, strike: f64, d: &DerivedQuantities) -> f64 {
    match option_type {
        OptionType::Call => spot * d.g_disc * norm_cdf(d.d1) - strike * d.r_disc * norm_cdf(d.d2),
        OptionType::Put => strike * d.r_disc * norm_cdf(-d.d2) - spot * d.g_disc * norm_cdf(-d.d1),
    }
}

/// Black-Scholes engine bound to one contract snapshot.
///
/// Construction resolves the volatility: a contract quoted by target price
/// is run through the [`ImpliedVolatilitySolver`] first, so the engine
/// always holds a volatility and a derived snapshot computed together.
///
/// # Examples
/// ```
/// use option_core::types::{ContractParameters, OptionType};
/// use option_models::analytical::BlackScholesEngine;
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
/// let engine = BlackScholesEngine::new(&contract).unwrap();
/// assert!((engine.price() - 10.4506).abs() < 1e-4);
/// assert!((engine.delta() - 0.6368).abs() < 1e-4);
/// ```
#[derive(Debug, Clone)]
pub struct BlackScholesEngine {
    contract: ContractParameters,
    volatility: f64,
    derived: DerivedQuantities,
}

impl BlackScholesEngine {
    /// Creates an engine, implying the volatility with default solver
    /// settings when the contract is quoted by price.
    ///
    /// # Errors
    /// - `NoBracketingRoot` / `RootNotConverged` from the implied-vol solve
    pub fn new(contract: &ContractParameters) -> PricingResult<Self> {
        Self::with_solver(contract, &ImpliedVolatilitySolver::with_defaults())
    }

    /// Creates an engine, using `solver` for a price-quoted contract.
    pub fn with_solver(
        contract: &ContractParameters,
        solver: &ImpliedVolatilitySolver,
    ) -> PricingResult<Self> {
        let resolved = match contract.quote() {
            VolatilityQuote::Volatility(_) => *contract,
            VolatilityQuote::TargetPrice(_) => solver.resolve(contract)?,
        };
        let volatility = resolved.require_volatility()?;
        let derived = resolved.derived()?;
        Ok(Self {
            contract: resolved,
            volatility,
            derived,
        })
    }

    /// Contract snapshot with its resolved volatility.
    #[inline]
    pub fn contract(&self) -> &ContractParameters {
        &self.contract
    }

    /// Resolved volatility σ.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Derived snapshot (d₁, d₂, φ(d₁), discount factors).
    #[inline]
    pub fn derived(&self) -> &DerivedQuantities {
        &self.derived
    }

    /// d₁ of the current snapshot.
    #[inline]
    pub fn d1(&self) -> f64 {
        self.derived.d1
    }

    /// d₂ of the current snapshot.
    #[inline]
    pub fn d2(&self) -> f64 {
        self.derived.d2
    }

    /// φ(d₁).
    #[inline]
    pub fn pdf_norm(&self) -> f64 {
        self.derived.pdf_norm
    }

    /// e^(-rT).
    #[inline]
    pub fn r_disc(&self) -> f64 {
        self.derived.r_disc
    }

    /// e^(-gT).
    #[inline]
    pub fn g_disc(&self) -> f64 {
        self.derived.g_disc
    }

    /// Present value of the option.
    pub fn price(&self) -> f64 {
        price_from(
            self.contract.option_type(),
            self.contract.spot(),
            self.contract.strike(),
            &self.derived,
        )
    }

    #[inline]
    fn is_call(&self) -> bool {
        self.contract.option_type().is_call()
    }

    /// Cost of carry `b = r − g`.
    #[inline]
    fn carry(&self) -> f64 {
        self.contract.rate() - self.contract.dividend_yield()
    }

    /// Vega per unit of volatility, before percentage scaling.
    #[inline]
    fn raw_vega(&self) -> f64 {
        let c = &self.contract;
        c.spot() * self.derived.g_disc * self.derived.pdf_norm * c.maturity().sqrt()
    }

    // ==========================================================
    // First order
    // ==========================================================

    /// Delta (∂V/∂S).
    ///
    /// - Call: e^(-gT)·N(d₁)
    /// - Put: -e^(-gT)·N(-d₁)
    pub fn delta(&self) -> f64 {
        let d = &self.derived;
        if self.is_call() {
            d.g_disc * norm_cdf(d.d1)
        } else {
            -d.g_disc * norm_cdf(-d.d1)
        }
    }

    /// Gamma (∂²V/∂S²), identical for calls and puts.
    pub fn gamma(&self) -> f64 {
        let d = &self.derived;
        d.g_disc * d.pdf_norm / (self.contract.spot() * d.vol_sqrt_t)
    }

    /// Lambda, the price elasticity `Δ·S/V`.
    ///
    /// Reported per unit, unlike Vega or Rho: a value of 8.0 means a 1% move
    /// in spot changes the price by about 8%. Multiply by 1/100 for the
    /// fractional price change per 1% move.
    ///
    /// Not finite when the price underflows to zero.
    pub fn lambda(&self) -> f64 {
        self.delta() * self.contract.spot() / self.price()
    }

    /// Theta (−∂V/∂T), per 1%.
    pub fn theta(&self) -> f64 {
        let c = &self.contract;
        let d = &self.derived;
        let (s, k, r, g) = (c.spot(), c.strike(), c.rate(), c.dividend_yield());
        let decay = -s * d.g_disc * d.pdf_norm * self.volatility / (2.0 * c.maturity().sqrt());
        let theta = if self.is_call() {
            decay - r * k * d.r_disc * norm_cdf(d.d2) + g * s * d.g_disc * norm_cdf(d.d1)
        } else {
            decay + r * k * d.r_disc * norm_cdf(-d.d2) - g * s * d.g_disc * norm_cdf(-d.d1)
        };
        theta * PER_PERCENT
    }

    /// Vega (∂V/∂σ), per 1%.
    pub fn vega(&self) -> f64 {
        self.raw_vega() * PER_PERCENT
    }

    /// Rho (∂V/∂r), per 1%.
    pub fn rho(&self) -> f64 {
        let c = &self.contract;
        let d = &self.derived;
        let kt = c.strike() * c.maturity() * d.r_disc;
        let rho = if self.is_call() {
            kt * norm_cdf(d.d2)
        } else {
            -kt * norm_cdf(-d.d2)
        };
        rho * PER_PERCENT
    }

    /// Epsilon (∂V/∂g), per 1%.
    pub fn epsilon(&self) -> f64 {
        let c = &self.contract;
        let d = &self.derived;
        let st = c.spot() * c.maturity() * d.g_disc;
        let epsilon = if self.is_call() {
            -st * norm_cdf(d.d1)
        } else {
            st * norm_cdf(-d.d1)
        };
        epsilon * PER_PERCENT
    }

    // ==========================================================
    // Second order
    // ==========================================================

    /// Charm (−∂Δ/∂T).
    pub fn charm(&self) -> f64 {
        let c = &self.contract;
        let d = &self.derived;
        let t = c.maturity();
        let g = c.dividend_yield();
        let drift = d.g_disc * d.pdf_norm * (2.0 * self.carry() * t - d.d2 * d.vol_sqrt_t)
            / (2.0 * t * d.vol_sqrt_t);
        if self.is_call() {
            g * d.g_disc * norm_cdf(d.d1) - drift
        } else {
            -g * d.g_disc * norm_cdf(-d.d1) - drift
        }
    }

    /// Vanna (∂Δ/∂σ), identical for calls and puts.
    pub fn vanna(&self) -> f64 {
        let d = &self.derived;
        -d.g_disc * d.pdf_norm * d.d2 / self.volatility
    }

    /// Veta (−∂Vega/∂T), per 1%.
    pub fn veta(&self) -> f64 {
        let c = &self.contract;
        let d = &self.derived;
        let t = c.maturity();
        let bracket = c.dividend_yield() + self.carry() * d.d1 / d.vol_sqrt_t
            - (1.0 + d.d1 * d.d2) / (2.0 * t);
        self.raw_vega() * bracket * PER_PERCENT
    }

    /// Vomma (∂Vega/∂σ), per 1%.
    pub fn vomma(&self) -> f64 {
        let d = &self.derived;
        self.raw_vega() * d.d1 * d.d2 / self.volatility * PER_PERCENT
    }

    /// Vera (∂Rho/∂σ), per 1%, identical for calls and puts.
    pub fn vera(&self) -> f64 {
        let c = &self.contract;
        let d = &self.derived;
        -c.strike() * c.maturity() * d.r_disc * norm_pdf(d.d2) * d.d1 / self.volatility
            * PER_PERCENT
    }

    /// Speed (∂Γ/∂S).
    pub fn speed(&self) -> f64 {
        let d = &self.derived;
        -self.gamma() / self.contract.spot() * (d.d1 / d.vol_sqrt_t + 1.0)
    }

    /// Color (−∂Γ/∂T).
    pub fn color(&self) -> f64 {
        let c = &self.contract;
        let d = &self.derived;
        let t = c.maturity();
        let inner = 2.0 * c.dividend_yield() * t
            + 1.0
            + d.d1 * (2.0 * self.carry() * t - d.d2 * d.vol_sqrt_t) / d.vol_sqrt_t;
        self.gamma() / (2.0 * t) * inner
    }

    /// Zomma (∂Γ/∂σ).
    pub fn zomma(&self) -> f64 {
        let d = &self.derived;
        self.gamma() * (d.d1 * d.d2 - 1.0) / self.volatility
    }

    /// Ultima (∂Vomma/∂σ), per 1%.
    pub fn ultima(&self) -> f64 {
        let d = &self.derived;
        let d1d2 = d.d1 * d.d2;
        let sigma2 = self.volatility * self.volatility;
        -self.raw_vega() / sigma2 * (d1d2 * (1.0 - d1d2) + d.d1 * d.d1 + d.d2 * d.d2)
            * PER_PERCENT
    }

    /// Every Greek evaluated on the current snapshot.
    pub fn greeks(&self) -> Greeks {
        Greeks {
            delta: self.delta(),
            gamma: self.gamma(),
            lambda: self.lambda(),
            theta: self.theta(),
            vega: self.vega(),
            rho: self.rho(),
            epsilon: self.epsilon(),
            charm: self.charm(),
            vanna: self.vanna(),
            veta: self.veta(),
            vomma: self.vomma(),
            vera: self.vera(),
            speed: self.speed(),
            color: self.color(),
            zomma: self.zomma(),
            ultima: self.ultima(),
        }
    }
}

impl PricingEngine for BlackScholesEngine {
    fn contract(&self) -> &ContractParameters {
        &self.contract
    }

    fn price(&self) -> PricingResult<f64> {
        Ok(BlackScholesEngine::price(self))
    }
}
