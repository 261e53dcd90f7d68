//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: The error taxonomy surfaced by every pricing engine
//! - `SolverError`: Errors from root-finding solvers
//! - `QuadratureError`: Errors from numerical integration
//!
//! Kernel errors (`SolverError`, `QuadratureError`) convert into
//! `PricingError` through `From`, so engines can propagate them with `?`.

use thiserror::Error;

/// Convenience alias for results returned by pricing operations.
pub type PricingResult<T> = Result<T, PricingError>;

/// Categorised pricing errors.
///
/// Every failure is surfaced to the caller immediately; no engine
/// substitutes a default or clamps an invalid input.
///
/// # Variants
/// - `InvalidOptionType`: An option-type discriminator could not be parsed
/// - `NoBracketingRoot`: Implied-volatility bracket holds no sign change
/// - `RootNotConverged`: Root finder exhausted its iteration budget
/// - `NonConvergentQuadrature`: Fourier integration missed its tolerance
/// - `SeriesNotConverged`: Jump series exhausted its term budget
/// - `InvalidParameters`: Contract or simulation inputs out of domain
///
/// # Examples
/// ```
/// use option_core::types::PricingError;
///
/// let err = PricingError::InvalidParameters("spot must be positive".to_string());
/// assert_eq!(format!("{}", err), "Invalid parameters: spot must be positive");
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PricingError {
    /// Option-type discriminator is neither call nor put.
    #[error("Invalid option type: '{0}' (expected call, put, 1 or -1)")]
    InvalidOptionType(String),

    /// The target price is outside the value range reachable on the bracket.
    #[error("No bracketing root: objective has the same sign at {lower} and {upper}")]
    NoBracketingRoot {
        /// Lower end of the search bracket
        lower: f64,
        /// Upper end of the search bracket
        upper: f64,
    },

    /// Root finder did not converge within its iteration budget.
    #[error("Root finder did not converge after {iterations} iterations")]
    RootNotConverged {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// Numerical integration failed to reach the requested precision.
    #[error("Non-convergent quadrature: {0}")]
    NonConvergentQuadrature(String),

    /// Series summation did not fall below its tolerance within the term budget.
    #[error("Series did not converge after {terms} terms (last term {last_term:e})")]
    SeriesNotConverged {
        /// Number of terms evaluated
        terms: usize,
        /// Magnitude of the last evaluated term
        last_term: f64,
    },

    /// Invalid contract, model or simulation parameters.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
}

impl PricingError {
    /// Shorthand for an `InvalidParameters` error.
    pub fn invalid(message: impl Into<String>) -> Self {
        PricingError::InvalidParameters(message.into())
    }
}

/// Root-finding solver errors.
///
/// # Examples
/// ```
/// use option_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// No valid bracket (function values at endpoints have same sign).
    #[error("No bracket: f({a}) and f({b}) have same sign")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },

    /// Objective returned a non-finite value.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

/// Numerical integration errors.
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuadratureError {
    /// Error estimate still above tolerance when the subdivision budget ran out.
    #[error("tolerance not reached after {subdivisions} subdivisions (error estimate {error_estimate:e})")]
    SubdivisionLimit {
        /// Number of subdivisions performed
        subdivisions: usize,
        /// Remaining absolute error estimate
        error_estimate: f64,
    },

    /// Integrand produced NaN or infinity.
    #[error("integrand is not finite at x = {x}")]
    NonFiniteIntegrand {
        /// Abscissa where the integrand failed
        x: f64,
    },
}

impl From<SolverError> for PricingError {
    fn from(err: SolverError) -> Self {
        match err {
            SolverError::NoBracket { a, b } => PricingError::NoBracketingRoot {
                lower: a.min(b),
                upper: a.max(b),
            },
            SolverError::MaxIterationsExceeded { iterations } => {
                PricingError::RootNotConverged { iterations }
            }
            SolverError::NumericalInstability(msg) => PricingError::InvalidParameters(msg),
        }
    }
}

impl From<QuadratureError> for PricingError {
    fn from(err: QuadratureError) -> Self {
        PricingError::NonConvergentQuadrature(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameters_display() {
        let err = PricingError::invalid("strike must be positive");
        assert_eq!(format!("{}", err), "Invalid parameters: strike must be positive");
    }

    #[test]
    fn test_invalid_option_type_display() {
        let err = PricingError::InvalidOptionType("straddle".to_string());
        assert!(format!("{}", err).contains("'straddle'"));
    }

    #[test]
    fn test_series_not_converged_display() {
        let err = PricingError::SeriesNotConverged {
            terms: 1000,
            last_term: 0.5,
        };
        assert!(format!("{}", err).contains("1000 terms"));
    }

    #[test]
    fn test_no_bracket_to_pricing_error_orders_bounds() {
        let err: PricingError = SolverError::NoBracket { a: 5.0, b: 1.0 }.into();
        assert_eq!(
            err,
            PricingError::NoBracketingRoot {
                lower: 1.0,
                upper: 5.0
            }
        );
    }

    #[test]
    fn test_max_iterations_to_pricing_error() {
        let err: PricingError = SolverError::MaxIterationsExceeded { iterations: 42 }.into();
        assert_eq!(err, PricingError::RootNotConverged { iterations: 42 });
    }

    #[test]
    fn test_quadrature_error_to_pricing_error() {
        let err: PricingError = QuadratureError::SubdivisionLimit {
            subdivisions: 200,
            error_estimate: 1e-3,
        }
        .into();
        match err {
            PricingError::NonConvergentQuadrature(msg) => assert!(msg.contains("200")),
            other => panic!("Expected NonConvergentQuadrature, got {:?}", other),
        }
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = PricingError::invalid("x");
        let _: &dyn std::error::Error = &err;
    }
}
