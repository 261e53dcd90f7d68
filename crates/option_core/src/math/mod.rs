//! Numerical kernels shared by the pricing engines.
//!
//! This module provides:
//! - `distributions`: standard normal CDF and PDF
//! - `solvers`: bracketing root finders (Brent)
//! - `quadrature`: adaptive Gauss-Kronrod integration

pub mod distributions;
pub mod quadrature;
pub mod solvers;
