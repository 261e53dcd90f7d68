//! Characteristic-function pricing.
//!
//! This module provides:
//! - [`CharacteristicFunction`]: log-price transform seam
//! - [`BlackScholesCharacteristic`]: lognormal transform
//! - [`FourierEngine`]: Gil-Pelaez inversion with adaptive quadrature

pub mod characteristic;
pub mod engine;

pub use characteristic::{BlackScholesCharacteristic, CharacteristicFunction};
pub use engine::{FourierEngine, FourierProbabilities};
