//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod contract;
pub mod fourier;
pub mod implied_vol;
pub mod jump;
pub mod price;
pub mod show_config;
pub mod simulate;
