//! `config` command.

use crate::config::AppConfig;
use crate::error::Result;
use crate::output::OutputFormat;

/// Run the config command: print the resolved configuration.
pub fn run(config: &AppConfig, format: OutputFormat) -> Result<()> {
    let text = match format {
        OutputFormat::Table => config.to_toml()?,
        OutputFormat::Json => serde_json::to_string_pretty(config)?,
    };
    println!("{}", text);
    Ok(())
}
