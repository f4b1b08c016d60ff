//! Configuration management commands

use crate::console::CliConsole;
use anyhow::{Context, Result};
use std::path::Path;
use strand_core::StrandConfig;

/// Show the effective configuration as TOML, credentials masked
pub fn show(config: &StrandConfig, config_file: Option<&Path>, verbose: bool) -> Result<()> {
    let console = CliConsole::new(verbose);

    console.print_header("Configuration");
    match config_file {
        Some(path) if path.exists() => {
            console.success(&format!("Loaded configuration from: {}", path.display()))
        }
        Some(path) => {
            console.warn(&format!("Configuration file not found: {}", path.display()));
            console.info("Using default configuration");
        }
        None => console.info("No configuration file given, using defaults"),
    }

    print!("{}", render(config)?);
    Ok(())
}

fn render(config: &StrandConfig) -> Result<String> {
    toml::to_string_pretty(&config.redacted()).context("Failed to render configuration as TOML")
}
