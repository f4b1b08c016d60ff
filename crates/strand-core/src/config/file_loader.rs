//! File-based configuration loading

use super::env_loader::apply_env_overrides;
use super::model::StrandConfig;
use crate::error::{StrandError, StrandResult};
use std::fs;
use std::path::Path;

/// Load configuration from a file
///
/// Supports JSON, TOML, and YAML formats based on file extension.
/// Returns default config if file doesn't exist.
pub fn load_from_file(path: &Path) -> StrandResult<StrandConfig> {
    if !path.exists() {
        tracing::debug!("Config file '{}' not found, using defaults", path.display());
        return Ok(StrandConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        StrandError::io_with_path(
            format!("Failed to read config file: {}", e),
            path.display().to_string(),
        )
        .with_context("Reading configuration")
    })?;

    let config: StrandConfig = match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|e| {
            StrandError::config_with_context(
                format!("Failed to parse TOML config: {}", e),
                format!("Deserializing TOML configuration from '{}'", path.display()),
            )
        })?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| {
            StrandError::config_with_context(
                format!("Failed to parse YAML config: {}", e),
                format!("Deserializing YAML configuration from '{}'", path.display()),
            )
        })?,
        _ => serde_json::from_str(&content).map_err(|e| {
            StrandError::config_with_context(
                format!("Failed to parse JSON config: {}", e),
                format!("Deserializing JSON configuration from '{}'", path.display()),
            )
        })?,
    };

    Ok(config)
}

/// Load the effective configuration: file (if any), then environment
/// overrides, then validation
pub fn load_config(path: Option<&Path>) -> StrandResult<StrandConfig> {
    let mut config = match path {
        Some(path) => load_from_file(path)?,
        None => StrandConfig::default(),
    };
    apply_env_overrides(&mut config)?;
    config.validate()?;
    Ok(config)
}
