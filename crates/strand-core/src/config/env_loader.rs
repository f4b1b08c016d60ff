//! Environment variable overrides

use super::model::StrandConfig;
use crate::error::{StrandError, StrandResult};
use std::env;

/// Replaces the tool whitelist with a comma-separated list
pub const ENV_TOOLS: &str = "STRAND_TOOLS";
/// Overrides the log level
pub const ENV_LOG_LEVEL: &str = "STRAND_LOG_LEVEL";
/// Fills a provider credential missing from the config file
pub const ENV_API_KEY: &str = "STRAND_API_KEY";

/// Apply `STRAND_*` environment variables on top of a loaded config
pub fn apply_env_overrides(config: &mut StrandConfig) -> StrandResult<()> {
    apply_overrides_from(config, |key| env::var(key).ok())
}

/// Apply overrides read through `lookup`
pub(crate) fn apply_overrides_from<F>(config: &mut StrandConfig, lookup: F) -> StrandResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(tools) = lookup(ENV_TOOLS) {
        let names: Vec<String> = tools
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        if let Some(bad) = names.iter().find(|name| !crate::parser::is_identifier(name)) {
            return Err(StrandError::config_with_context(
                format!("Invalid tool name '{}'", bad),
                format!("Parsing {}", ENV_TOOLS),
            ));
        }
        tracing::debug!("{} overrides tool whitelist with {} name(s)", ENV_TOOLS, names.len());
        config.parser.tools = names;
    }

    if let Some(level) = lookup(ENV_LOG_LEVEL) {
        if !level.trim().is_empty() {
            config.logging.level = level.trim().to_lowercase();
        }
    }

    if let Some(api_key) = lookup(ENV_API_KEY) {
        match config.provider.as_mut() {
            Some(provider) if provider.api_key.is_none() => provider.api_key = Some(api_key),
            Some(_) => {}
            None => tracing::debug!("{} set but no provider is configured", ENV_API_KEY),
        }
    }

    Ok(())
}
