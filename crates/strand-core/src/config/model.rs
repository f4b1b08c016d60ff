//! Top-level configuration model

use super::{LoggingConfig, ParserConfig, ProviderConfig};
use crate::error::{StrandError, StrandResult};
use serde::{Deserialize, Serialize};

/// Complete Strand configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrandConfig {
    pub parser: ParserConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderConfig>,
    pub logging: LoggingConfig,
}

impl StrandConfig {
    /// Validate every section
    pub fn validate(&self) -> StrandResult<()> {
        self.parser
            .validate()
            .map_err(|e| StrandError::config_with_context(e.to_string(), "Validating [parser]"))?;

        if let Some(provider) = &self.provider {
            if provider.provider.is_empty() || provider.model.is_empty() {
                return Err(StrandError::config_with_context(
                    "provider and model must be set",
                    "Validating [provider]",
                ));
            }
            if !(0.0..=2.0).contains(&provider.temperature) {
                return Err(StrandError::config_with_context(
                    format!("temperature {} is outside 0.0..=2.0", provider.temperature),
                    "Validating [provider]",
                ));
            }
        }

        match self.logging.format.as_str() {
            "pretty" | "compact" | "json" => Ok(()),
            other => Err(StrandError::config_with_context(
                format!("unknown log format '{}'", other),
                "Validating [logging]",
            )),
        }
    }

    /// Copy of this config safe to print
    pub fn redacted(&self) -> Self {
        Self {
            provider: self.provider.as_ref().map(ProviderConfig::redacted),
            ..self.clone()
        }
    }
}
