//! Completion provider configuration

use serde::{Deserialize, Serialize};
use std::fmt;

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1024
}

/// Settings for the model provider a completion source talks to
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider name (openai, anthropic, ...)
    pub provider: String,
    /// Model identifier
    pub model: String,
    /// Credential; never logged or printed unmasked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Endpoint override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl ProviderConfig {
    pub fn new(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            api_key: None,
            base_url: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Display-safe form of the credential
    pub fn masked_api_key(&self) -> Option<String> {
        self.api_key.as_deref().map(mask_api_key)
    }

    /// Copy of this config with the credential masked
    pub fn redacted(&self) -> Self {
        Self {
            api_key: self.masked_api_key(),
            ..self.clone()
        }
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_key", &self.masked_api_key())
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

/// Mask an API key for safe display
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let len = chars.len();
    if len <= 12 {
        return "*".repeat(len);
    }

    let prefix: String = chars[..8].iter().collect();
    let suffix: String = chars[len - 4..].iter().collect();
    let mask_len = len - 12;

    format!("{}{}...{}", prefix, "*".repeat(mask_len.min(8)), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_api_key() {
        assert_eq!(mask_api_key("short"), "*****");
        assert_eq!(mask_api_key("sk-abcdefgh12345678"), "sk-abcde*******...5678");
        assert!(!mask_api_key("sk-abcdefghijklmnopqrstuvwxyz").contains("mnop"));
    }

    #[test]
    fn test_debug_never_shows_key() {
        let config = ProviderConfig::new("openai", "gpt-4").with_api_key("sk-secret-value-12345");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk-secret-value-12345"));
        assert!(debug.contains("gpt-4"));
    }

    #[test]
    fn test_provider_defaults_from_toml() {
        let config: ProviderConfig = toml::from_str(
            r#"
provider = "openai"
model = "gpt-4"
"#,
        )
        .unwrap();
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.max_tokens, 1024);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_redacted() {
        let config = ProviderConfig::new("anthropic", "claude").with_api_key("0123456789abcdef");
        let redacted = config.redacted();
        assert_eq!(redacted.api_key.as_deref(), Some("01234567****...cdef"));
        assert_eq!(redacted.model, "claude");
    }
}
