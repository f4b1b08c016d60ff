//! From trait implementations for StrandError conversions

use super::types::StrandError;

impl From<anyhow::Error> for StrandError {
    fn from(error: anyhow::Error) -> Self {
        Self::other(error.to_string())
    }
}

impl From<std::io::Error> for StrandError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for StrandError {
    fn from(error: serde_json::Error) -> Self {
        Self::json(error.to_string())
    }
}

impl From<toml::de::Error> for StrandError {
    fn from(error: toml::de::Error) -> Self {
        Self::config(format!("Failed to parse TOML: {}", error))
    }
}

impl From<toml::ser::Error> for StrandError {
    fn from(error: toml::ser::Error) -> Self {
        Self::config(format!("Failed to serialize TOML: {}", error))
    }
}

impl From<serde_yaml::Error> for StrandError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::config(format!("Failed to parse YAML: {}", error))
    }
}
