//! Configuration management for Strand

mod env_loader;
mod file_loader;
mod logging_config;
mod parser_config;

pub mod model;
pub mod provider;

pub use env_loader::{ENV_API_KEY, ENV_LOG_LEVEL, ENV_TOOLS, apply_env_overrides};
pub use file_loader::{load_config, load_from_file};
pub use logging_config::LoggingConfig;
pub use model::StrandConfig;
pub use parser_config::ParserConfig;
pub use provider::{ProviderConfig, mask_api_key};
