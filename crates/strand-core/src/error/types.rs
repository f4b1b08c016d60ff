//! Core error types and traits

use std::time::Duration;
use thiserror::Error;

/// Result type alias for Strand operations
pub type StrandResult<T> = Result<T, StrandError>;

/// Unified error trait implemented by every Strand error.
pub trait UnifiedError: std::error::Error + Send + Sync {
    /// Get the error code for programmatic handling
    fn error_code(&self) -> &str;

    /// Get the human-readable error message
    fn message(&self) -> &str;

    /// Get optional context about the error
    fn context(&self) -> Option<&str> {
        None
    }

    /// Check if the operation that produced this error may succeed on retry
    fn is_retryable(&self) -> bool {
        false
    }
}

/// Main error type for Strand
#[derive(Error, Debug, Clone)]
pub enum StrandError {
    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// Completion source errors (transport, provider)
    #[error("LLM error: {message}")]
    Llm {
        message: String,
        provider: Option<String>,
        context: Option<String>,
    },

    /// Tool handler errors
    #[error("Tool error: {tool_name}: {message}")]
    Tool {
        tool_name: String,
        message: String,
        context: Option<String>,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
        context: Option<String>,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        context: Option<String>,
    },

    /// Invalid input errors
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        field: Option<String>,
        context: Option<String>,
    },

    /// Operation timed out
    #[error("Operation timed out after {elapsed:?}")]
    Timeout {
        elapsed: Duration,
        context: Option<String>,
    },

    /// Generic error with context
    #[error("Error: {message}")]
    Other {
        message: String,
        context: Option<String>,
    },
}
