//! UnifiedError trait implementation for StrandError

use super::types::{StrandError, UnifiedError};

impl UnifiedError for StrandError {
    fn error_code(&self) -> &str {
        match self {
            Self::Config { .. } => "STRAND_CONFIG",
            Self::Llm { .. } => "STRAND_LLM",
            Self::Tool { .. } => "STRAND_TOOL",
            Self::Io { .. } => "STRAND_IO",
            Self::Json { .. } => "STRAND_JSON",
            Self::InvalidInput { .. } => "STRAND_INVALID_INPUT",
            Self::Timeout { .. } => "STRAND_TIMEOUT",
            Self::Other { .. } => "STRAND_OTHER",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::Config { message, .. } => message,
            Self::Llm { message, .. } => message,
            Self::Tool { message, .. } => message,
            Self::Io { message, .. } => message,
            Self::Json { message, .. } => message,
            Self::InvalidInput { message, .. } => message,
            Self::Timeout { .. } => "Operation timed out",
            Self::Other { message, .. } => message,
        }
    }

    fn context(&self) -> Option<&str> {
        match self {
            Self::Config { context, .. } => context.as_deref(),
            Self::Llm { context, .. } => context.as_deref(),
            Self::Tool { context, .. } => context.as_deref(),
            Self::Io { context, .. } => context.as_deref(),
            Self::Json { context, .. } => context.as_deref(),
            Self::InvalidInput { context, .. } => context.as_deref(),
            Self::Timeout { context, .. } => context.as_deref(),
            Self::Other { context, .. } => context.as_deref(),
        }
    }

    fn is_retryable(&self) -> bool {
        matches!(self, Self::Llm { .. } | Self::Timeout { .. })
    }
}
