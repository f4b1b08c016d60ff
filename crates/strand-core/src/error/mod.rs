//! Error types for Strand
//!
//! Every fallible operation outside the segmenter returns [`StrandResult`].
//! The segmenter itself never fails: malformed markup is reported as data on
//! the emitted segments instead.
//!
//! All errors implement [`UnifiedError`], which exposes:
//! - error_code: a stable identifier for programmatic handling
//! - message: human-readable error message
//! - context: optional note about where the error occurred

mod constructors;
mod conversions;
mod types;
mod unified_error;

pub use types::{StrandError, StrandResult, UnifiedError};
