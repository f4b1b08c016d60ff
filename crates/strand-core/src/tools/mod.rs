//! Tool execution boundary
//!
//! Decoded tool calls are routed by market type to a [`ToolHandler`]. The
//! executor turns every failure into a [`ToolOutcome`] so a turn never stops
//! on a bad tool call.

pub mod executor;
mod executor_tests;
pub mod handler;
pub mod types;

pub use executor::{DEFAULT_EXECUTION_TIMEOUT, ToolExecutor};
pub use handler::ToolHandler;
pub use types::{ParameterSpec, ToolCatalog, ToolOutcome, ToolSpec, ToolStatus};
