//! Completion source boundary
//!
//! Transport and provider protocols live behind [`CompletionSource`]; the
//! rest of the crate only consumes the text chunks it yields.

pub mod messages;
pub mod replay;
pub mod streaming;

pub use messages::{LlmMessage, MessageRole};
pub use replay::ReplaySource;
pub use streaming::{ChunkStream, CompletionSource};
