//! Strand Core Library
//!
//! Incremental segmentation of streamed model output. A response arrives as
//! arbitrarily chunked text; the [`StreamSegmenter`] splits it into narrative
//! text, reasoning blocks, and tool calls without ever re-reading emitted
//! input, and decodes each closed tool block into [`Parameters`].
//!
//! Around the segmenter sit the pieces an agent needs for one turn: a
//! [`CompletionSource`] boundary for model transports, a [`ToolExecutor`]
//! routing tool calls to market handlers, and the [`TurnRunner`] tying them
//! together.

pub mod agent;
pub mod config;
pub mod error;
pub mod llm;
pub mod parser;
pub mod segment;
pub mod tools;

// Re-export commonly used types
pub use agent::{ToolInvocation, TurnOutcome, TurnRunner};
pub use config::{LoggingConfig, ParserConfig, ProviderConfig, StrandConfig};
pub use error::{StrandError, StrandResult, UnifiedError};
pub use llm::{ChunkStream, CompletionSource, LlmMessage, MessageRole, ReplaySource};
pub use parser::{MarkerSet, ParseMode, StreamSegmenter, ToolWhitelist, decode, segment_stream};
pub use segment::{BlockKind, Parameters, Segment, coalesce_text};
pub use tools::{ToolCatalog, ToolExecutor, ToolHandler, ToolOutcome, ToolSpec, ToolStatus};
