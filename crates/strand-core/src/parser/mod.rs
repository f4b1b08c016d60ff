//! Model response parsing
//!
//! - [`StreamSegmenter`]: incremental state machine over response chunks
//! - [`decode`]: tool-body argument decoder
//! - [`MarkerSet`] / [`ToolWhitelist`]: reserved markers for one stream
//! - [`segment_stream`]: async adapter for chunk streams

mod decoder;
mod markers;
mod segmenter;
mod stream;
mod utf8;

pub use decoder::decode;
pub use markers::{
    DEFAULT_REASONING_CLOSE, DEFAULT_REASONING_OPEN, MarkerSet, ToolWhitelist, is_identifier,
};
pub use segmenter::{ParseMode, StreamSegmenter};
pub use stream::{SegmentStream, segment_stream};
pub use utf8::Utf8Carry;
