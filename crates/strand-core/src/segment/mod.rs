//! Segment types produced by the stream segmenter

mod parameters;
mod types;

pub use parameters::Parameters;
pub use types::{BlockKind, Segment, coalesce_text};
