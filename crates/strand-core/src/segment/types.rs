//! Segment definitions

use super::Parameters;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of reserved block left open at end of stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Reasoning,
    ToolCall,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Reasoning => write!(f, "reasoning"),
            BlockKind::ToolCall => write!(f, "tool_call"),
        }
    }
}

/// One classified unit of a model response stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    /// Narrative text outside any reserved block
    Text { content: String },

    /// Content of a reasoning block
    Reasoning {
        /// Text between the markers, trimmed of surrounding whitespace
        content: String,
        /// The untrimmed block including both markers
        raw: String,
    },

    /// A closed, whitelisted tool invocation
    ToolCall {
        name: String,
        parameters: Parameters,
        /// The block from open marker to close marker inclusive
        raw: String,
        /// Malformed parameter elements that were skipped
        decode_errors: Vec<String>,
    },

    /// A block opened but never closed before end of stream
    Incomplete { raw: String, kind: BlockKind },
}

impl Segment {
    pub fn text(content: impl Into<String>) -> Self {
        Segment::Text {
            content: content.into(),
        }
    }

    /// The input bytes this segment accounts for, markers included.
    ///
    /// Concatenating `raw()` over a segment sequence reproduces the input.
    pub fn raw(&self) -> &str {
        match self {
            Segment::Text { content } => content,
            Segment::Reasoning { raw, .. } => raw,
            Segment::ToolCall { raw, .. } => raw,
            Segment::Incomplete { raw, .. } => raw,
        }
    }

    /// Short stable name of the variant, matching the serde tag
    pub fn kind_name(&self) -> &'static str {
        match self {
            Segment::Text { .. } => "text",
            Segment::Reasoning { .. } => "reasoning",
            Segment::ToolCall { .. } => "tool_call",
            Segment::Incomplete { .. } => "incomplete",
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Segment::Text { .. })
    }

    pub fn is_incomplete(&self) -> bool {
        matches!(self, Segment::Incomplete { .. })
    }

    /// Check whether a tool call carries decode errors
    pub fn has_decode_errors(&self) -> bool {
        matches!(self, Segment::ToolCall { decode_errors, .. } if !decode_errors.is_empty())
    }
}

/// Merge runs of adjacent `Text` segments into one.
///
/// The segmenter emits narrative text as soon as it is classifiable, so the
/// same input fed in different chunkings can split a text run differently.
/// Coalesced sequences are identical for every chunking.
pub fn coalesce_text(segments: Vec<Segment>) -> Vec<Segment> {
    let mut merged: Vec<Segment> = Vec::with_capacity(segments.len());
    for segment in segments {
        match (merged.last_mut(), segment) {
            (Some(Segment::Text { content: prev }), Segment::Text { content }) => {
                prev.push_str(&content);
            }
            (_, segment) => merged.push(segment),
        }
    }
    merged
}
