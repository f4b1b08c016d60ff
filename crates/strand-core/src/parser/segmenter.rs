//! Incremental stream segmenter
//!
//! Consumes a model response as an arbitrarily chunked text stream and emits
//! [`Segment`]s in input order. Undecided input (a possible partial open
//! marker, or an unterminated block) is buffered until later input resolves
//! it or [`StreamSegmenter::finish`] forces a final answer.
//!
//! The segmenter is synchronous and single-owner. Feed chunks in order from
//! one place; asynchronous transports go through
//! [`segment_stream`](super::segment_stream).

use super::decoder::decode;
use super::markers::{MarkerMatch, MarkerSet};
use super::utf8::Utf8Carry;
use crate::config::ParserConfig;
use crate::error::StrandResult;
use crate::segment::{BlockKind, Segment};

/// Where the segmenter currently is in the response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseMode {
    /// Outside any block, looking for an open marker
    Scanning,
    /// Inside a reasoning block, looking for its close marker
    InReasoning,
    /// Inside a tool block, looking for `</name>`
    InToolCall { name: String },
}

/// Segmenter state for a single model response stream
#[derive(Debug)]
pub struct StreamSegmenter {
    markers: MarkerSet,
    mode: ParseMode,
    /// Unclassified text while scanning. Only a partial open marker can
    /// remain here between calls.
    buffer: String,
    /// Raw text of the open block, starting at its open marker
    block: String,
    /// Byte length of the open marker at the start of `block`
    open_len: usize,
    /// Offset in `block` where the close-marker search resumes
    close_search_from: usize,
    utf8: Utf8Carry,
}

impl StreamSegmenter {
    /// Create a segmenter for one stream
    pub fn new(markers: MarkerSet) -> Self {
        Self {
            markers,
            mode: ParseMode::Scanning,
            buffer: String::new(),
            block: String::new(),
            open_len: 0,
            close_search_from: 0,
            utf8: Utf8Carry::new(),
        }
    }

    /// Create a segmenter from parser configuration
    pub fn from_config(config: &ParserConfig) -> StrandResult<Self> {
        Ok(Self::new(config.marker_set()?))
    }

    /// Segment a complete response in one call
    pub fn parse(markers: MarkerSet, text: &str) -> Vec<Segment> {
        let mut segmenter = Self::new(markers);
        let mut segments = segmenter.feed(text);
        segments.extend(segmenter.finish());
        segments
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    pub fn mode(&self) -> &ParseMode {
        &self.mode
    }

    /// Text received but not yet emitted
    pub fn pending(&self) -> &str {
        match self.mode {
            ParseMode::Scanning => &self.buffer,
            _ => &self.block,
        }
    }

    /// Check if there is any undecided input, including carried bytes
    pub fn has_pending(&self) -> bool {
        !self.pending().is_empty() || self.utf8.has_pending()
    }

    /// Consume one chunk and return every segment it completes
    pub fn feed(&mut self, chunk: &str) -> Vec<Segment> {
        let mut out = Vec::new();
        if let Some(dangling) = self.utf8.flush() {
            self.push(&dangling, &mut out);
        }
        self.push(chunk, &mut out);
        out
    }

    /// Consume a chunk of raw bytes.
    ///
    /// A multi-byte character split across calls is held back until it is
    /// complete.
    pub fn feed_bytes(&mut self, chunk: &[u8]) -> Vec<Segment> {
        let mut out = Vec::new();
        let text = self.utf8.decode(chunk);
        self.push(&text, &mut out);
        out
    }

    /// End the stream and resolve everything still buffered.
    ///
    /// Text left while scanning (including a partial marker that never
    /// completed) becomes a final `Text`. An unterminated block becomes a
    /// single `Incomplete` segment.
    pub fn finish(mut self) -> Vec<Segment> {
        let mut out = Vec::new();
        if let Some(dangling) = self.utf8.flush() {
            self.push(&dangling, &mut out);
        }

        match self.mode {
            ParseMode::Scanning => {
                if !self.buffer.is_empty() {
                    out.push(Segment::Text {
                        content: self.buffer,
                    });
                }
            }
            ParseMode::InReasoning => {
                tracing::warn!(
                    "Stream ended inside a reasoning block ({} bytes)",
                    self.block.len()
                );
                out.push(Segment::Incomplete {
                    raw: self.block,
                    kind: BlockKind::Reasoning,
                });
            }
            ParseMode::InToolCall { name } => {
                tracing::warn!(
                    "Stream ended inside tool call '{}' ({} bytes)",
                    name,
                    self.block.len()
                );
                out.push(Segment::Incomplete {
                    raw: self.block,
                    kind: BlockKind::ToolCall,
                });
            }
        }
        out
    }

    fn push(&mut self, text: &str, out: &mut Vec<Segment>) {
        if text.is_empty() {
            return;
        }
        match self.mode {
            ParseMode::Scanning => self.buffer.push_str(text),
            _ => self.block.push_str(text),
        }
        self.step(out);
    }

    /// Run the state machine until it needs more input
    fn step(&mut self, out: &mut Vec<Segment>) {
        loop {
            let progressed = match self.mode {
                ParseMode::Scanning => self.scan(out),
                _ => self.close_block(out),
            };
            if !progressed {
                break;
            }
        }
    }

    /// Scan the buffer for the earliest open marker.
    ///
    /// Returns true when a block was opened.
    fn scan(&mut self, out: &mut Vec<Segment>) -> bool {
        let mut search_from = 0;
        while let Some(offset) = self.buffer[search_from..].find('<') {
            let at = search_from + offset;
            let found = self.markers.classify(&self.buffer[at..]);
            match found {
                MarkerMatch::Reasoning { len } => {
                    self.open_block(at, len, ParseMode::InReasoning, out);
                    return true;
                }
                MarkerMatch::Tool { name, len } => {
                    self.open_block(at, len, ParseMode::InToolCall { name }, out);
                    return true;
                }
                MarkerMatch::Partial => {
                    tracing::trace!(
                        "Holding partial marker '{}' for the next chunk",
                        &self.buffer[at..]
                    );
                    let rest = self.buffer.split_off(at);
                    emit_text(std::mem::replace(&mut self.buffer, rest), out);
                    return false;
                }
                MarkerMatch::NoMatch => search_from = at + 1,
            }
        }

        emit_text(std::mem::take(&mut self.buffer), out);
        false
    }

    fn open_block(
        &mut self,
        at: usize,
        open_len: usize,
        mode: ParseMode,
        out: &mut Vec<Segment>,
    ) {
        let block = self.buffer.split_off(at);
        emit_text(std::mem::take(&mut self.buffer), out);

        tracing::debug!("Opened {:?} block", mode);
        self.block = block;
        self.open_len = open_len;
        self.close_search_from = open_len;
        self.mode = mode;
    }

    /// Look for the close marker of the open block.
    ///
    /// Returns true when the block was closed and scanning resumes.
    fn close_block(&mut self, out: &mut Vec<Segment>) -> bool {
        let close = match &self.mode {
            ParseMode::Scanning => return false,
            ParseMode::InReasoning => self.markers.reasoning_close().to_string(),
            ParseMode::InToolCall { name } => MarkerSet::tool_close(name),
        };

        let from = floor_char_boundary(&self.block, self.close_search_from);
        let Some(offset) = self.block[from..].find(close.as_str()) else {
            // A close marker split across chunks starts within the last
            // close.len() - 1 bytes
            self.close_search_from = self
                .block
                .len()
                .saturating_sub(close.len() - 1)
                .max(self.open_len);
            return false;
        };

        let end = from + offset + close.len();
        let rest = self.block.split_off(end);
        let raw = std::mem::take(&mut self.block);
        debug_assert!(self.buffer.is_empty());
        self.buffer = rest;

        let segment = match std::mem::replace(&mut self.mode, ParseMode::Scanning) {
            ParseMode::InToolCall { name } => {
                let (parameters, decode_errors) = decode(&name, &raw);
                if decode_errors.is_empty() {
                    tracing::debug!(
                        "Closed tool call '{}' with {} parameter(s)",
                        name,
                        parameters.len()
                    );
                } else {
                    tracing::warn!(
                        "Tool call '{}' has {} malformed parameter element(s)",
                        name,
                        decode_errors.len()
                    );
                }
                Segment::ToolCall {
                    name,
                    parameters,
                    raw,
                    decode_errors,
                }
            }
            _ => {
                let content = raw[self.open_len..raw.len() - close.len()].trim().to_string();
                tracing::debug!("Closed reasoning block ({} bytes)", content.len());
                Segment::Reasoning { content, raw }
            }
        };

        out.push(segment);
        self.open_len = 0;
        self.close_search_from = 0;
        true
    }
}

fn emit_text(content: String, out: &mut Vec<Segment>) {
    if !content.is_empty() {
        out.push(Segment::Text { content });
    }
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests;
