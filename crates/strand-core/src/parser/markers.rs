//! Reserved block markers and the tool-name whitelist
//!
//! A reasoning block is delimited by one configurable marker pair. A tool
//! block is delimited by `<name>` / `</name>` where `name` is whitelisted.
//! Marker-shaped text whose name is not whitelisted is ordinary text.

use crate::error::{StrandError, StrandResult};
use std::collections::HashSet;

/// Default reasoning open marker
pub const DEFAULT_REASONING_OPEN: &str = "<reasoning>";
/// Default reasoning close marker
pub const DEFAULT_REASONING_CLOSE: &str = "</reasoning>";

/// Check whether `s` matches the identifier charset `[A-Za-z0-9_]+`
pub fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_identifier_byte)
}

#[inline]
pub(crate) fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Session-scoped set of tool names recognized as block openers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolWhitelist {
    /// Names in registration order, without duplicates
    names: Vec<String>,
    lookup: HashSet<String>,
}

impl ToolWhitelist {
    /// Build a whitelist, rejecting names outside the identifier charset
    pub fn new<I, S>(names: I) -> StrandResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut whitelist = Self::default();
        for name in names {
            whitelist.insert(name)?;
        }
        Ok(whitelist)
    }

    /// Add a tool name. Re-adding an existing name is a no-op.
    pub fn insert(&mut self, name: impl Into<String>) -> StrandResult<()> {
        let name = name.into();
        if !is_identifier(&name) {
            return Err(StrandError::invalid_input_field(
                format!("tool name '{}' must match [A-Za-z0-9_]+", name),
                "tools",
            ));
        }
        if self.lookup.insert(name.clone()) {
            self.names.push(name);
        }
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether some whitelisted name starts with `prefix`
    fn has_name_with_prefix(&self, prefix: &str) -> bool {
        self.names.iter().any(|name| name.starts_with(prefix))
    }
}

/// Result of classifying the buffer tail starting at a `<`
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MarkerMatch {
    /// A complete reasoning open marker of the given byte length
    Reasoning { len: usize },
    /// A complete whitelisted tool open marker
    Tool { name: String, len: usize },
    /// The tail is a proper prefix of some open marker
    Partial,
    /// Not an open marker, whatever follows
    NoMatch,
}

/// The full set of markers a segmenter recognizes during one stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSet {
    reasoning_open: String,
    reasoning_close: String,
    whitelist: ToolWhitelist,
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self {
            reasoning_open: DEFAULT_REASONING_OPEN.to_string(),
            reasoning_close: DEFAULT_REASONING_CLOSE.to_string(),
            whitelist: ToolWhitelist::default(),
        }
    }
}

impl MarkerSet {
    /// Create a marker set with custom reasoning markers.
    ///
    /// Each marker must start with its only `<` and end with its only `>`,
    /// and no whitelisted tool may share the reasoning open marker.
    pub fn new(
        reasoning_open: impl Into<String>,
        reasoning_close: impl Into<String>,
        whitelist: ToolWhitelist,
    ) -> StrandResult<Self> {
        let reasoning_open = reasoning_open.into();
        let reasoning_close = reasoning_close.into();

        validate_marker(&reasoning_open, "reasoning_open")?;
        validate_marker(&reasoning_close, "reasoning_close")?;
        if reasoning_open == reasoning_close {
            return Err(StrandError::invalid_input_field(
                "reasoning open and close markers must differ",
                "reasoning_close",
            ));
        }
        if let Some(name) = whitelist
            .names()
            .find(|name| reasoning_open == format!("<{}>", name))
        {
            return Err(StrandError::invalid_input_field(
                format!("tool '{}' collides with the reasoning marker", name),
                "tools",
            ));
        }

        Ok(Self {
            reasoning_open,
            reasoning_close,
            whitelist,
        })
    }

    /// Default reasoning markers with the given tool whitelist
    pub fn with_tools(whitelist: ToolWhitelist) -> StrandResult<Self> {
        Self::new(DEFAULT_REASONING_OPEN, DEFAULT_REASONING_CLOSE, whitelist)
    }

    pub fn reasoning_open(&self) -> &str {
        &self.reasoning_open
    }

    pub fn reasoning_close(&self) -> &str {
        &self.reasoning_close
    }

    pub fn whitelist(&self) -> &ToolWhitelist {
        &self.whitelist
    }

    /// Close marker for a tool block
    pub fn tool_close(name: &str) -> String {
        format!("</{}>", name)
    }

    /// Classify the text starting at a `<`.
    ///
    /// A complete marker wins over a partial one. The reasoning marker is
    /// checked first; validation guarantees no tool marker equals it.
    pub(crate) fn classify(&self, tail: &str) -> MarkerMatch {
        debug_assert!(tail.starts_with('<'));

        if tail.starts_with(self.reasoning_open.as_str()) {
            return MarkerMatch::Reasoning {
                len: self.reasoning_open.len(),
            };
        }

        let tool = self.classify_tool(tail);
        if tool != MarkerMatch::NoMatch {
            return tool;
        }

        if tail.len() < self.reasoning_open.len() && self.reasoning_open.starts_with(tail) {
            return MarkerMatch::Partial;
        }

        MarkerMatch::NoMatch
    }

    fn classify_tool(&self, tail: &str) -> MarkerMatch {
        if self.whitelist.is_empty() {
            return MarkerMatch::NoMatch;
        }

        let name_len = tail.as_bytes()[1..]
            .iter()
            .take_while(|b| is_identifier_byte(**b))
            .count();
        let name = &tail[1..1 + name_len];
        let after = 1 + name_len;

        match tail.as_bytes().get(after) {
            Some(b'>') if self.whitelist.contains(name) => MarkerMatch::Tool {
                name: name.to_string(),
                len: after + 1,
            },
            Some(_) => MarkerMatch::NoMatch,
            // Ran out of input inside the name
            None if self.whitelist.has_name_with_prefix(name) => MarkerMatch::Partial,
            None => MarkerMatch::NoMatch,
        }
    }
}

fn validate_marker(marker: &str, field: &str) -> StrandResult<()> {
    let well_formed = marker.len() >= 3
        && marker.starts_with('<')
        && marker.ends_with('>')
        && marker.matches('<').count() == 1
        && marker.matches('>').count() == 1;
    if well_formed {
        Ok(())
    } else {
        Err(StrandError::invalid_input_field(
            format!("marker '{}' must look like <name> or </name>", marker),
            field,
        ))
    }
}
