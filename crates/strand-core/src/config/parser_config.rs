//! Parser configuration

use crate::error::StrandResult;
use crate::parser::{DEFAULT_REASONING_CLOSE, DEFAULT_REASONING_OPEN, MarkerSet, ToolWhitelist};
use serde::{Deserialize, Serialize};

/// Markers and tool names recognized by the stream segmenter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Open marker of a reasoning block
    pub reasoning_open: String,
    /// Close marker of a reasoning block
    pub reasoning_close: String,
    /// Tool names recognized as block openers
    pub tools: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            reasoning_open: DEFAULT_REASONING_OPEN.to_string(),
            reasoning_close: DEFAULT_REASONING_CLOSE.to_string(),
            tools: Vec::new(),
        }
    }
}

impl ParserConfig {
    /// Validate markers and tool names
    pub fn validate(&self) -> StrandResult<()> {
        self.marker_set().map(|_| ())
    }

    /// Build the marker set for one stream
    pub fn marker_set(&self) -> StrandResult<MarkerSet> {
        self.marker_set_with(std::iter::empty::<&str>())
    }

    /// Build the marker set with additional tool names, e.g. from a
    /// handler catalog
    pub fn marker_set_with<I, S>(&self, extra_tools: I) -> StrandResult<MarkerSet>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut whitelist = ToolWhitelist::new(self.tools.iter().cloned())?;
        for name in extra_tools {
            whitelist.insert(name)?;
        }
        MarkerSet::new(
            self.reasoning_open.clone(),
            self.reasoning_close.clone(),
            whitelist,
        )
    }
}
