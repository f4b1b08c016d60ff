//! Market tool handler trait

use super::types::{ToolCatalog, ToolOutcome, ToolSpec};
use crate::error::StrandResult;
use crate::segment::Parameters;
use async_trait::async_trait;

/// Executes the tools of one market type.
///
/// Returning `Err` is for failures the handler could not turn into an
/// outcome itself; the executor converts it to an `Error` outcome.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Tools this handler can execute
    fn tools(&self) -> Vec<ToolSpec>;

    /// Execute `tool_name` with decoded parameters
    async fn execute_tool(&self, tool_name: &str, parameters: &Parameters)
    -> StrandResult<ToolOutcome>;

    /// Catalog of this handler's tools
    fn catalog(&self) -> ToolCatalog {
        ToolCatalog::new(self.tools())
    }

    /// Whether the handler lists `tool_name`
    fn supports(&self, tool_name: &str) -> bool {
        self.tools().iter().any(|spec| spec.name == tool_name)
    }
}
