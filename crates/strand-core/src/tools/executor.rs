//! Tool execution engine

use super::handler::ToolHandler;
use super::types::{ToolCatalog, ToolOutcome};
use crate::error::StrandError;
use crate::segment::Parameters;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Default per-call execution limit
pub const DEFAULT_EXECUTION_TIMEOUT: Duration = Duration::from_secs(60);

/// Routes tool calls to the handler registered for a market type
pub struct ToolExecutor {
    handlers: HashMap<String, Arc<dyn ToolHandler>>,
    max_execution_time: Duration,
}

impl ToolExecutor {
    /// Create an executor with no handlers
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            max_execution_time: DEFAULT_EXECUTION_TIMEOUT,
        }
    }

    /// Create an executor from an explicit market-type → handler mapping
    pub fn from_handlers(handlers: HashMap<String, Arc<dyn ToolHandler>>) -> Self {
        let mut executor = Self::new();
        for (market_type, handler) in handlers {
            executor.register_handler(market_type, handler);
        }
        executor
    }

    /// Builder form of [`register_handler`](Self::register_handler)
    pub fn with_handler(
        mut self,
        market_type: impl Into<String>,
        handler: Arc<dyn ToolHandler>,
    ) -> Self {
        self.register_handler(market_type, handler);
        self
    }

    pub fn with_timeout(mut self, max_execution_time: Duration) -> Self {
        self.max_execution_time = max_execution_time;
        self
    }

    /// Register a handler; market types are matched case-insensitively
    pub fn register_handler(
        &mut self,
        market_type: impl Into<String>,
        handler: Arc<dyn ToolHandler>,
    ) {
        let market_type = market_type.into().to_lowercase();
        self.handlers.insert(market_type, handler);
    }

    /// Get the handler for a market type
    pub fn handler(&self, market_type: &str) -> Option<&Arc<dyn ToolHandler>> {
        self.handlers.get(&market_type.to_lowercase())
    }

    /// Registered market types, sorted
    pub fn market_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.handlers.keys().cloned().collect();
        types.sort();
        types
    }

    /// Tools available for a market type; empty when none is registered
    pub fn catalog(&self, market_type: &str) -> ToolCatalog {
        self.handler(market_type)
            .map(|handler| handler.catalog())
            .unwrap_or_default()
    }

    pub fn max_execution_time(&self) -> Duration {
        self.max_execution_time
    }

    /// Execute a tool call for a market type.
    ///
    /// Never fails: a missing handler, an unlisted tool, a handler error and
    /// a timeout all come back as `Error` outcomes.
    pub async fn execute(
        &self,
        tool_name: &str,
        parameters: &Parameters,
        market_type: &str,
    ) -> ToolOutcome {
        tracing::info!(
            "Executing tool '{}' for market '{}' with {} parameter(s)",
            tool_name,
            market_type,
            parameters.len()
        );

        let Some(handler) = self.handler(market_type) else {
            tracing::error!("No tool handler found for market_type: {}", market_type);
            return ToolOutcome::error(
                tool_name,
                format!("No tool handler found for market_type: {}", market_type),
            );
        };

        if !handler.supports(tool_name) {
            tracing::error!("Unknown tool '{}' for market '{}'", tool_name, market_type);
            return ToolOutcome::error(
                tool_name,
                format!("Unknown tool '{}' for market_type: {}", tool_name, market_type),
            );
        }

        match timeout(
            self.max_execution_time,
            handler.execute_tool(tool_name, parameters),
        )
        .await
        {
            Ok(Ok(outcome)) => {
                tracing::info!("Tool '{}' finished with status {:?}", tool_name, outcome.status);
                outcome
            }
            Ok(Err(e)) => {
                tracing::error!(
                    "Error executing tool '{}' for market '{}': {}",
                    tool_name,
                    market_type,
                    e
                );
                ToolOutcome::error(tool_name, e.to_string())
            }
            Err(_) => {
                let error = StrandError::timeout(self.max_execution_time)
                    .with_context(format!("Executing tool '{}'", tool_name));
                tracing::error!("Tool '{}' failed: {}", tool_name, error);
                ToolOutcome::error(tool_name, error.to_string())
            }
        }
    }
}

impl Default for ToolExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ToolExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolExecutor")
            .field("market_types", &self.market_types())
            .field("max_execution_time", &self.max_execution_time)
            .finish()
    }
}
