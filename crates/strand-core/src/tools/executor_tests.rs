//! Unit tests for ToolExecutor

#[cfg(test)]
mod tests {
    use crate::error::{StrandError, StrandResult};
    use crate::segment::Parameters;
    use crate::tools::executor::ToolExecutor;
    use crate::tools::handler::ToolHandler;
    use crate::tools::types::{ParameterSpec, ToolOutcome, ToolSpec, ToolStatus};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    // Mock market handler for testing
    struct MockHandler {
        market: String,
        should_succeed: bool,
        execution_delay: Option<Duration>,
    }

    impl MockHandler {
        fn new(market: &str) -> Self {
            Self {
                market: market.to_string(),
                should_succeed: true,
                execution_delay: None,
            }
        }

        fn with_failure(mut self) -> Self {
            self.should_succeed = false;
            self
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.execution_delay = Some(delay);
            self
        }
    }

    #[async_trait]
    impl ToolHandler for MockHandler {
        fn tools(&self) -> Vec<ToolSpec> {
            vec![
                ToolSpec::new("get_price", "Current price")
                    .with_parameter(ParameterSpec::required("symbol", "asset symbol")),
                ToolSpec::new("place_order", "Submit an order"),
            ]
        }

        async fn execute_tool(
            &self,
            tool_name: &str,
            parameters: &Parameters,
        ) -> StrandResult<ToolOutcome> {
            if let Some(delay) = self.execution_delay {
                tokio::time::sleep(delay).await;
            }

            if !self.should_succeed {
                return Err(StrandError::tool(tool_name, "mock failure"));
            }

            match tool_name {
                "place_order" => Ok(ToolOutcome::pending(tool_name, "awaiting fill")),
                _ => Ok(ToolOutcome::success(
                    tool_name,
                    serde_json::json!({
                        "market": self.market,
                        "symbol": parameters.get("symbol"),
                    }),
                )),
            }
        }
    }

    fn params(symbol: &str) -> Parameters {
        [("symbol", symbol)].into_iter().collect()
    }

    #[tokio::test]
    async fn test_execute_success() {
        let executor =
            ToolExecutor::new().with_handler("crypto", Arc::new(MockHandler::new("crypto")));

        let outcome = executor.execute("get_price", &params("BTC"), "crypto").await;
        assert!(outcome.is_success());
        assert_eq!(outcome.tool_name, "get_price");
        let data = outcome.data.unwrap();
        assert_eq!(data["market"], "crypto");
        assert_eq!(data["symbol"], "BTC");
    }

    #[tokio::test]
    async fn test_market_type_is_case_insensitive() {
        let executor =
            ToolExecutor::new().with_handler("Crypto", Arc::new(MockHandler::new("crypto")));

        let outcome = executor.execute("get_price", &params("ETH"), "CRYPTO").await;
        assert!(outcome.is_success());
        assert_eq!(executor.market_types(), vec!["crypto"]);
    }

    #[tokio::test]
    async fn test_missing_handler() {
        let executor =
            ToolExecutor::new().with_handler("crypto", Arc::new(MockHandler::new("crypto")));

        let outcome = executor.execute("get_price", &params("AAPL"), "stock").await;
        assert_eq!(outcome.status, ToolStatus::Error);
        assert!(outcome.message.unwrap().contains("No tool handler found"));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let executor =
            ToolExecutor::new().with_handler("crypto", Arc::new(MockHandler::new("crypto")));

        let outcome = executor.execute("withdraw", &Parameters::new(), "crypto").await;
        assert!(outcome.is_error());
        assert!(outcome.message.unwrap().contains("Unknown tool"));
    }

    #[tokio::test]
    async fn test_handler_error_becomes_outcome() {
        let executor = ToolExecutor::new()
            .with_handler("crypto", Arc::new(MockHandler::new("crypto").with_failure()));

        let outcome = executor.execute("get_price", &params("BTC"), "crypto").await;
        assert!(outcome.is_error());
        assert!(outcome.message.unwrap().contains("mock failure"));
    }

    #[tokio::test]
    async fn test_timeout() {
        let executor = ToolExecutor::new()
            .with_handler(
                "crypto",
                Arc::new(MockHandler::new("crypto").with_delay(Duration::from_millis(200))),
            )
            .with_timeout(Duration::from_millis(20));

        let outcome = executor.execute("get_price", &params("BTC"), "crypto").await;
        assert!(outcome.is_error());
        assert_eq!(
            outcome.message.as_deref(),
            Some("Operation timed out after 20ms")
        );
    }

    #[tokio::test]
    async fn test_pending_status_passes_through() {
        let executor =
            ToolExecutor::new().with_handler("crypto", Arc::new(MockHandler::new("crypto")));

        let outcome = executor.execute("place_order", &Parameters::new(), "crypto").await;
        assert_eq!(outcome.status, ToolStatus::Pending);
    }

    #[test]
    fn test_from_handlers_and_catalog() {
        let mut handlers: HashMap<String, Arc<dyn ToolHandler>> = HashMap::new();
        handlers.insert("crypto".to_string(), Arc::new(MockHandler::new("crypto")));
        handlers.insert("stock".to_string(), Arc::new(MockHandler::new("stock")));
        let executor = ToolExecutor::from_handlers(handlers);

        assert_eq!(executor.market_types(), vec!["crypto", "stock"]);
        let names: Vec<String> = executor
            .catalog("stock")
            .names()
            .map(str::to_string)
            .collect();
        assert_eq!(names, vec!["get_price", "place_order"]);
        assert!(executor.catalog("forex").is_empty());
    }
}
