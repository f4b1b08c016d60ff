//! Completion source replaying a captured response

use super::messages::LlmMessage;
use super::streaming::{ChunkStream, CompletionSource};
use crate::config::ProviderConfig;
use crate::error::{StrandError, StrandResult};
use async_trait::async_trait;

/// Replays a fixed response in fixed-size character chunks.
///
/// A chunk size of zero yields the whole response as one chunk.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    config: ProviderConfig,
    response: String,
    chunk_size: usize,
    fail_after: Option<usize>,
}

impl ReplaySource {
    pub fn new(response: impl Into<String>, chunk_size: usize) -> Self {
        Self {
            config: ProviderConfig::new("replay", "fixture"),
            response: response.into(),
            chunk_size,
            fail_after: None,
        }
    }

    pub fn with_config(mut self, config: ProviderConfig) -> Self {
        self.config = config;
        self
    }

    /// Simulate a dropped connection after `chunks` chunks
    pub fn with_failure_after(mut self, chunks: usize) -> Self {
        self.fail_after = Some(chunks);
        self
    }

    /// Split the response on character boundaries
    pub fn chunks(&self) -> Vec<String> {
        if self.chunk_size == 0 || self.response.is_empty() {
            return vec![self.response.clone()];
        }
        let chars: Vec<char> = self.response.chars().collect();
        chars
            .chunks(self.chunk_size)
            .map(|chunk| chunk.iter().collect())
            .collect()
    }
}

#[async_trait]
impl CompletionSource for ReplaySource {
    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn stream_completion(&self, messages: &[LlmMessage]) -> StrandResult<ChunkStream> {
        let mut items: Vec<StrandResult<String>> = self.chunks().into_iter().map(Ok).collect();
        if let Some(limit) = self.fail_after {
            items.truncate(limit);
            items.push(Err(StrandError::llm_with_provider(
                format!("replay interrupted after {} chunk(s)", limit),
                self.config.provider.clone(),
            )));
        }

        tracing::debug!(
            "Replaying {} chunk(s) for {} message(s)",
            items.len(),
            messages.len()
        );
        Ok(Box::pin(futures::stream::iter(items)))
    }
}
