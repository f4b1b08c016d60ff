//! Streaming completion boundary

use super::messages::LlmMessage;
use crate::config::ProviderConfig;
use crate::error::StrandResult;
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

/// Stream of raw response text chunks, in arrival order
pub type ChunkStream = Pin<Box<dyn Stream<Item = StrandResult<String>> + Send>>;

/// Anything that can stream a model response as text chunks.
///
/// Implementations own transport, retries and provider protocol; the
/// segmenter only ever sees the text they yield.
#[async_trait]
pub trait CompletionSource: Send + Sync {
    /// Provider settings this source was built from
    fn config(&self) -> &ProviderConfig;

    /// Start a streaming completion for `messages`
    async fn stream_completion(&self, messages: &[LlmMessage]) -> StrandResult<ChunkStream>;
}
