//! One model turn: stream, segment, execute tool calls

use crate::config::ParserConfig;
use crate::error::StrandResult;
use crate::llm::{CompletionSource, LlmMessage};
use crate::parser::{MarkerSet, StreamSegmenter, segment_stream};
use crate::segment::{Parameters, Segment};
use crate::tools::{ToolExecutor, ToolOutcome};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// A tool call found in the response and its execution outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub call_id: Uuid,
    pub name: String,
    pub parameters: Parameters,
    pub outcome: ToolOutcome,
}

/// Everything one turn produced
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnOutcome {
    /// Segments in response order
    pub segments: Vec<Segment>,
    /// Tool invocations in the order their blocks closed
    pub invocations: Vec<ToolInvocation>,
    /// The response ended inside a reserved block
    pub truncated: bool,
}

impl TurnOutcome {
    /// Concatenated narrative text
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Text { content } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Reasoning block contents in order
    pub fn reasoning(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Reasoning { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Tool result messages to feed back into the next turn
    pub fn tool_messages(&self) -> StrandResult<Vec<LlmMessage>> {
        self.invocations
            .iter()
            .map(|invocation| {
                let content = serde_json::to_string(&invocation.outcome)?;
                Ok(LlmMessage::tool(invocation.name.clone(), content))
            })
            .collect()
    }
}

/// Drives one completion through the segmenter and the tool executor
#[derive(Debug, Clone)]
pub struct TurnRunner {
    executor: Arc<ToolExecutor>,
    parser: ParserConfig,
    market_type: String,
}

impl TurnRunner {
    pub fn new(
        executor: Arc<ToolExecutor>,
        parser: ParserConfig,
        market_type: impl Into<String>,
    ) -> Self {
        Self {
            executor,
            parser,
            market_type: market_type.into(),
        }
    }

    pub fn market_type(&self) -> &str {
        &self.market_type
    }

    /// Markers for this turn: configured tools plus the market's catalog
    pub fn marker_set(&self) -> StrandResult<MarkerSet> {
        let catalog = self.executor.catalog(&self.market_type);
        self.parser.marker_set_with(catalog.names())
    }

    /// Run one turn.
    ///
    /// Tool calls execute as soon as their block closes, in stream order. A
    /// call with malformed parameters is not executed and records an
    /// `Error` outcome instead. A transport error aborts the turn.
    pub async fn run(
        &self,
        source: &dyn CompletionSource,
        messages: &[LlmMessage],
    ) -> StrandResult<TurnOutcome> {
        let markers = self.marker_set()?;
        tracing::debug!(
            "Starting turn for market '{}' with {} whitelisted tool(s)",
            self.market_type,
            markers.whitelist().len()
        );

        let chunks = source.stream_completion(messages).await?;
        let mut segments = segment_stream(chunks, StreamSegmenter::new(markers));
        let mut outcome = TurnOutcome::default();

        while let Some(segment) = segments.next().await {
            let segment = segment?;
            match &segment {
                Segment::ToolCall {
                    name,
                    parameters,
                    decode_errors,
                    ..
                } => {
                    let result = if decode_errors.is_empty() {
                        self.executor
                            .execute(name, parameters, &self.market_type)
                            .await
                    } else {
                        tracing::warn!("Skipping tool call '{}' with malformed parameters", name);
                        ToolOutcome::error(
                            name.clone(),
                            format!("Malformed parameters: {}", decode_errors.join("; ")),
                        )
                    };
                    outcome.invocations.push(ToolInvocation {
                        call_id: Uuid::new_v4(),
                        name: name.clone(),
                        parameters: parameters.clone(),
                        outcome: result,
                    });
                }
                Segment::Incomplete { kind, .. } => {
                    tracing::warn!("Turn ended inside an unterminated {} block", kind);
                    outcome.truncated = true;
                }
                _ => {}
            }
            outcome.segments.push(segment);
        }

        tracing::info!(
            "Turn finished: {} segment(s), {} tool invocation(s)",
            outcome.segments.len(),
            outcome.invocations.len()
        );
        Ok(outcome)
    }
}
