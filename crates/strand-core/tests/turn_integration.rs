//! End-to-end tests through the public API

use async_trait::async_trait;
use futures::StreamExt;
use std::fs;
use std::sync::Arc;
use strand_core::config::load_from_file;
use strand_core::{
    BlockKind, CompletionSource, LlmMessage, Parameters, ReplaySource, Segment, StrandResult,
    StreamSegmenter, ToolExecutor, ToolHandler, ToolOutcome, ToolSpec, TurnRunner, coalesce_text,
    segment_stream,
};
use tempfile::TempDir;

const RESPONSE: &str = "I'll look at the market first.\n\
<reasoning>\nThe user wants BTC. Check price, then candles.\n</reasoning>\n\
<get_current_ticker_info><symbol>BTC/USDT</symbol></get_current_ticker_info>\n\
<get_historical_klines>\n  <symbol>BTC/USDT</symbol>\n  <interval>4h</interval>\n  <limit>50</limit>\n</get_historical_klines>\n\
Use <b>caution</b> when sizing.";

struct CryptoHandler;

#[async_trait]
impl ToolHandler for CryptoHandler {
    fn tools(&self) -> Vec<ToolSpec> {
        vec![
            ToolSpec::new("get_current_ticker_info", "Latest ticker"),
            ToolSpec::new("get_historical_klines", "OHLCV candles"),
        ]
    }

    async fn execute_tool(
        &self,
        tool_name: &str,
        parameters: &Parameters,
    ) -> StrandResult<ToolOutcome> {
        Ok(ToolOutcome::success(tool_name, parameters.to_json()))
    }
}

#[test]
fn test_one_shot_and_streamed_agree() {
    let runner = TurnRunner::new(
        Arc::new(ToolExecutor::new().with_handler("crypto", Arc::new(CryptoHandler))),
        Default::default(),
        "crypto",
    );
    let markers = runner.marker_set().unwrap();

    let whole = StreamSegmenter::parse(markers.clone(), RESPONSE);
    for size in [1, 2, 7, 64] {
        let mut segmenter = StreamSegmenter::new(markers.clone());
        let mut streamed = Vec::new();
        for chunk in ReplaySource::new(RESPONSE, size).chunks() {
            streamed.extend(segmenter.feed(&chunk));
        }
        streamed.extend(segmenter.finish());
        assert_eq!(coalesce_text(streamed), coalesce_text(whole.clone()), "chunk size {}", size);
    }

    let kinds: Vec<&str> = whole.iter().map(Segment::kind_name).collect();
    assert_eq!(
        kinds,
        vec!["text", "reasoning", "text", "tool_call", "text", "tool_call", "text"]
    );
}

#[tokio::test]
async fn test_full_turn() {
    let executor = ToolExecutor::new().with_handler("Crypto", Arc::new(CryptoHandler));
    let runner = TurnRunner::new(Arc::new(executor), Default::default(), "crypto");
    let source = ReplaySource::new(RESPONSE, 5);

    let outcome = runner
        .run(&source, &[LlmMessage::user("How is BTC doing?")])
        .await
        .unwrap();

    assert!(!outcome.truncated);
    assert_eq!(
        outcome.reasoning(),
        vec!["The user wants BTC. Check price, then candles."]
    );
    assert!(outcome.text().ends_with("Use <b>caution</b> when sizing."));

    let names: Vec<&str> = outcome.invocations.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["get_current_ticker_info", "get_historical_klines"]);

    let klines = &outcome.invocations[1];
    assert!(klines.outcome.is_success());
    assert_eq!(klines.parameters.get("interval"), Some("4h"));
    assert_eq!(klines.parameters.get("limit"), Some("50"));
    assert_ne!(outcome.invocations[0].call_id, klines.call_id);

    let raw: String = outcome.segments.iter().map(Segment::raw).collect();
    assert_eq!(raw, RESPONSE);
}

#[tokio::test]
async fn test_config_file_drives_markers() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("strand.toml");
    fs::write(
        &path,
        r#"
[parser]
reasoning_open = "<thinking>"
reasoning_close = "</thinking>"
tools = ["get_price"]
"#,
    )
    .unwrap();
    let config = load_from_file(&path).unwrap();
    config.validate().unwrap();

    let source = ReplaySource::new(
        "<thinking>hmm</thinking><reasoning>x</reasoning><get_price><symbol>SOL</symbol>",
        3,
    );
    let chunks = source.stream_completion(&[]).await.unwrap();
    let segmenter = StreamSegmenter::from_config(&config.parser).unwrap();
    let segments: Vec<Segment> = segment_stream(chunks, segmenter)
        .map(|s| s.unwrap())
        .collect()
        .await;
    let segments = coalesce_text(segments);

    assert!(matches!(&segments[0], Segment::Reasoning { content, .. } if content == "hmm"));
    assert_eq!(segments[1], Segment::text("<reasoning>x</reasoning>"));
    assert!(matches!(
        &segments[2],
        Segment::Incomplete {
            kind: BlockKind::ToolCall,
            ..
        }
    ));
}
