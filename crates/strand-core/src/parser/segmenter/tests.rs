//! Tests for the stream segmenter

use super::*;
use crate::parser::ToolWhitelist;
use crate::segment::{Parameters, coalesce_text};

fn markers(tools: &[&str]) -> MarkerSet {
    MarkerSet::with_tools(ToolWhitelist::new(tools.iter().copied()).unwrap()).unwrap()
}

fn run_chunks(markers: &MarkerSet, chunks: &[&str]) -> Vec<Segment> {
    let mut segmenter = StreamSegmenter::new(markers.clone());
    let mut segments = Vec::new();
    for chunk in chunks {
        segments.extend(segmenter.feed(chunk));
    }
    segments.extend(segmenter.finish());
    segments
}

fn run_by_char(markers: &MarkerSet, input: &str) -> Vec<Segment> {
    let chunks: Vec<String> = input.chars().map(String::from).collect();
    let refs: Vec<&str> = chunks.iter().map(String::as_str).collect();
    run_chunks(markers, &refs)
}

fn round_trip(segments: &[Segment]) -> String {
    segments.iter().map(Segment::raw).collect()
}

fn char_boundaries(input: &str) -> Vec<usize> {
    input
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(input.len()))
        .collect()
}

/// Every split into two and three chunks must coalesce to the one-chunk result
fn assert_chunking_invariant(markers: &MarkerSet, input: &str) {
    let expected = coalesce_text(StreamSegmenter::parse(markers.clone(), input));
    let cuts = char_boundaries(input);

    for &a in &cuts {
        let two = run_chunks(markers, &[&input[..a], &input[a..]]);
        assert_eq!(coalesce_text(two.clone()), expected, "split at {}", a);
        assert_eq!(round_trip(&two), input);

        for &b in cuts.iter().filter(|&&b| b >= a) {
            let three = run_chunks(markers, &[&input[..a], &input[a..b], &input[b..]]);
            assert_eq!(coalesce_text(three), expected, "split at {} and {}", a, b);
        }
    }

    assert_eq!(coalesce_text(run_by_char(markers, input)), expected);
}

#[test]
fn test_plain_text() {
    let segments = StreamSegmenter::parse(MarkerSet::default(), "abc");
    assert_eq!(segments, vec![Segment::text("abc")]);
}

#[test]
fn test_reasoning_block() {
    let segments = StreamSegmenter::parse(MarkerSet::default(), "abc<reasoning>def</reasoning>ghi");
    assert_eq!(
        segments,
        vec![
            Segment::text("abc"),
            Segment::Reasoning {
                content: "def".to_string(),
                raw: "<reasoning>def</reasoning>".to_string(),
            },
            Segment::text("ghi"),
        ]
    );
}

#[test]
fn test_reasoning_content_is_trimmed() {
    let segments = StreamSegmenter::parse(
        MarkerSet::default(),
        "<reasoning>\n  check the trend first \n</reasoning>",
    );
    match &segments[0] {
        Segment::Reasoning { content, raw } => {
            assert_eq!(content, "check the trend first");
            assert_eq!(raw, "<reasoning>\n  check the trend first \n</reasoning>");
        }
        other => panic!("expected reasoning, got {:?}", other),
    }
}

#[test]
fn test_tool_call() {
    let segments = StreamSegmenter::parse(
        markers(&["get_price"]),
        "<get_price><symbol>BTC</symbol></get_price>",
    );
    let expected_params: Parameters = [("symbol", "BTC")].into_iter().collect();
    assert_eq!(
        segments,
        vec![Segment::ToolCall {
            name: "get_price".to_string(),
            parameters: expected_params,
            raw: "<get_price><symbol>BTC</symbol></get_price>".to_string(),
            decode_errors: vec![],
        }]
    );
}

#[test]
fn test_unknown_tag_is_text() {
    let segments = StreamSegmenter::parse(MarkerSet::default(), "<foo>bar</foo>");
    assert_eq!(segments, vec![Segment::text("<foo>bar</foo>")]);
}

#[test]
fn test_truncated_tool_call() {
    let m = markers(&["get_price"]);
    let mut segmenter = StreamSegmenter::new(m);
    assert!(segmenter.feed("<get_price><symbol>BTC").is_empty());
    assert_eq!(
        segmenter.finish(),
        vec![Segment::Incomplete {
            raw: "<get_price><symbol>BTC".to_string(),
            kind: BlockKind::ToolCall,
        }]
    );
}

#[test]
fn test_truncated_reasoning() {
    let segments = StreamSegmenter::parse(MarkerSet::default(), "ok <reasoning>still thinking");
    assert_eq!(
        segments,
        vec![
            Segment::text("ok "),
            Segment::Incomplete {
                raw: "<reasoning>still thinking".to_string(),
                kind: BlockKind::Reasoning,
            },
        ]
    );
}

#[test]
fn test_decode_errors_are_isolated() {
    let segments = StreamSegmenter::parse(
        markers(&["get_price"]),
        "<get_price><symbol>BTC</symbol><bad</get_price>",
    );
    match &segments[..] {
        [
            Segment::ToolCall {
                parameters,
                decode_errors,
                ..
            },
        ] => {
            assert_eq!(parameters.get("symbol"), Some("BTC"));
            assert_eq!(parameters.len(), 1);
            assert_eq!(decode_errors.len(), 1);
        }
        other => panic!("expected one tool call, got {:?}", other),
    }
}

#[test]
fn test_whitelisted_name_needed_for_tool_call() {
    let m = markers(&["get_price"]);
    let input = "use <b>bold</b> and <get_price><symbol>ETH</symbol></get_price>";
    let segments = coalesce_text(StreamSegmenter::parse(m, input));
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0], Segment::text("use <b>bold</b> and "));
    assert!(matches!(&segments[1], Segment::ToolCall { name, .. } if name == "get_price"));
}

#[test]
fn test_only_matching_close_ends_tool_call() {
    let m = markers(&["get_price", "place_order"]);
    let input = "<place_order><note>see </get_price></note></place_order>";
    let segments = StreamSegmenter::parse(m, input);
    assert_eq!(segments.len(), 1);
    match &segments[0] {
        Segment::ToolCall { name, raw, .. } => {
            assert_eq!(name, "place_order");
            assert_eq!(raw, input);
        }
        other => panic!("expected tool call, got {:?}", other),
    }
}

#[test]
fn test_blocks_do_not_nest() {
    let m = markers(&["get_price"]);

    // A tool marker inside reasoning is reasoning content
    let segments = StreamSegmenter::parse(
        m.clone(),
        "<reasoning>maybe <get_price><symbol>BTC</symbol></get_price></reasoning>",
    );
    assert_eq!(segments.len(), 1);
    assert!(matches!(&segments[0], Segment::Reasoning { content, .. }
        if content == "maybe <get_price><symbol>BTC</symbol></get_price>"));

    // A reasoning marker inside a tool body is body text
    let segments = StreamSegmenter::parse(
        m,
        "<get_price><symbol><reasoning>x</reasoning></symbol></get_price>",
    );
    assert_eq!(segments.len(), 1);
    assert!(segments[0].has_decode_errors());
}

#[test]
fn test_partial_marker_is_held_back() {
    let mut segmenter = StreamSegmenter::new(markers(&["get_price"]));

    assert_eq!(segmenter.feed("price is <get_pr"), vec![Segment::text("price is ")]);
    assert_eq!(segmenter.pending(), "<get_pr");
    assert_eq!(segmenter.mode(), &ParseMode::Scanning);

    assert!(segmenter.feed("ice>").is_empty());
    assert_eq!(
        segmenter.mode(),
        &ParseMode::InToolCall {
            name: "get_price".to_string()
        }
    );
}

#[test]
fn test_partial_marker_that_never_completes() {
    let mut segmenter = StreamSegmenter::new(MarkerSet::default());
    assert_eq!(segmenter.feed("a <reas"), vec![Segment::text("a ")]);
    assert_eq!(segmenter.feed("ons"), vec![Segment::text("<reasons")]);
    assert!(!segmenter.has_pending());

    let mut segmenter = StreamSegmenter::new(MarkerSet::default());
    segmenter.feed("tail <reason");
    assert_eq!(segmenter.finish(), vec![Segment::text("<reason")]);
}

#[test]
fn test_empty_chunks_are_noops() {
    let mut segmenter = StreamSegmenter::new(MarkerSet::default());
    assert!(segmenter.feed("").is_empty());
    assert!(segmenter.feed("<reasoning>x").is_empty());
    assert!(segmenter.feed("").is_empty());
    assert_eq!(segmenter.feed("</reasoning>").len(), 1);
    assert!(segmenter.finish().is_empty());
}

#[test]
fn test_empty_input() {
    assert!(StreamSegmenter::parse(MarkerSet::default(), "").is_empty());
    let segmenter = StreamSegmenter::new(MarkerSet::default());
    assert!(segmenter.finish().is_empty());
}

#[test]
fn test_close_marker_split_across_chunks() {
    let m = markers(&["get_price"]);
    let segments = run_chunks(
        &m,
        &["<get_price><symbol>BTC</symbol></get", "_pri", "ce>after"],
    );
    assert_eq!(segments.len(), 2);
    assert!(matches!(&segments[0], Segment::ToolCall { .. }));
    assert_eq!(segments[1], Segment::text("after"));
}

#[test]
fn test_back_to_back_blocks_in_one_chunk() {
    let m = markers(&["get_price"]);
    let segments = StreamSegmenter::parse(
        m,
        "<reasoning>a</reasoning><get_price></get_price><reasoning>b</reasoning>",
    );
    let kinds: Vec<&str> = segments.iter().map(Segment::kind_name).collect();
    assert_eq!(kinds, vec!["reasoning", "tool_call", "reasoning"]);
}

#[test]
fn test_custom_reasoning_markers() {
    let m = MarkerSet::new("<thinking>", "</thinking>", ToolWhitelist::default()).unwrap();
    let segments = StreamSegmenter::parse(m, "<reasoning>x</reasoning><thinking> y </thinking>");
    assert_eq!(segments[0], Segment::text("<reasoning>x</reasoning>"));
    assert!(matches!(&segments[1], Segment::Reasoning { content, .. } if content == "y"));
}

#[test]
fn test_multibyte_text_around_markers() {
    let m = markers(&["get_price"]);
    let input = "价格 → <reasoning>先看趋势 📈</reasoning><get_price><symbol>比特币</symbol></get_price>完成";
    assert_chunking_invariant(&m, input);

    let segments = StreamSegmenter::parse(m, input);
    assert!(matches!(&segments[2], Segment::ToolCall { parameters, .. }
        if parameters.get("symbol") == Some("比特币")));
}

#[test]
fn test_feed_bytes_splits_characters() {
    let m = markers(&["get_price"]);
    let input = "é<get_price><symbol>日本</symbol></get_price>ü";
    let bytes = input.as_bytes();

    let mut segmenter = StreamSegmenter::new(m.clone());
    let mut segments = Vec::new();
    for byte in bytes {
        segments.extend(segmenter.feed_bytes(std::slice::from_ref(byte)));
    }
    segments.extend(segmenter.finish());

    assert_eq!(coalesce_text(segments), StreamSegmenter::parse(m, input));
}

#[test]
fn test_chunking_invariance_mixed_stream() {
    let m = markers(&["get_price", "get_klines"]);
    let input = "Let me look. <reasoning> need price </reasoning>\
        <get_price><symbol>BTC</symbol></get_price> then <get_klines>\
        <symbol>ETH</symbol><interval>4h</interval></get_klines> a<b c<get_p>";
    assert_chunking_invariant(&m, input);
}

#[test]
fn test_chunking_invariance_with_truncation() {
    let m = markers(&["get_price"]);
    assert_chunking_invariant(&m, "x <reasoning>r</reasoning> <get_price><symbol>BT");
    assert_chunking_invariant(&m, "<reasoning><get_price></reasoning");
    assert_chunking_invariant(&m, "<<reasoning>>< get_price><get_price");
}

#[test]
fn test_round_trip_reconstructs_input() {
    let m = markers(&["get_price"]);
    let inputs = [
        "plain",
        "a<reasoning>  b  </reasoning>c",
        "<get_price><symbol>BTC</symbol><x</get_price>",
        "<foo>bar</foo><get_price>cut",
        "<reasoning>never closed <get_price>",
    ];
    for input in inputs {
        assert_eq!(round_trip(&run_by_char(&m, input)), input);
        assert_eq!(round_trip(&StreamSegmenter::parse(m.clone(), input)), input);
    }
}
