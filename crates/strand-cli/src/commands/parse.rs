//! Replay a captured response through the segmenter

use crate::args::{OutputFormat, ParseArgs};
use crate::console::CliConsole;
use anyhow::{Context, Result};
use colored::*;
use futures::StreamExt;
use std::io::{self, Read, Write};
use strand_core::{
    CompletionSource, ReplaySource, Segment, StrandConfig, StreamSegmenter, segment_stream,
};

/// Longest raw excerpt shown for an incomplete block
const EXCERPT_CHARS: usize = 60;

pub async fn execute(args: &ParseArgs, config: &StrandConfig, verbose: bool) -> Result<()> {
    let console = CliConsole::new(verbose);
    let input = read_input(args)?;

    let markers = config
        .parser
        .marker_set_with(&args.tools)
        .context("Invalid parser configuration")?;
    console.info(&format!(
        "Recognizing {} tool(s): {}",
        markers.whitelist().len(),
        markers.whitelist().names().collect::<Vec<_>>().join(", ")
    ));

    let mut source = ReplaySource::new(input, args.chunk_size);
    if let Some(provider) = &config.provider {
        source = source.with_config(provider.clone());
    }
    let chunks = source.stream_completion(&[]).await?;
    let mut segments = segment_stream(chunks, StreamSegmenter::new(markers));

    let mut out = io::stdout();
    let mut collected = Vec::new();
    let mut counts = Counts::default();

    while let Some(segment) = segments.next().await {
        let segment = segment?;
        counts.record(&segment);
        match args.format {
            OutputFormat::Pretty => writeln!(out, "{}", render_pretty(&segment))?,
            OutputFormat::Jsonl => writeln!(out, "{}", serde_json::to_string(&segment)?)?,
            OutputFormat::Json => collected.push(segment),
        }
    }
    if args.format == OutputFormat::Json {
        writeln!(out, "{}", serde_json::to_string_pretty(&collected)?)?;
    }
    out.flush()?;

    console.info(&counts.summary());
    if counts.incomplete > 0 {
        console.warn("Response ended inside an unterminated block");
    }
    Ok(())
}

fn read_input(args: &ParseArgs) -> Result<String> {
    match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read response file '{}'", path.display())),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read response from stdin")?;
            Ok(input)
        }
    }
}

#[derive(Debug, Default)]
struct Counts {
    text: usize,
    reasoning: usize,
    tool_calls: usize,
    incomplete: usize,
}

impl Counts {
    fn record(&mut self, segment: &Segment) {
        match segment {
            Segment::Text { .. } => self.text += 1,
            Segment::Reasoning { .. } => self.reasoning += 1,
            Segment::ToolCall { .. } => self.tool_calls += 1,
            Segment::Incomplete { .. } => self.incomplete += 1,
        }
    }

    fn summary(&self) -> String {
        format!(
            "{} text, {} reasoning, {} tool call(s), {} incomplete",
            self.text, self.reasoning, self.tool_calls, self.incomplete
        )
    }
}

/// One coloured line per segment
pub fn render_pretty(segment: &Segment) -> String {
    match segment {
        Segment::Text { content } => format!("{} {:?}", "text".dimmed(), content),
        Segment::Reasoning { content, .. } => {
            format!("{} {:?}", "reasoning".cyan().bold(), content)
        }
        Segment::ToolCall {
            name,
            parameters,
            decode_errors,
            ..
        } => {
            let params: Vec<String> = parameters
                .iter()
                .map(|(k, v)| format!("{}={:?}", k, v))
                .collect();
            let mut line = format!(
                "{} {}({})",
                "tool_call".magenta().bold(),
                name.bold(),
                params.join(", ")
            );
            for error in decode_errors {
                line.push_str(&format!(" {}", format!("[{}]", error).red()));
            }
            line
        }
        Segment::Incomplete { raw, kind } => {
            let excerpt: String = raw.chars().take(EXCERPT_CHARS).collect();
            format!(
                "{} {} {:?}",
                "incomplete".yellow().bold(),
                kind,
                excerpt
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strand_core::{BlockKind, Parameters};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_render_text_and_reasoning() {
        plain();
        assert_eq!(render_pretty(&Segment::text("hi\n")), "text \"hi\\n\"");
        let reasoning = Segment::Reasoning {
            content: "think".to_string(),
            raw: "<reasoning>think</reasoning>".to_string(),
        };
        assert_eq!(render_pretty(&reasoning), "reasoning \"think\"");
    }

    #[test]
    fn test_render_tool_call_with_errors() {
        plain();
        let segment = Segment::ToolCall {
            name: "get_price".to_string(),
            parameters: [("symbol", "BTC")].into_iter().collect::<Parameters>(),
            raw: String::new(),
            decode_errors: vec!["unterminated tag '<x'".to_string()],
        };
        assert_eq!(
            render_pretty(&segment),
            "tool_call get_price(symbol=\"BTC\") [unterminated tag '<x']"
        );
    }

    #[test]
    fn test_render_incomplete() {
        plain();
        let segment = Segment::Incomplete {
            raw: "<get_price><symbol>BTC".to_string(),
            kind: BlockKind::ToolCall,
        };
        assert_eq!(
            render_pretty(&segment),
            "incomplete tool_call \"<get_price><symbol>BTC\""
        );
    }

    #[test]
    fn test_counts_summary() {
        let mut counts = Counts::default();
        counts.record(&Segment::text("a"));
        counts.record(&Segment::Incomplete {
            raw: "<reasoning>".to_string(),
            kind: BlockKind::Reasoning,
        });
        assert_eq!(counts.summary(), "1 text, 0 reasoning, 0 tool call(s), 1 incomplete");
    }

    #[tokio::test]
    async fn test_execute_reads_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("response.txt");
        std::fs::write(&path, "a <get_price><symbol>X</symbol></get_price>").unwrap();

        let args = ParseArgs {
            file: Some(path),
            tools: vec!["get_price".to_string()],
            chunk_size: 3,
            format: OutputFormat::Jsonl,
        };
        assert!(execute(&args, &StrandConfig::default(), false).await.is_ok());

        let bad_tool = ParseArgs {
            tools: vec!["bad name".to_string()],
            ..args
        };
        assert!(execute(&bad_tool, &StrandConfig::default(), false).await.is_err());
    }
}
