//! CLI argument definitions using clap
//!
//! - strand parse [FILE]        # Segment a captured response
//! - strand config show         # Print the effective configuration

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Default replay chunk size, in characters
pub const DEFAULT_CHUNK_SIZE: usize = 16;

#[derive(Parser, Debug)]
#[command(name = "strand")]
#[command(about = "Strand - segment streamed LLM output into text, reasoning, and tool calls")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (toml, yaml, or json)
    #[arg(long, global = true, env = "STRAND_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a captured model response through the segmenter
    Parse(ParseArgs),

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Display the effective configuration with credentials masked
    Show,
}

#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    /// Response file to read; stdin when omitted
    pub file: Option<PathBuf>,

    /// Additional tool name to recognize (repeatable)
    #[arg(long = "tool", value_name = "NAME")]
    pub tools: Vec<String>,

    /// Characters per replayed chunk; 0 feeds the whole input at once
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Output format
    #[arg(long, value_enum, default_value = "pretty")]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Coloured one-line summary per segment
    Pretty,
    /// A single JSON array
    Json,
    /// One JSON object per line
    Jsonl,
}
