//! Strand CLI application
//!
//! Replays captured model responses through the stream segmenter.
//!
//! ```bash
//! strand parse response.txt --tool get_price --format jsonl
//! cat response.txt | strand parse --chunk-size 1
//! strand --config strand.toml config show
//! ```

mod args;
mod commands;
mod console;
mod logging;
mod router;

use args::Cli;
use clap::Parser;
use strand_core::config::load_config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    logging::init(&config.logging, cli.verbose);
    tracing::debug!("Effective configuration: {:?}", config.redacted());

    router::route(cli, config).await
}
