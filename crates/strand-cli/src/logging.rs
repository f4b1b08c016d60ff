//! Tracing subscriber setup

use strand_core::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Logs go to stderr; RUST_LOG overrides
/// the configured level and `--verbose` raises it to debug.
pub fn init(config: &LoggingConfig, verbose: bool) {
    if !config.log_to_console {
        return;
    }

    let level = if verbose { "debug" } else { config.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.format.as_str() {
        "json" => builder.json().init(),
        "compact" => builder.compact().init(),
        _ => builder.pretty().init(),
    }
}
