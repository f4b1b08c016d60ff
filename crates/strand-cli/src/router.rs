//! Command routing logic for CLI

use crate::args::{Cli, Commands, ConfigAction};
use crate::commands;
use anyhow::Result;
use strand_core::StrandConfig;

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli, config: StrandConfig) -> Result<()> {
    match &cli.command {
        Commands::Parse(args) => commands::parse::execute(args, &config, cli.verbose).await,
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::show(&config, cli.config.as_deref(), cli.verbose)
            }
        },
    }
}
