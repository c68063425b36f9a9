//! Command dispatch logic for nerd
use std::time::Instant;

use crate::cli::{Cli, Commands};
use crate::commands;
use nerd_core::error::Result;

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let result = match &cli.command {
        Commands::InitDb { database } => commands::init_db::execute(database),
        Commands::Serve(args) => commands::serve::execute(args),
    };

    tracing::debug!(elapsed = ?start.elapsed(), "command_complete");
    result
}
