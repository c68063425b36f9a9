//! Nerd - flashcard and topic server
//!
//! Stores cards grouped by topic in SQLite, exposes them over a small JSON
//! HTTP API and serves a static frontend for every other path.

mod cli;
mod commands;

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use cli::Cli;
use nerd_core::error::ExitCode as NerdExitCode;
use nerd_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();

    // Help, version and usage errors are reported by clap itself
    let cli = Cli::parse();

    // Initialize structured logging
    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    match commands::dispatch::run(&cli, start) {
        Ok(()) => ExitCode::from(NerdExitCode::Success as u8),
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
