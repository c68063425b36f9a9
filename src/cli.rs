//! CLI argument parsing for nerd
//!
//! Supports global flags: --verbose, --log-level, --log-json

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Nerd - flashcards and topics over a JSON HTTP API
#[derive(Parser, Debug)]
#[command(name = "nerd")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log at debug level, including HTTP request spans
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directives (e.g. `warn`, `nerd_core=trace`)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the database schema and seed the Default topic
    InitDb {
        /// Database file to create
        #[arg(long, default_value = nerd_core::config::DEFAULT_DATABASE)]
        database: PathBuf,
    },

    /// Serve the API and static files until interrupted
    Serve(ServeArgs),
}

/// Flags for `nerd serve`. Each one overrides the config file.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Configuration file (TOML)
    #[arg(long, short, env = "NERD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind to
    #[arg(long)]
    pub address: Option<String>,

    /// Port to listen on
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Directory static files are served from
    #[arg(long)]
    pub doc_root: Option<PathBuf>,

    /// Database file
    #[arg(long)]
    pub database: Option<PathBuf>,
}
