//! `nerd init-db` command - create the database
//!
//! Idempotent: an existing database keeps its rows and gains any missing
//! tables.

use std::path::Path;

use nerd_core::config::ServerConfig;
use nerd_core::db::Database;
use nerd_core::error::Result;

/// Execute the init-db command
pub fn execute(database: &Path) -> Result<()> {
    let busy_timeout = ServerConfig::default().busy_timeout();
    let db = Database::open(database, busy_timeout)?;

    let topics = db.count_rows("topic")?;
    let cards = db.count_rows("card")?;
    tracing::info!(path = %database.display(), topics, cards, "database ready");

    println!("Initialized nerd database at {}", database.display());
    Ok(())
}
