//! SQLite database module for nerd

mod schema;
pub mod statement;

use crate::error::{NerdError, Result};
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

pub use schema::{create_schema, DEFAULT_TOPIC_ID};
pub use statement::{Cursor, Param, Record, Statement};

/// SQLite database shared by every connection worker.
///
/// The single connection sits behind a mutex: each CRUD call holds it for
/// its whole unit of work, so concurrent workers are serialized here and the
/// engine only reports busy when another process holds the file.
#[derive(Debug)]
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create the database file at `path`
    pub fn open(path: &Path, busy_timeout: Duration) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| NerdError::Storage {
            operation: format!("open database at {}", path.display()),
            reason: e.to_string(),
        })?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| NerdError::db_operation("enable WAL mode", e))?;

        Self::configure(conn, busy_timeout)
    }

    /// Open a private in-memory database, used by tests
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| NerdError::db_operation("open in-memory database", e))?;
        Self::configure(conn, Duration::from_secs(5))
    }

    fn configure(conn: Connection, busy_timeout: Duration) -> Result<Self> {
        // Referential actions on card.topic only run with this enabled
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(|e| NerdError::db_operation("enable foreign keys", e))?;

        conn.busy_timeout(busy_timeout)
            .map_err(|e| NerdError::db_operation("set busy timeout", e))?;

        create_schema(&conn).map_err(|e| NerdError::db_operation("create database schema", e))?;

        tracing::debug!("database schema ready");

        Ok(Database {
            conn: Mutex::new(conn),
        })
    }

    /// Run `f` with exclusive access to the connection
    pub fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| NerdError::Internal("database lock poisoned".to_string()))?;
        f(&conn)
    }

    pub fn count_rows(&self, table: &str) -> Result<i64> {
        self.with_conn(|conn| {
            conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| {
                r.get(0)
            })
            .map_err(|e| NerdError::db_operation(&format!("count rows in {}", table), e))
        })
    }
}

#[cfg(test)]
mod tests;
