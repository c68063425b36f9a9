//! Configuration type definitions

use serde::Deserialize;

/// Default database file name
pub const DEFAULT_DATABASE: &str = "nerdbase.db";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to
    #[serde(default = "default_address")]
    pub address: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory static files are served from
    #[serde(default = "default_doc_root")]
    pub doc_root: String,

    /// Path of the SQLite database file
    #[serde(default = "default_database")]
    pub database: String,

    /// How long a statement waits on a locked database before reporting busy
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_doc_root() -> String {
    ".".to_string()
}

fn default_database() -> String {
    DEFAULT_DATABASE.to_string()
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
            doc_root: default_doc_root(),
            database: default_database(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}
