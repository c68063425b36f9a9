//! Server configuration for nerd
//!
//! Configuration is read from an optional TOML file; command-line flags
//! override individual values afterwards.

pub mod types;

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use crate::error::{NerdError, Result};

pub use types::{ServerConfig, DEFAULT_DATABASE};

impl ServerConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from `path` if given, defaults otherwise.
    ///
    /// An explicitly named file must exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path).map_err(|e| {
                NerdError::Config(format!("cannot load {}: {}", path.display(), e))
            }),
            None => Ok(Self::default()),
        }
    }

    /// Get the socket address to listen on
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.address, self.port)
            .parse()
            .map_err(|e| {
                NerdError::Config(format!(
                    "invalid listen address {}:{}: {}",
                    self.address, self.port, e
                ))
            })
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}
