//! Error types and exit codes for nerd
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags, unreadable configuration)
//! - 3: Data/store error (database cannot be opened or initialized)

mod macros;

use axum::http::StatusCode;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args/config (2)
    Usage = 2,
    /// Data/store error - database unusable (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur while serving cards and topics
#[derive(Error, Debug)]
pub enum NerdError {
    // Client errors
    #[error("invalid {resource}: {reason}")]
    Validation { resource: String, reason: String },

    #[error("malformed request body: {0}")]
    MalformedInput(String),

    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    #[error("cannot bind parameter {position}: {reason}")]
    Bind { position: usize, reason: String },

    // Storage errors
    #[error("failed to {operation}: {reason}")]
    Storage { operation: String, reason: String },

    /// The engine reported SQLITE_BUSY or SQLITE_LOCKED. Callers may retry.
    #[error("database is busy: {0}")]
    Busy(String),

    #[error("column {column} is NULL")]
    ColumnIsNull { column: usize },

    #[error("internal error: {0}")]
    Internal(String),

    // Ambient failures
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl From<rusqlite::Error> for NerdError {
    fn from(err: rusqlite::Error) -> Self {
        NerdError::db_operation("execute statement", err)
    }
}

impl NerdError {
    /// Create an error for a failed database operation.
    ///
    /// Busy and locked signals from the engine are kept apart from other
    /// failures so callers can tell the retryable class.
    pub fn db_operation(operation: &str, error: rusqlite::Error) -> Self {
        if is_busy(&error) {
            return NerdError::Busy(error.to_string());
        }
        NerdError::Storage {
            operation: operation.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create a validation error for a resource document
    pub fn validation(resource: &str, reason: impl std::fmt::Display) -> Self {
        NerdError::Validation {
            resource: resource.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an error for a row that does not exist
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        NerdError::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    /// True for failures that may succeed when attempted again
    pub fn is_retryable(&self) -> bool {
        matches!(self, NerdError::Busy(_))
    }

    /// HTTP status reported for this error on the API surface
    pub fn status_code(&self) -> StatusCode {
        match self {
            NerdError::Validation { .. }
            | NerdError::MalformedInput(_)
            | NerdError::Bind { .. } => StatusCode::BAD_REQUEST,

            NerdError::NotFound { .. } => StatusCode::NOT_FOUND,

            NerdError::Busy(_) => StatusCode::SERVICE_UNAVAILABLE,

            NerdError::Storage { .. }
            | NerdError::ColumnIsNull { .. }
            | NerdError::Internal(_)
            | NerdError::Config(_)
            | NerdError::Io(_)
            | NerdError::Toml(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            NerdError::Config(_) | NerdError::Toml(_) => ExitCode::Usage,

            NerdError::Storage { .. }
            | NerdError::Busy(_)
            | NerdError::NotFound { .. }
            | NerdError::ColumnIsNull { .. } => ExitCode::Data,

            NerdError::Validation { .. }
            | NerdError::MalformedInput(_)
            | NerdError::Bind { .. }
            | NerdError::Internal(_)
            | NerdError::Io(_) => ExitCode::Failure,
        }
    }
}

fn is_busy(error: &rusqlite::Error) -> bool {
    matches!(
        error.sqlite_error_code(),
        Some(rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked)
    )
}

/// Result type alias for nerd operations
pub type Result<T> = std::result::Result<T, NerdError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            NerdError::validation("card", "title is missing").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            NerdError::MalformedInput("expected value".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            NerdError::not_found("card", 7).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            NerdError::Busy("database is locked".to_string()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            NerdError::Internal("two rows".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_busy_is_only_retryable_kind() {
        assert!(NerdError::Busy("locked".to_string()).is_retryable());
        assert!(!NerdError::not_found("topic", 1).is_retryable());
        assert!(!NerdError::Storage {
            operation: "insert card".to_string(),
            reason: "FOREIGN KEY constraint failed".to_string(),
        }
        .is_retryable());
    }

    #[test]
    fn test_engine_busy_code_is_classified() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            Some("database is locked".to_string()),
        );
        assert!(NerdError::db_operation("insert card", err).is_retryable());

        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CONSTRAINT),
            Some("FOREIGN KEY constraint failed".to_string()),
        );
        let mapped = NerdError::db_operation("insert card", err);
        assert!(matches!(mapped, NerdError::Storage { .. }));
        assert!(mapped.to_string().contains("FOREIGN KEY"));
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            NerdError::not_found("card", 42).to_string(),
            "card not found: 42"
        );
        assert_eq!(
            NerdError::validation("topic", "name must not be empty").to_string(),
            "invalid topic: name must not be empty"
        );
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            NerdError::Config("bad port".to_string()).exit_code(),
            ExitCode::Usage
        );
        assert_eq!(
            NerdError::Storage {
                operation: "open database".to_string(),
                reason: "unable to open".to_string(),
            }
            .exit_code(),
            ExitCode::Data
        );
        assert_eq!(i32::from(ExitCode::Success), 0);
    }
}
