//! Error macros for nerd

/// Return a validation error for the named resource
#[macro_export]
macro_rules! bail_validation {
    ($resource:expr, $reason:expr) => {
        return Err($crate::error::NerdError::validation($resource, $reason))
    };
}

/// Macro for mapping database errors
#[macro_export]
macro_rules! map_db_err {
    ($op:expr) => {
        |e: rusqlite::Error| $crate::error::NerdError::db_operation($op, e)
    };
}
