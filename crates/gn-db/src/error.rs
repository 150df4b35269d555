//! Database error types for gn-db.

use gn_core::errors::CoreError;
use thiserror::Error;

/// Errors from record access operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The caller gave no present field to scope the statement with.
    #[error("No fields supplied for {what}: refusing to build the statement")]
    EmptyInput { what: &'static str },

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Invalid state encountered (e.g., an unusable connection setting).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error: connectivity, syntax, constraint violations.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Record conversion or diff failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
