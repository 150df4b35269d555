//! Cross-cutting error types for the record access layer.
//!
//! Errors raised while interpreting kinds, field values and diffs. Database
//! failures are defined in `gn-db` as `DatabaseError`, which wraps this type.

use thiserror::Error;

/// Errors that can be raised by any gn crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A kind name did not match any supported record kind.
    #[error("Unknown record kind: {0}")]
    UnknownKind(String),

    /// Two records being diffed do not share the same key set.
    #[error("Key '{key}' is present in the {present_in} record only")]
    KeyMismatch { key: String, present_in: &'static str },

    /// A stored value could not be converted into the field's Rust type.
    #[error("Field '{field}' expected {expected}, found {found}")]
    Conversion {
        field: String,
        expected: &'static str,
        found: String,
    },

    /// Data failed validation (e.g., NULL in a NOT NULL field).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
