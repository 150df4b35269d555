//! # gn-db
//!
//! Generic record access over libSQL.
//!
//! One set of operations (fetch-one, fetch-all, insert, update) serves every
//! record kind in `gn_core::kinds::Kind`: SQL is built from the kind's field
//! mapping and the record's present fields, executed on a libSQL connection,
//! and rows are decoded back into records.
//!
//! This layer owns no schema, runs no migrations and opens no transactions.
//! Connections are not pooled or shared; concurrent callers open their own.

pub mod audit;
pub mod error;
pub mod helpers;
pub mod query;
pub mod records;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use gn_config::DatabaseConfig;
use gn_core::dialect::Placeholder;
use libsql::Builder;
use query::QueryBuilder;

/// Database handle: a libSQL database, one connection, and the query builder
/// configured for it.
pub struct GnDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    builder: QueryBuilder,
}

impl GnDb {
    /// Open a local database at `path` (or `":memory:"`).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` if libSQL cannot bind the given
    /// placeholder style, or `DatabaseError` if the database cannot be opened.
    pub async fn open_local(path: &str, placeholder: Placeholder) -> Result<Self, DatabaseError> {
        if placeholder == Placeholder::Format {
            return Err(DatabaseError::InvalidState(format!(
                "placeholder style '{placeholder}' is not understood by libSQL"
            )));
        }

        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;
        tracing::debug!(path, %placeholder, "opened local database");

        Ok(Self {
            db,
            conn,
            builder: QueryBuilder::new(placeholder),
        })
    }

    /// Open the database described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or the
    /// foreign-key pragma fails.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let db = Self::open_local(&config.path, config.placeholder).await?;

        // Must be per-connection in SQLite
        if config.foreign_keys {
            db.conn
                .execute("PRAGMA foreign_keys = ON", ())
                .await
                .map_err(|e| DatabaseError::Query(format!("PRAGMA foreign_keys: {e}")))?;
        }

        Ok(db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    #[must_use]
    pub const fn builder(&self) -> &QueryBuilder {
        &self.builder
    }
}
