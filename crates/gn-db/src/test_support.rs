//! Shared test utilities for gn-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use gn_core::dialect::Placeholder;

    use crate::GnDb;

    const SCHEMA: &str = include_str!("../tests/fixtures/schema.sql");

    /// Create an in-memory `GnDb` with the fixture tables.
    pub async fn test_db() -> GnDb {
        let db = GnDb::open_local(":memory:", Placeholder::Numbered)
            .await
            .unwrap();
        db.conn().execute_batch(SCHEMA).await.unwrap();
        db
    }
}
