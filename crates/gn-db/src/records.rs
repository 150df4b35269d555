//! Record execution: fetch-one, fetch-all, insert and update for any kind.
//!
//! The free functions work on any `libsql::Connection` and speak `FieldMap`,
//! so a kind chosen at runtime (e.g., parsed from a request) can be served.
//! The `GnDb` methods wrap them for typed `Record` values.
//!
//! Each call owns its `libsql::Rows` cursor. Single-row calls drop it before
//! returning, on every path. `fetch_all` hands the cursor to the returned
//! stream, which releases it when drained or dropped; drain or drop the stream
//! before issuing the next statement on the same connection.

use std::marker::PhantomData;

use gn_core::kinds::Kind;
use gn_core::record::Record;
use gn_core::values::FieldMap;

use crate::GnDb;
use crate::error::DatabaseError;
use crate::helpers::{RowBinding, to_libsql_values};
use crate::query::{BuiltQuery, Columns, QueryBuilder};

/// Lazily reads rows of one kind as `FieldMap`s.
pub struct RowStream {
    rows: libsql::Rows,
    binding: RowBinding,
}

impl RowStream {
    fn new(rows: libsql::Rows, kind: Kind, columns: &Columns) -> Self {
        let binding = match columns {
            Columns::All => {
                let width = usize::try_from(rows.column_count()).unwrap_or_default();
                RowBinding::positional(kind, width)
            }
            Columns::List(names) => RowBinding::named(kind, names),
        };
        Self { rows, binding }
    }

    #[must_use]
    pub const fn kind(&self) -> Kind {
        self.binding.kind()
    }

    /// Next row, or `None` once the result set is exhausted.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the cursor or a column read fails.
    pub async fn next(&mut self) -> Result<Option<FieldMap>, DatabaseError> {
        match self.rows.next().await? {
            Some(row) => Ok(Some(self.binding.read(&row)?)),
            None => Ok(None),
        }
    }
}

/// Lazily reads rows as typed records.
///
/// Finite and not restartable: each row is decoded when `next` reaches it.
pub struct RecordStream<R> {
    rows: RowStream,
    _record: PhantomData<R>,
}

impl<R: Record> RecordStream<R> {
    const fn new(rows: RowStream) -> Self {
        Self {
            rows,
            _record: PhantomData,
        }
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the cursor fails or a row does not decode.
    pub async fn next(&mut self) -> Result<Option<R>, DatabaseError> {
        match self.rows.next().await? {
            Some(fields) => Ok(Some(R::from_field_map(&fields)?)),
            None => Ok(None),
        }
    }

    /// Drain the remaining rows.
    ///
    /// # Errors
    ///
    /// Returns the first `DatabaseError` hit while draining.
    pub async fn collect_all(mut self) -> Result<Vec<R>, DatabaseError> {
        let mut records = Vec::new();
        while let Some(record) = self.next().await? {
            records.push(record);
        }
        Ok(records)
    }
}

async fn query(
    conn: &libsql::Connection,
    kind: Kind,
    built: &BuiltQuery,
) -> Result<libsql::Rows, DatabaseError> {
    tracing::debug!(table = kind.table(), sql = %built.sql, args = built.params.len(), "query");
    let rows = conn
        .query(&built.sql, libsql::params_from_iter(to_libsql_values(&built.params)))
        .await?;
    Ok(rows)
}

async fn execute(
    conn: &libsql::Connection,
    kind: Kind,
    built: &BuiltQuery,
) -> Result<u64, DatabaseError> {
    tracing::debug!(table = kind.table(), sql = %built.sql, args = built.params.len(), "execute");
    let affected = conn
        .execute(&built.sql, libsql::params_from_iter(to_libsql_values(&built.params)))
        .await?;
    Ok(affected)
}

/// Fetch the first row matching `filter`, or `None` if nothing matches.
///
/// # Errors
///
/// Returns `DatabaseError::EmptyInput` for an empty filter, or any
/// connection error unchanged.
pub async fn fetch_optional_fields(
    conn: &libsql::Connection,
    builder: &QueryBuilder,
    kind: Kind,
    filter: &FieldMap,
    columns: &Columns,
) -> Result<Option<FieldMap>, DatabaseError> {
    let built = builder.select(kind, filter, columns)?;
    let rows = query(conn, kind, &built).await?;
    let mut stream = RowStream::new(rows, kind, columns);
    stream.next().await
}

/// Fetch exactly one row matching `filter`.
///
/// # Errors
///
/// Returns `DatabaseError::NoResult` when nothing matches, plus the errors of
/// [`fetch_optional_fields`].
pub async fn fetch_one_fields(
    conn: &libsql::Connection,
    builder: &QueryBuilder,
    kind: Kind,
    filter: &FieldMap,
    columns: &Columns,
) -> Result<FieldMap, DatabaseError> {
    fetch_optional_fields(conn, builder, kind, filter, columns)
        .await?
        .ok_or(DatabaseError::NoResult)
}

/// Stream every row matching `filter`. Zero matches yield an empty stream.
///
/// # Errors
///
/// Returns `DatabaseError::EmptyInput` for an empty filter, or any
/// connection error unchanged.
pub async fn fetch_all_fields(
    conn: &libsql::Connection,
    builder: &QueryBuilder,
    kind: Kind,
    filter: &FieldMap,
    columns: &Columns,
) -> Result<RowStream, DatabaseError> {
    let built = builder.select(kind, filter, columns)?;
    let rows = query(conn, kind, &built).await?;
    Ok(RowStream::new(rows, kind, columns))
}

/// Insert the present fields of `record`. Returns the rows-affected count.
///
/// # Errors
///
/// Returns `DatabaseError::EmptyInput` if no mapped field is present, or any
/// connection error unchanged.
pub async fn insert_fields(
    conn: &libsql::Connection,
    builder: &QueryBuilder,
    kind: Kind,
    record: &FieldMap,
) -> Result<u64, DatabaseError> {
    let built = builder.insert(kind, record)?;
    execute(conn, kind, &built).await
}

/// Update rows matching `filter` with the present fields of `data`.
/// Returns the rows-affected count.
///
/// # Errors
///
/// Returns `DatabaseError::EmptyInput` if either side has no present mapped
/// field, before any SQL is built; otherwise any connection error unchanged.
pub async fn update_fields(
    conn: &libsql::Connection,
    builder: &QueryBuilder,
    kind: Kind,
    data: &FieldMap,
    filter: &FieldMap,
) -> Result<u64, DatabaseError> {
    let built = builder.update(kind, data, filter)?;
    execute(conn, kind, &built).await
}

impl GnDb {
    /// Fetch the one record matching the present fields of `filter`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` when nothing matches,
    /// `DatabaseError::EmptyInput` when `filter` has no present field.
    pub async fn fetch_one<R: Record>(
        &self,
        filter: &R,
        columns: &Columns,
    ) -> Result<R, DatabaseError> {
        let fields = fetch_one_fields(
            self.conn(),
            self.builder(),
            R::KIND,
            &filter.to_field_map(),
            columns,
        )
        .await?;
        Ok(R::from_field_map(&fields)?)
    }

    /// Like [`Self::fetch_one`] but treats "no match" as `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::EmptyInput` when `filter` has no present field.
    pub async fn fetch_optional<R: Record>(
        &self,
        filter: &R,
        columns: &Columns,
    ) -> Result<Option<R>, DatabaseError> {
        let fields = fetch_optional_fields(
            self.conn(),
            self.builder(),
            R::KIND,
            &filter.to_field_map(),
            columns,
        )
        .await?;
        fields
            .map(|f| R::from_field_map(&f).map_err(DatabaseError::from))
            .transpose()
    }

    /// Stream every record matching the present fields of `filter`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::EmptyInput` when `filter` has no present field.
    pub async fn fetch_all<R: Record>(
        &self,
        filter: &R,
        columns: &Columns,
    ) -> Result<RecordStream<R>, DatabaseError> {
        let rows = fetch_all_fields(
            self.conn(),
            self.builder(),
            R::KIND,
            &filter.to_field_map(),
            columns,
        )
        .await?;
        Ok(RecordStream::new(rows))
    }

    /// Insert a record's present fields.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the record is empty or the insert fails.
    pub async fn insert<R: Record>(&self, record: &R) -> Result<u64, DatabaseError> {
        insert_fields(self.conn(), self.builder(), R::KIND, &record.to_field_map()).await
    }

    /// Update rows matching `filter` with the present fields of `data`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::EmptyInput` if `data` or `filter` is empty.
    pub async fn update<R: Record>(&self, data: &R, filter: &R) -> Result<u64, DatabaseError> {
        update_fields(
            self.conn(),
            self.builder(),
            R::KIND,
            &data.to_field_map(),
            &filter.to_field_map(),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::test_db;
    use gn_core::entities::{Phenotype, Publication, PublishXRef};
    use gn_core::values::SqlValue;
    use pretty_assertions::assert_eq;

    fn publication(id: i64, pubmed_id: i64, title: &str) -> Publication {
        Publication {
            id: Some(id),
            pubmed_id: Some(Some(pubmed_id)),
            authors: Some("Doe J, Roe R".into()),
            title: Some(Some(title.into())),
            journal: Some(Some("Genetics".into())),
            year: Some("2004".into()),
            ..Default::default()
        }
    }

    fn record_with<R: Default>(set: impl FnOnce(&mut R)) -> R {
        let mut r = R::default();
        set(&mut r);
        r
    }

    #[tokio::test]
    async fn insert_then_fetch_one_roundtrip() {
        let db = test_db().await;
        let original = publication(1, 15_000_001, "QTL mapping of body weight");

        assert_eq!(db.insert(&original).await.unwrap(), 1);

        let fetched: Publication = db
            .fetch_one(&record_with(|p: &mut Publication| p.id = Some(1)), &Columns::All)
            .await
            .unwrap();

        // Every field present in the insert comes back unchanged.
        let sent = original.to_field_map();
        let got = fetched.to_field_map();
        for (name, value) in sent.iter() {
            assert_eq!(got.get(name), Some(value), "field {name}");
        }
        // Omitted nullable columns come back as explicit NULLs.
        assert_eq!(fetched.abstract_text, Some(None));
    }

    #[tokio::test]
    async fn fetch_one_with_no_match_is_no_result() {
        let db = test_db().await;
        let result = db
            .fetch_one(&record_with(|p: &mut Publication| p.id = Some(99)), &Columns::All)
            .await;
        assert!(matches!(result, Err(DatabaseError::NoResult)));
    }

    #[tokio::test]
    async fn fetch_optional_with_no_match_is_none() {
        let db = test_db().await;
        let result = db
            .fetch_optional(&record_with(|p: &mut Publication| p.id = Some(99)), &Columns::All)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn fetch_all_with_no_match_is_empty() {
        let db = test_db().await;
        let mut stream = db
            .fetch_all(&record_with(|p: &mut Publication| p.journal = Some(Some("Nature".into()))), &Columns::All)
            .await
            .unwrap();
        assert!(stream.next().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn fetch_all_streams_every_match() {
        let db = test_db().await;
        db.insert(&publication(1, 100, "A")).await.unwrap();
        db.insert(&publication(2, 200, "B")).await.unwrap();
        db.insert(&Publication {
            journal: Some(Some("Nature".into())),
            ..publication(3, 300, "C")
        })
        .await
        .unwrap();

        let records = db
            .fetch_all(
                &record_with(|p: &mut Publication| p.journal = Some(Some("Genetics".into()))),
                &Columns::All,
            )
            .await
            .unwrap()
            .collect_all()
            .await
            .unwrap();

        let ids: Vec<_> = records.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![Some(1), Some(2)]);
    }

    #[tokio::test]
    async fn fetch_with_empty_filter_is_refused() {
        let db = test_db().await;
        let result = db
            .fetch_one(&Publication::default(), &Columns::All)
            .await;
        assert!(matches!(result, Err(DatabaseError::EmptyInput { .. })));
    }

    #[tokio::test]
    async fn explicit_columns_bind_by_name() {
        let db = test_db().await;
        db.insert(&publication(5, 500, "Named")).await.unwrap();

        let fetched: Publication = db
            .fetch_one(
                &record_with(|p: &mut Publication| p.id = Some(5)),
                &Columns::list(["Title", "Id"]),
            )
            .await
            .unwrap();

        assert_eq!(fetched.id, Some(5));
        assert_eq!(fetched.title, Some(Some("Named".into())));
        assert_eq!(fetched.authors, None);
    }

    #[tokio::test]
    async fn update_changes_matching_rows() {
        let db = test_db().await;
        db.insert(&Phenotype {
            id: Some(1),
            units: Some(Some("mg".into())),
            ..Default::default()
        })
        .await
        .unwrap();

        let affected = db
            .update(
                &Phenotype {
                    units: Some(Some("g".into())),
                    owner: Some(Some("rw".into())),
                    ..Default::default()
                },
                &record_with(|p: &mut Phenotype| p.id = Some(1)),
            )
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let fetched: Phenotype = db
            .fetch_one(&record_with(|p: &mut Phenotype| p.id = Some(1)), &Columns::All)
            .await
            .unwrap();
        assert_eq!(fetched.units, Some(Some("g".into())));
        assert_eq!(fetched.owner, Some(Some("rw".into())));
    }

    #[tokio::test]
    async fn update_to_null_then_filter_by_null() {
        let db = test_db().await;
        db.insert(&PublishXRef {
            id: Some(10),
            inbred_set_id: Some(1),
            locus: Some(Some("rs3668922".into())),
            ..Default::default()
        })
        .await
        .unwrap();

        db.update(
            &PublishXRef {
                locus: Some(None),
                ..Default::default()
            },
            &PublishXRef {
                id: Some(10),
                inbred_set_id: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let cleared: PublishXRef = db
            .fetch_one(
                &PublishXRef {
                    locus: Some(None),
                    ..Default::default()
                },
                &Columns::All,
            )
            .await
            .unwrap();
        assert_eq!(cleared.id, Some(10));
        assert_eq!(cleared.locus, Some(None));
    }

    #[tokio::test]
    async fn update_with_empty_side_is_refused() {
        let db = test_db().await;
        let result = db
            .update(&Phenotype::default(), &record_with(|p: &mut Phenotype| p.id = Some(1)))
            .await;
        assert!(matches!(result, Err(DatabaseError::EmptyInput { what: "data" })));

        let result = db.update(&Phenotype::default(), &Phenotype::default()).await;
        assert!(matches!(
            result,
            Err(DatabaseError::EmptyInput { what: "data and filter" })
        ));
    }

    #[tokio::test]
    async fn unknown_filter_fields_are_ignored_at_runtime() {
        let db = test_db().await;
        db.insert(&publication(7, 700, "Seven")).await.unwrap();

        let filter = FieldMap::new().with("id", 7_i64).with("bogus", "x");
        let fields = fetch_one_fields(
            db.conn(),
            db.builder(),
            Kind::Publication,
            &filter,
            &Columns::All,
        )
        .await
        .unwrap();
        assert_eq!(fields.get("title"), Some(&SqlValue::Text("Seven".into())));
    }

    #[tokio::test]
    async fn constraint_violation_propagates_as_libsql_error() {
        let db = test_db().await;
        db.insert(&publication(1, 1, "first")).await.unwrap();
        let result = db.insert(&publication(1, 2, "duplicate id")).await;
        assert!(matches!(result, Err(DatabaseError::LibSql(_))));
    }

    #[tokio::test]
    async fn abandoned_stream_releases_connection() {
        let db = test_db().await;
        db.insert(&publication(1, 1, "A")).await.unwrap();
        db.insert(&publication(2, 2, "B")).await.unwrap();

        {
            let mut stream = db
                .fetch_all(&record_with(|p: &mut Publication| p.year = Some("2004".into())), &Columns::All)
                .await
                .unwrap();
            assert!(stream.next().await.unwrap().is_some());
        }

        // Cursor dropped mid-stream; the connection is usable again.
        assert_eq!(db.insert(&publication(3, 3, "C")).await.unwrap(), 1);
    }
}
