//! Metadata audit trail.
//!
//! Append-only rows in `metadata_audit` recording the before/after values of
//! an edit to dataset metadata.

use gn_core::diff::{changed_only, diff_present};
use gn_core::entities::MetadataAudit;
use gn_core::record::Record;

use crate::GnDb;
use crate::error::DatabaseError;
use crate::query::Columns;

impl GnDb {
    /// Diff `old` against `new` and append an audit row holding the changed
    /// fields. Returns the new row id, or `None` when nothing changed.
    ///
    /// Only fields present in both records are compared. Clearing a field
    /// (`Some(None)`) is a change and is recorded with a `null` new value.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Core` if the diff cannot be serialized, or
    /// `DatabaseError` if the INSERT fails.
    pub async fn record_metadata_edit<R: Record>(
        &self,
        dataset_id: i64,
        editor: &str,
        old: &R,
        new: &R,
    ) -> Result<Option<i64>, DatabaseError> {
        let changes = changed_only(diff_present(old, new));
        if changes.is_empty() {
            tracing::debug!(dataset_id, editor, "metadata edit changed nothing");
            return Ok(None);
        }

        let audit = MetadataAudit::from_diff(dataset_id, editor, &changes)?;
        self.insert(&audit).await?;
        let id = self.conn().last_insert_rowid();
        tracing::info!(dataset_id, editor, id, changed = changes.len(), "recorded metadata edit");
        Ok(Some(id))
    }

    /// All audit rows for `dataset_id`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row does not decode.
    pub async fn metadata_history(
        &self,
        dataset_id: i64,
    ) -> Result<Vec<MetadataAudit>, DatabaseError> {
        let filter = MetadataAudit {
            dataset_id: Some(dataset_id),
            ..Default::default()
        };
        self.fetch_all(&filter, &Columns::All)
            .await?
            .collect_all()
            .await
    }
}
