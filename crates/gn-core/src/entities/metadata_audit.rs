use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::diff::DiffMap;
use crate::errors::CoreError;
use crate::kinds::{FieldMapping, Kind};
use crate::record::Record;
use crate::values::FieldMap;

pub const METADATA_AUDIT_MAPPING: FieldMapping = &[
    ("id", "id"),
    ("dataset_id", "dataset_id"),
    ("editor", "editor"),
    ("json_data", "json_diff_data"),
    ("time_stamp", "time_stamp"),
];

/// An append-only audit row recording an edit to dataset metadata.
///
/// `json_data` holds the serialized before/after `DiffMap`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MetadataAudit {
    pub id: Option<i64>,
    pub dataset_id: Option<i64>,
    pub editor: Option<String>,
    pub json_data: Option<String>,
    pub time_stamp: Option<DateTime<Utc>>,
}

impl MetadataAudit {
    /// Build an audit row for an edit. `id` and `time_stamp` are left absent
    /// so the table assigns them.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Other` if the diff cannot be serialized.
    pub fn from_diff(
        dataset_id: i64,
        editor: impl Into<String>,
        diff: &DiffMap,
    ) -> Result<Self, CoreError> {
        let json_data = serde_json::to_string(diff).map_err(|e| CoreError::Other(e.into()))?;
        Ok(Self {
            id: None,
            dataset_id: Some(dataset_id),
            editor: Some(editor.into()),
            json_data: Some(json_data),
            time_stamp: None,
        })
    }

    /// Decode `json_data` back into a `DiffMap`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `json_data` is absent or not a diff.
    pub fn diff(&self) -> Result<DiffMap, CoreError> {
        let raw = self
            .json_data
            .as_deref()
            .ok_or_else(|| CoreError::Validation("audit row has no json_data".into()))?;
        serde_json::from_str(raw)
            .map_err(|e| CoreError::Validation(format!("Invalid diff JSON in audit row: {e}")))
    }
}

impl Record for MetadataAudit {
    const KIND: Kind = Kind::MetadataAudit;

    fn to_field_map(&self) -> FieldMap {
        let mut map = FieldMap::new();
        map.put("id", self.id);
        map.put("dataset_id", self.dataset_id);
        map.put("editor", self.editor.clone());
        map.put("json_data", self.json_data.clone());
        map.put("time_stamp", self.time_stamp);
        map
    }

    fn from_field_map(fields: &FieldMap) -> Result<Self, CoreError> {
        Ok(Self {
            id: fields.value("id")?,
            dataset_id: fields.value("dataset_id")?,
            editor: fields.value("editor")?,
            json_data: fields.value("json_data")?,
            time_stamp: fields.value("time_stamp")?,
        })
    }
}
