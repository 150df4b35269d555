//! Before/after diffs of flat records for audit payloads.
//!
//! `diff` pairs every key with its old and new value. Both records must carry
//! the same key set; a key found on only one side is an error, whichever side
//! it is on.
//!
//! `diff_present` works on typed records through their `FieldMap`s instead of
//! their JSON form, so an absent field and an explicit NULL stay distinct.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::CoreError;
use crate::record::Record;
use crate::values::FieldMap;

/// Old and new value of one key.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DiffEntry {
    pub old: Value,
    pub new: Value,
}

impl DiffEntry {
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.old != self.new
    }
}

/// Diff entries keyed by field name.
pub type DiffMap = BTreeMap<String, DiffEntry>;

/// Diff two flat JSON objects.
///
/// Unchanged keys are included; use [`changed_only`] to drop them.
///
/// # Errors
///
/// Returns `CoreError::KeyMismatch` if a key is present in only one record.
pub fn diff(old: &Map<String, Value>, new: &Map<String, Value>) -> Result<DiffMap, CoreError> {
    if let Some(key) = new.keys().find(|k| !old.contains_key(*k)) {
        return Err(CoreError::KeyMismatch {
            key: key.clone(),
            present_in: "new",
        });
    }

    old.iter()
        .map(|(key, old_value)| {
            let new_value = new.get(key).ok_or_else(|| CoreError::KeyMismatch {
                key: key.clone(),
                present_in: "old",
            })?;
            Ok((
                key.clone(),
                DiffEntry {
                    old: old_value.clone(),
                    new: new_value.clone(),
                },
            ))
        })
        .collect()
}

/// Diff two serializable records of the same shape.
///
/// JSON writes an absent `Option` and a NULL alike; use [`diff_present`] for
/// `Record` types.
///
/// # Errors
///
/// Returns `CoreError::Validation` if either record does not serialize to a
/// JSON object, or `CoreError::KeyMismatch` as for [`diff`].
pub fn diff_records<T: Serialize>(old: &T, new: &T) -> Result<DiffMap, CoreError> {
    let old = to_object(old)?;
    let new = to_object(new)?;
    diff(&old, &new)
}

/// Diff the fields present on both sides.
///
/// A field absent from either map was not supplied and is skipped. A present
/// NULL is a value and diffs as JSON `null`.
#[must_use]
pub fn diff_fields(old: &FieldMap, new: &FieldMap) -> DiffMap {
    old.iter()
        .filter_map(|(name, old_value)| {
            new.get(name).map(|new_value| {
                (
                    name.to_string(),
                    DiffEntry {
                        old: old_value.to_json(),
                        new: new_value.to_json(),
                    },
                )
            })
        })
        .collect()
}

/// [`diff_fields`] over two typed records of the same kind.
#[must_use]
pub fn diff_present<R: Record>(old: &R, new: &R) -> DiffMap {
    diff_fields(&old.to_field_map(), &new.to_field_map())
}

/// Keep only the entries whose value changed.
#[must_use]
pub fn changed_only(diff: DiffMap) -> DiffMap {
    diff.into_iter().filter(|(_, e)| e.is_changed()).collect()
}

fn to_object<T: Serialize>(value: &T) -> Result<Map<String, Value>, CoreError> {
    match serde_json::to_value(value).map_err(|e| CoreError::Other(e.into()))? {
        Value::Object(map) => Ok(map),
        other => Err(CoreError::Validation(format!(
            "expected a JSON object record, got {other}"
        ))),
    }
}
