//! SQL values and presence-aware field maps.
//!
//! A `FieldMap` holds only *present* fields. A name missing from the map is
//! absent and never reaches the database. `SqlValue::Null` is a present value:
//! it binds NULL in SET/VALUES clauses and renders `IS NULL` in WHERE clauses.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::errors::CoreError;
use crate::kinds::Kind;

/// A single column value as exchanged with the database.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl SqlValue {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Storage class name, used in conversion errors.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::Text(_) => "text",
            Self::Blob(_) => "blob",
        }
    }

    /// JSON rendering for audit payloads. Non-finite reals become `null`.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Integer(i) => serde_json::Value::from(*i),
            Self::Real(f) => serde_json::Number::from_f64(*f)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Self::Text(s) => serde_json::Value::String(s.clone()),
            Self::Blob(b) => serde_json::Value::from(b.clone()),
        }
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Blob(value)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Text(value.to_rfc3339())
    }
}

impl<T: Into<Self>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Parse a TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and the SQL default
/// timestamp format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `CoreError::Validation` if the string matches neither format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, CoreError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| CoreError::Validation(format!("Failed to parse datetime '{s}': {e}")))
}

/// Conversion from a stored `SqlValue` into a typed field.
pub trait FromSqlValue: Sized {
    /// # Errors
    ///
    /// Returns `CoreError::Conversion` when the storage class does not fit.
    fn from_sql_value(field: &str, value: &SqlValue) -> Result<Self, CoreError>;
}

fn mismatch(field: &str, expected: &'static str, found: &SqlValue) -> CoreError {
    CoreError::Conversion {
        field: field.to_string(),
        expected,
        found: found.type_name().to_string(),
    }
}

impl FromSqlValue for i64 {
    fn from_sql_value(field: &str, value: &SqlValue) -> Result<Self, CoreError> {
        match value {
            SqlValue::Integer(i) => Ok(*i),
            other => Err(mismatch(field, "integer", other)),
        }
    }
}

impl FromSqlValue for f64 {
    #[allow(clippy::cast_precision_loss)]
    fn from_sql_value(field: &str, value: &SqlValue) -> Result<Self, CoreError> {
        match value {
            SqlValue::Real(f) => Ok(*f),
            SqlValue::Integer(i) => Ok(*i as Self),
            other => Err(mismatch(field, "real", other)),
        }
    }
}

impl FromSqlValue for String {
    fn from_sql_value(field: &str, value: &SqlValue) -> Result<Self, CoreError> {
        match value {
            SqlValue::Text(s) => Ok(s.clone()),
            other => Err(mismatch(field, "text", other)),
        }
    }
}

impl FromSqlValue for DateTime<Utc> {
    fn from_sql_value(field: &str, value: &SqlValue) -> Result<Self, CoreError> {
        match value {
            SqlValue::Text(s) => parse_datetime(s),
            other => Err(mismatch(field, "timestamp text", other)),
        }
    }
}

impl FromSqlValue for Vec<u8> {
    fn from_sql_value(field: &str, value: &SqlValue) -> Result<Self, CoreError> {
        match value {
            SqlValue::Blob(b) => Ok(b.clone()),
            other => Err(mismatch(field, "blob", other)),
        }
    }
}

/// Present fields of a record, keyed by logical field name.
///
/// Names are not checked against any kind here; builders consult the kind's
/// field mapping and skip names it does not know.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    fields: BTreeMap<String, SqlValue>,
}

impl FieldMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a present value.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Builder-style insert of an explicit NULL.
    #[must_use]
    pub fn with_null(mut self, name: impl Into<String>) -> Self {
        self.fields.insert(name.into(), SqlValue::Null);
        self
    }

    /// Set a field; `None` makes it absent.
    pub fn set(&mut self, name: impl Into<String>, value: Option<SqlValue>) {
        let name = name.into();
        match value {
            Some(v) => {
                self.fields.insert(name, v);
            }
            None => {
                self.fields.remove(&name);
            }
        }
    }

    /// Store a NOT NULL field: `None` is absent.
    pub fn put<T: Into<SqlValue>>(&mut self, name: &str, value: Option<T>) {
        self.set(name, value.map(Into::into));
    }

    /// Store a nullable field: outer `None` is absent, `Some(None)` is NULL.
    pub fn put_nullable<T: Into<SqlValue>>(&mut self, name: &str, value: Option<Option<T>>) {
        self.set(name, value.map(SqlValue::from));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SqlValue> {
        self.fields.get(name)
    }

    #[must_use]
    pub fn is_present(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of present fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when no field is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Read a NOT NULL field.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the field holds NULL, or
    /// `CoreError::Conversion` if its storage class does not fit `T`.
    pub fn value<T: FromSqlValue>(&self, name: &str) -> Result<Option<T>, CoreError> {
        match self.fields.get(name) {
            None => Ok(None),
            Some(SqlValue::Null) => Err(CoreError::Validation(format!(
                "field '{name}' is NOT NULL but the row holds NULL"
            ))),
            Some(v) => T::from_sql_value(name, v).map(Some),
        }
    }

    /// Read a nullable field: `Some(None)` for a stored NULL.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Conversion` if the storage class does not fit `T`.
    pub fn nullable<T: FromSqlValue>(&self, name: &str) -> Result<Option<Option<T>>, CoreError> {
        match self.fields.get(name) {
            None => Ok(None),
            Some(SqlValue::Null) => Ok(Some(None)),
            Some(v) => T::from_sql_value(name, v).map(|t| Some(Some(t))),
        }
    }

    /// Bind a positional row to `kind`'s fields.
    ///
    /// Value *i* belongs to the kind's *i*-th mapped field. Fields past the end
    /// of `values` stay absent; values past the end of the mapping are dropped.
    #[must_use]
    pub fn from_row(kind: Kind, values: Vec<SqlValue>) -> Self {
        let fields = kind
            .fields()
            .zip(values)
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        Self { fields }
    }

    /// Present fields as a JSON object.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Map<String, serde_json::Value> {
        self.fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect()
    }
}
