//! Conversions between `gn_core` values and libSQL values and rows.

use gn_core::kinds::Kind;
use gn_core::values::{FieldMap, SqlValue};

use crate::error::DatabaseError;

#[must_use]
pub fn to_libsql_value(value: &SqlValue) -> libsql::Value {
    match value {
        SqlValue::Null => libsql::Value::Null,
        SqlValue::Integer(i) => libsql::Value::Integer(*i),
        SqlValue::Real(f) => libsql::Value::Real(*f),
        SqlValue::Text(s) => libsql::Value::Text(s.clone()),
        SqlValue::Blob(b) => libsql::Value::Blob(b.clone()),
    }
}

#[must_use]
pub fn from_libsql_value(value: libsql::Value) -> SqlValue {
    match value {
        libsql::Value::Null => SqlValue::Null,
        libsql::Value::Integer(i) => SqlValue::Integer(i),
        libsql::Value::Real(f) => SqlValue::Real(f),
        libsql::Value::Text(s) => SqlValue::Text(s),
        libsql::Value::Blob(b) => SqlValue::Blob(b),
    }
}

/// Parameter values for a libSQL call, in placeholder order.
#[must_use]
pub fn to_libsql_values(values: &[SqlValue]) -> Vec<libsql::Value> {
    values.iter().map(to_libsql_value).collect()
}

/// How result columns bind to a kind's logical fields.
#[derive(Debug, Clone)]
pub enum RowBinding {
    /// `SELECT *`: column *i* is the kind's *i*-th mapped field.
    Positional { kind: Kind, width: usize },
    /// Explicit column list, resolved by name. `None` entries are columns the
    /// kind does not map; their values are dropped.
    Named {
        kind: Kind,
        fields: Vec<Option<&'static str>>,
    },
}

impl RowBinding {
    /// Bind `width` columns of a `SELECT *` row positionally.
    #[must_use]
    pub fn positional(kind: Kind, width: usize) -> Self {
        let mapped = kind.field_mapping().len();
        if width > mapped {
            tracing::warn!(
                "{} row has {} columns but only {} are mapped; extra columns are ignored",
                kind,
                width,
                mapped
            );
        }
        Self::Positional { kind, width }
    }

    /// Bind an explicit column list by column name.
    #[must_use]
    pub fn named(kind: Kind, columns: &[String]) -> Self {
        let fields = columns
            .iter()
            .map(|column| {
                let field = kind
                    .field_mapping()
                    .iter()
                    .find(|(_, mapped)| mapped.eq_ignore_ascii_case(column.trim()))
                    .map(|(name, _)| *name);
                if field.is_none() {
                    tracing::warn!("{kind}: selected column '{column}' has no mapped field");
                }
                field
            })
            .collect();
        Self::Named { kind, fields }
    }

    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::Positional { kind, .. } | Self::Named { kind, .. } => *kind,
        }
    }

    /// Read a row into a `FieldMap` using this binding.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a column cannot be read.
    pub fn read(&self, row: &libsql::Row) -> Result<FieldMap, DatabaseError> {
        match self {
            Self::Positional { kind, width } => {
                let count = (*width).min(kind.field_mapping().len());
                let values = (0..count)
                    .map(|idx| read_column(row, idx))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(FieldMap::from_row(*kind, values))
            }
            Self::Named { fields, .. } => {
                let mut map = FieldMap::new();
                for (idx, field) in fields.iter().enumerate() {
                    let Some(field) = field else { continue };
                    map.set(*field, Some(read_column(row, idx)?));
                }
                Ok(map)
            }
        }
    }
}

fn read_column(row: &libsql::Row, idx: usize) -> Result<SqlValue, DatabaseError> {
    let idx = i32::try_from(idx)
        .map_err(|_| DatabaseError::Query(format!("column index {idx} out of range")))?;
    Ok(from_libsql_value(row.get_value(idx)?))
}
