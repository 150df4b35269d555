//! The `Record` trait binding a Rust struct to a record kind.

use crate::errors::CoreError;
use crate::kinds::Kind;
use crate::values::FieldMap;

/// A typed record of one kind.
///
/// `to_field_map` enumerates the present fields by logical name;
/// `from_field_map` is the kind's row constructor.
pub trait Record: Sized {
    const KIND: Kind;

    fn to_field_map(&self) -> FieldMap;

    /// # Errors
    ///
    /// Returns `CoreError` if a present value does not fit its field type.
    fn from_field_map(fields: &FieldMap) -> Result<Self, CoreError>;
}
