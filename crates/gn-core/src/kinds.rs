//! Supported record kinds and their field mappings.
//!
//! Each `Kind` carries its physical table name and an ordered field mapping
//! (logical field name → column name). Mapping order is load-bearing: it fixes
//! the clause order of generated SQL, the argument order, and the positional
//! binding of `SELECT *` rows.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{
    METADATA_AUDIT_MAPPING, PHENOTYPE_MAPPING, PROBESET_MAPPING, PUBLICATION_MAPPING,
    PUBLISH_XREF_MAPPING,
};
use crate::errors::CoreError;

/// Ordered logical-field → column pairs for one kind.
pub type FieldMapping = &'static [(&'static str, &'static str)];

/// A record kind known to the access layer.
///
/// Serialized as its table name, the same form `Display` and `FromStr` use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Kind {
    Phenotype,
    ProbeSet,
    Publication,
    PublishXRef,
    #[serde(rename = "metadata_audit")]
    MetadataAudit,
}

impl Kind {
    pub const ALL: [Self; 5] = [
        Self::Phenotype,
        Self::ProbeSet,
        Self::Publication,
        Self::PublishXRef,
        Self::MetadataAudit,
    ];

    /// Physical table name.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Phenotype => "Phenotype",
            Self::ProbeSet => "ProbeSet",
            Self::Publication => "Publication",
            Self::PublishXRef => "PublishXRef",
            Self::MetadataAudit => "metadata_audit",
        }
    }

    #[must_use]
    pub const fn field_mapping(self) -> FieldMapping {
        match self {
            Self::Phenotype => PHENOTYPE_MAPPING,
            Self::ProbeSet => PROBESET_MAPPING,
            Self::Publication => PUBLICATION_MAPPING,
            Self::PublishXRef => PUBLISH_XREF_MAPPING,
            Self::MetadataAudit => METADATA_AUDIT_MAPPING,
        }
    }

    /// Column for a logical field, or `None` if the kind does not map it.
    #[must_use]
    pub fn column(self, field: &str) -> Option<&'static str> {
        self.field_mapping()
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, column)| *column)
    }

    /// Logical field names in mapping order.
    pub fn fields(self) -> impl Iterator<Item = &'static str> {
        self.field_mapping().iter().map(|(name, _)| *name)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

impl FromStr for Kind {
    type Err = CoreError;

    /// Accepts the table name, matched case-sensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.table() == s)
            .ok_or_else(|| CoreError::UnknownKind(s.to_string()))
    }
}
