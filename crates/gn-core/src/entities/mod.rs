//! Record structs for every supported kind.
//!
//! Each module pairs a struct with its field mapping constant. NOT NULL
//! columns are `Option<T>` (absent or set); nullable columns are
//! `Option<Option<T>>` so that "not supplied" and "NULL" stay distinct.

mod metadata_audit;
mod phenotype;
mod probeset;
mod publication;
mod publish_xref;

pub use metadata_audit::{METADATA_AUDIT_MAPPING, MetadataAudit};
pub use phenotype::{PHENOTYPE_MAPPING, Phenotype};
pub use probeset::{PROBESET_MAPPING, ProbeSet};
pub use publication::{PUBLICATION_MAPPING, Publication};
pub use publish_xref::{PUBLISH_XREF_MAPPING, PublishXRef};
