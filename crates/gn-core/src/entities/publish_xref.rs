use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::kinds::{FieldMapping, Kind};
use crate::record::Record;
use crate::values::FieldMap;

pub const PUBLISH_XREF_MAPPING: FieldMapping = &[
    ("id", "Id"),
    ("inbred_set_id", "InbredSetId"),
    ("phenotype_id", "PhenotypeId"),
    ("publication_id", "PublicationId"),
    ("data_id", "DataId"),
    ("mean", "mean"),
    ("locus", "Locus"),
    ("lrs", "LRS"),
    ("additive", "additive"),
    ("sequence", "Sequence"),
    ("comments", "comments"),
];

/// Cross-reference tying a phenotype to its publication and dataset.
///
/// `(id, inbred_set_id)` identifies a row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PublishXRef {
    pub id: Option<i64>,
    pub inbred_set_id: Option<i64>,
    pub phenotype_id: Option<i64>,
    pub publication_id: Option<i64>,
    pub data_id: Option<i64>,
    pub mean: Option<Option<f64>>,
    pub locus: Option<Option<String>>,
    pub lrs: Option<Option<f64>>,
    pub additive: Option<Option<f64>>,
    pub sequence: Option<i64>,
    pub comments: Option<String>,
}

impl Record for PublishXRef {
    const KIND: Kind = Kind::PublishXRef;

    fn to_field_map(&self) -> FieldMap {
        let mut map = FieldMap::new();
        map.put("id", self.id);
        map.put("inbred_set_id", self.inbred_set_id);
        map.put("phenotype_id", self.phenotype_id);
        map.put("publication_id", self.publication_id);
        map.put("data_id", self.data_id);
        map.put_nullable("mean", self.mean);
        map.put_nullable("locus", self.locus.clone());
        map.put_nullable("lrs", self.lrs);
        map.put_nullable("additive", self.additive);
        map.put("sequence", self.sequence);
        map.put("comments", self.comments.clone());
        map
    }

    fn from_field_map(fields: &FieldMap) -> Result<Self, CoreError> {
        Ok(Self {
            id: fields.value("id")?,
            inbred_set_id: fields.value("inbred_set_id")?,
            phenotype_id: fields.value("phenotype_id")?,
            publication_id: fields.value("publication_id")?,
            data_id: fields.value("data_id")?,
            mean: fields.nullable("mean")?,
            locus: fields.nullable("locus")?,
            lrs: fields.nullable("lrs")?,
            additive: fields.nullable("additive")?,
            sequence: fields.value("sequence")?,
            comments: fields.value("comments")?,
        })
    }
}
