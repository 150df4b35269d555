use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::kinds::{FieldMapping, Kind};
use crate::record::Record;
use crate::values::FieldMap;

pub const PHENOTYPE_MAPPING: FieldMapping = &[
    ("id", "id"),
    ("pre_pub_description", "Pre_publication_description"),
    ("post_pub_description", "Post_publication_description"),
    ("original_description", "Original_description"),
    ("units", "Units"),
    ("pre_pub_abbreviation", "Pre_publication_abbreviation"),
    ("post_pub_abbreviation", "Post_publication_abbreviation"),
    ("lab_code", "Lab_code"),
    ("submitter", "Submitter"),
    ("owner", "Owner"),
    ("authorized_users", "Authorized_Users"),
];

/// A measured trait description, before and after publication.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Phenotype {
    pub id: Option<i64>,
    pub pre_pub_description: Option<Option<String>>,
    pub post_pub_description: Option<Option<String>>,
    pub original_description: Option<Option<String>>,
    pub units: Option<Option<String>>,
    pub pre_pub_abbreviation: Option<Option<String>>,
    pub post_pub_abbreviation: Option<Option<String>>,
    pub lab_code: Option<Option<String>>,
    pub submitter: Option<Option<String>>,
    pub owner: Option<Option<String>>,
    pub authorized_users: Option<Option<String>>,
}

impl Record for Phenotype {
    const KIND: Kind = Kind::Phenotype;

    fn to_field_map(&self) -> FieldMap {
        let mut map = FieldMap::new();
        map.put("id", self.id);
        map.put_nullable("pre_pub_description", self.pre_pub_description.clone());
        map.put_nullable("post_pub_description", self.post_pub_description.clone());
        map.put_nullable("original_description", self.original_description.clone());
        map.put_nullable("units", self.units.clone());
        map.put_nullable("pre_pub_abbreviation", self.pre_pub_abbreviation.clone());
        map.put_nullable("post_pub_abbreviation", self.post_pub_abbreviation.clone());
        map.put_nullable("lab_code", self.lab_code.clone());
        map.put_nullable("submitter", self.submitter.clone());
        map.put_nullable("owner", self.owner.clone());
        map.put_nullable("authorized_users", self.authorized_users.clone());
        map
    }

    fn from_field_map(fields: &FieldMap) -> Result<Self, CoreError> {
        Ok(Self {
            id: fields.value("id")?,
            pre_pub_description: fields.nullable("pre_pub_description")?,
            post_pub_description: fields.nullable("post_pub_description")?,
            original_description: fields.nullable("original_description")?,
            units: fields.nullable("units")?,
            pre_pub_abbreviation: fields.nullable("pre_pub_abbreviation")?,
            post_pub_abbreviation: fields.nullable("post_pub_abbreviation")?,
            lab_code: fields.nullable("lab_code")?,
            submitter: fields.nullable("submitter")?,
            owner: fields.nullable("owner")?,
            authorized_users: fields.nullable("authorized_users")?,
        })
    }
}
