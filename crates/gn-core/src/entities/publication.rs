use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::kinds::{FieldMapping, Kind};
use crate::record::Record;
use crate::values::FieldMap;

pub const PUBLICATION_MAPPING: FieldMapping = &[
    ("id", "Id"),
    ("pubmed_id", "PubMed_ID"),
    ("abstract_text", "Abstract"),
    ("authors", "Authors"),
    ("title", "Title"),
    ("journal", "Journal"),
    ("volume", "Volume"),
    ("pages", "Pages"),
    ("month", "Month"),
    ("year", "Year"),
];

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Publication {
    pub id: Option<i64>,
    pub pubmed_id: Option<Option<i64>>,
    pub abstract_text: Option<Option<String>>,
    pub authors: Option<String>,
    pub title: Option<Option<String>>,
    pub journal: Option<Option<String>>,
    pub volume: Option<Option<String>>,
    pub pages: Option<Option<String>>,
    pub month: Option<Option<String>>,
    pub year: Option<String>,
}

impl Record for Publication {
    const KIND: Kind = Kind::Publication;

    fn to_field_map(&self) -> FieldMap {
        let mut map = FieldMap::new();
        map.put("id", self.id);
        map.put_nullable("pubmed_id", self.pubmed_id);
        map.put_nullable("abstract_text", self.abstract_text.clone());
        map.put("authors", self.authors.clone());
        map.put_nullable("title", self.title.clone());
        map.put_nullable("journal", self.journal.clone());
        map.put_nullable("volume", self.volume.clone());
        map.put_nullable("pages", self.pages.clone());
        map.put_nullable("month", self.month.clone());
        map.put("year", self.year.clone());
        map
    }

    fn from_field_map(fields: &FieldMap) -> Result<Self, CoreError> {
        Ok(Self {
            id: fields.value("id")?,
            pubmed_id: fields.nullable("pubmed_id")?,
            abstract_text: fields.nullable("abstract_text")?,
            authors: fields.value("authors")?,
            title: fields.nullable("title")?,
            journal: fields.nullable("journal")?,
            volume: fields.nullable("volume")?,
            pages: fields.nullable("pages")?,
            month: fields.nullable("month")?,
            year: fields.value("year")?,
        })
    }
}
