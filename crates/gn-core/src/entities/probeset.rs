use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::kinds::{FieldMapping, Kind};
use crate::record::Record;
use crate::values::FieldMap;

pub const PROBESET_MAPPING: FieldMapping = &[
    ("id", "Id"),
    ("chip_id", "ChipId"),
    ("name", "Name"),
    ("target_id", "TargetId"),
    ("symbol", "Symbol"),
    ("description", "description"),
    ("chromosome", "Chr"),
    ("mb", "Mb"),
    ("alias", "alias"),
    ("gene_id", "GeneId"),
    ("homologene_id", "HomoloGeneID"),
    ("unigene_id", "UniGeneId"),
    ("omim", "OMIM"),
    ("refseq_transcript_id", "RefSeq_TranscriptId"),
    ("blat_seq", "BlatSeq"),
    ("target_seq", "TargetSeq"),
    ("strand_probe", "Strand_Probe"),
    ("strand_gene", "Strand_Gene"),
    ("comments", "comments"),
    ("flag", "flag"),
];

/// A microarray probe set and its gene annotation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ProbeSet {
    pub id: Option<i64>,
    pub chip_id: Option<Option<i64>>,
    pub name: Option<Option<String>>,
    pub target_id: Option<Option<String>>,
    pub symbol: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub chromosome: Option<Option<String>>,
    /// Position in megabases.
    pub mb: Option<Option<f64>>,
    pub alias: Option<Option<String>>,
    pub gene_id: Option<Option<String>>,
    pub homologene_id: Option<Option<String>>,
    pub unigene_id: Option<Option<String>>,
    pub omim: Option<Option<String>>,
    pub refseq_transcript_id: Option<Option<String>>,
    pub blat_seq: Option<Option<String>>,
    pub target_seq: Option<Option<String>>,
    pub strand_probe: Option<Option<String>>,
    pub strand_gene: Option<Option<String>>,
    pub comments: Option<Option<String>>,
    pub flag: Option<Option<String>>,
}

impl Record for ProbeSet {
    const KIND: Kind = Kind::ProbeSet;

    fn to_field_map(&self) -> FieldMap {
        let mut map = FieldMap::new();
        map.put("id", self.id);
        map.put_nullable("chip_id", self.chip_id);
        map.put_nullable("name", self.name.clone());
        map.put_nullable("target_id", self.target_id.clone());
        map.put_nullable("symbol", self.symbol.clone());
        map.put_nullable("description", self.description.clone());
        map.put_nullable("chromosome", self.chromosome.clone());
        map.put_nullable("mb", self.mb);
        map.put_nullable("alias", self.alias.clone());
        map.put_nullable("gene_id", self.gene_id.clone());
        map.put_nullable("homologene_id", self.homologene_id.clone());
        map.put_nullable("unigene_id", self.unigene_id.clone());
        map.put_nullable("omim", self.omim.clone());
        map.put_nullable("refseq_transcript_id", self.refseq_transcript_id.clone());
        map.put_nullable("blat_seq", self.blat_seq.clone());
        map.put_nullable("target_seq", self.target_seq.clone());
        map.put_nullable("strand_probe", self.strand_probe.clone());
        map.put_nullable("strand_gene", self.strand_gene.clone());
        map.put_nullable("comments", self.comments.clone());
        map.put_nullable("flag", self.flag.clone());
        map
    }

    fn from_field_map(fields: &FieldMap) -> Result<Self, CoreError> {
        Ok(Self {
            id: fields.value("id")?,
            chip_id: fields.nullable("chip_id")?,
            name: fields.nullable("name")?,
            target_id: fields.nullable("target_id")?,
            symbol: fields.nullable("symbol")?,
            description: fields.nullable("description")?,
            chromosome: fields.nullable("chromosome")?,
            mb: fields.nullable("mb")?,
            alias: fields.nullable("alias")?,
            gene_id: fields.nullable("gene_id")?,
            homologene_id: fields.nullable("homologene_id")?,
            unigene_id: fields.nullable("unigene_id")?,
            omim: fields.nullable("omim")?,
            refseq_transcript_id: fields.nullable("refseq_transcript_id")?,
            blat_seq: fields.nullable("blat_seq")?,
            target_seq: fields.nullable("target_seq")?,
            strand_probe: fields.nullable("strand_probe")?,
            strand_gene: fields.nullable("strand_gene")?,
            comments: fields.nullable("comments")?,
            flag: fields.nullable("flag")?,
        })
    }
}
