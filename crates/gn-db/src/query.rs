//! Parameterized SQL construction from kinds and field maps.
//!
//! Every clause is emitted in the kind's field-mapping order, never in the
//! caller's order, so the same inputs always yield the same SQL and argument
//! list. Only table and column names from the static mappings are spliced into
//! SQL text; every value travels as a bound parameter.
//!
//! Safety guards: SELECT needs a non-empty filter, UPDATE needs both a non-empty
//! SET and a non-empty WHERE, and INSERT needs at least one column. "Non-empty"
//! counts only present fields that the kind maps.

use gn_core::dialect::Placeholder;
use gn_core::kinds::Kind;
use gn_core::values::{FieldMap, SqlValue};

use crate::error::DatabaseError;

/// Columns to select.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Columns {
    /// `SELECT *`; rows bind positionally to the kind's mapping.
    #[default]
    All,
    /// An explicit column list, used verbatim.
    List(Vec<String>),
}

impl Columns {
    pub fn list<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(columns.into_iter().map(Into::into).collect())
    }

    fn render(&self) -> String {
        match self {
            Self::All => "*".to_string(),
            Self::List(columns) => columns.join(", "),
        }
    }
}

/// SQL text plus its positional arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

/// Builds SELECT / INSERT / UPDATE statements for any kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryBuilder {
    placeholder: Placeholder,
}

/// Accumulates bound values and hands out placeholder tokens.
struct Binder {
    placeholder: Placeholder,
    params: Vec<SqlValue>,
}

impl Binder {
    const fn new(placeholder: Placeholder) -> Self {
        Self {
            placeholder,
            params: Vec::new(),
        }
    }

    fn bind(&mut self, value: &SqlValue) -> String {
        self.params.push(value.clone());
        self.placeholder.render(self.params.len())
    }
}

/// Present fields of `fields` that `kind` maps, as `(column, value)` in
/// mapping order.
fn mapped_fields(kind: Kind, fields: &FieldMap) -> Vec<(&'static str, &SqlValue)> {
    kind.field_mapping()
        .iter()
        .filter_map(|(name, column)| fields.get(name).map(|value| (*column, value)))
        .collect()
}

fn where_clause(conditions: &[(&'static str, &SqlValue)], binder: &mut Binder) -> String {
    conditions
        .iter()
        .map(|(column, value)| {
            if value.is_null() {
                format!("{column} IS NULL")
            } else {
                format!("{column} = {}", binder.bind(value))
            }
        })
        .collect::<Vec<_>>()
        .join(" AND ")
}

impl QueryBuilder {
    #[must_use]
    pub const fn new(placeholder: Placeholder) -> Self {
        Self { placeholder }
    }

    #[must_use]
    pub const fn placeholder(&self) -> Placeholder {
        self.placeholder
    }

    /// `SELECT <columns> FROM <table> WHERE c1 = ? AND c2 = ? ...`
    ///
    /// A NULL filter value renders `column IS NULL` and binds no argument.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::EmptyInput` if `filter` has no present mapped field.
    pub fn select(
        &self,
        kind: Kind,
        filter: &FieldMap,
        columns: &Columns,
    ) -> Result<BuiltQuery, DatabaseError> {
        let conditions = mapped_fields(kind, filter);
        if conditions.is_empty() {
            return Err(DatabaseError::EmptyInput { what: "filter" });
        }

        let mut binder = Binder::new(self.placeholder);
        let sql = format!(
            "SELECT {} FROM {} WHERE {}",
            columns.render(),
            kind.table(),
            where_clause(&conditions, &mut binder)
        );
        Ok(BuiltQuery {
            sql,
            params: binder.params,
        })
    }

    /// `INSERT INTO <table> (c1, c2, ...) VALUES (?, ?, ...)` over present
    /// fields only; unmentioned columns take their table default.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::EmptyInput` if `record` has no present mapped field.
    pub fn insert(&self, kind: Kind, record: &FieldMap) -> Result<BuiltQuery, DatabaseError> {
        let fields = mapped_fields(kind, record);
        if fields.is_empty() {
            return Err(DatabaseError::EmptyInput { what: "record" });
        }

        let mut binder = Binder::new(self.placeholder);
        let columns: Vec<&str> = fields.iter().map(|(column, _)| *column).collect();
        let placeholders: Vec<String> = fields.iter().map(|(_, value)| binder.bind(value)).collect();

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            kind.table(),
            columns.join(", "),
            placeholders.join(", ")
        );
        Ok(BuiltQuery {
            sql,
            params: binder.params,
        })
    }

    /// `UPDATE <table> SET c1 = ?, ... WHERE k1 = ? AND ...`
    ///
    /// Arguments are the SET values followed by the WHERE values. A NULL in
    /// `data` binds NULL; a NULL in `filter` renders `IS NULL`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::EmptyInput` if `data`, `filter`, or both have no
    /// present mapped field.
    pub fn update(
        &self,
        kind: Kind,
        data: &FieldMap,
        filter: &FieldMap,
    ) -> Result<BuiltQuery, DatabaseError> {
        let sets = mapped_fields(kind, data);
        let conditions = mapped_fields(kind, filter);
        match (sets.is_empty(), conditions.is_empty()) {
            (true, true) => return Err(DatabaseError::EmptyInput { what: "data and filter" }),
            (true, false) => return Err(DatabaseError::EmptyInput { what: "data" }),
            (false, true) => return Err(DatabaseError::EmptyInput { what: "filter" }),
            (false, false) => {}
        }

        let mut binder = Binder::new(self.placeholder);
        let set_clause = sets
            .iter()
            .map(|(column, value)| format!("{column} = {}", binder.bind(value)))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {set_clause} WHERE {}",
            kind.table(),
            where_clause(&conditions, &mut binder)
        );
        Ok(BuiltQuery {
            sql,
            params: binder.params,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn builder() -> QueryBuilder {
        QueryBuilder::new(Placeholder::Format)
    }

    #[test]
    fn select_all_with_single_filter() {
        let q = builder()
            .select(Kind::Phenotype, &FieldMap::new().with("id", 1_i64), &Columns::All)
            .unwrap();
        assert_eq!(q.sql, "SELECT * FROM Phenotype WHERE id = %s");
        assert_eq!(q.params, vec![SqlValue::Integer(1)]);
    }

    #[test]
    fn select_uses_mapping_order_not_caller_order() {
        // Alphabetical order would be data_id, id, phenotype_id.
        let filter = FieldMap::new()
            .with("phenotype_id", 5_i64)
            .with("data_id", 9_i64)
            .with("id", 1_i64);
        let q = builder()
            .select(Kind::PublishXRef, &filter, &Columns::All)
            .unwrap();
        assert_eq!(
            q.sql,
            "SELECT * FROM PublishXRef WHERE Id = %s AND PhenotypeId = %s AND DataId = %s"
        );
        assert_eq!(
            q.params,
            vec![
                SqlValue::Integer(1),
                SqlValue::Integer(5),
                SqlValue::Integer(9)
            ]
        );
    }

    #[test]
    fn select_explicit_columns_verbatim() {
        let q = builder()
            .select(
                Kind::Publication,
                &FieldMap::new().with("pubmed_id", 123_i64),
                &Columns::list(["Id", "Title"]),
            )
            .unwrap();
        assert_eq!(q.sql, "SELECT Id, Title FROM Publication WHERE PubMed_ID = %s");
    }

    #[test]
    fn select_refuses_empty_filter() {
        let result = builder().select(Kind::Phenotype, &FieldMap::new(), &Columns::All);
        assert!(matches!(result, Err(DatabaseError::EmptyInput { what: "filter" })));
    }

    #[test]
    fn select_refuses_filter_with_only_unknown_fields() {
        let filter = FieldMap::new().with("bogus", "x");
        let result = builder().select(Kind::Phenotype, &filter, &Columns::All);
        assert!(matches!(result, Err(DatabaseError::EmptyInput { .. })));
    }

    #[test]
    fn unknown_fields_do_not_change_select() {
        let plain = builder()
            .select(Kind::Phenotype, &FieldMap::new().with("id", 1_i64), &Columns::All)
            .unwrap();
        let noisy = builder()
            .select(
                Kind::Phenotype,
                &FieldMap::new().with("id", 1_i64).with("bogus", "x"),
                &Columns::All,
            )
            .unwrap();
        assert_eq!(plain, noisy);
    }

    #[test]
    fn null_filter_renders_is_null_without_argument() {
        let filter = FieldMap::new().with("id", 3_i64).with_null("units");
        let q = builder()
            .select(Kind::Phenotype, &filter, &Columns::All)
            .unwrap();
        assert_eq!(q.sql, "SELECT * FROM Phenotype WHERE id = %s AND Units IS NULL");
        assert_eq!(q.params, vec![SqlValue::Integer(3)]);
    }

    #[rstest]
    #[case::question(Placeholder::Question, "SELECT * FROM ProbeSet WHERE Id = ? AND Name = ?")]
    #[case::numbered(Placeholder::Numbered, "SELECT * FROM ProbeSet WHERE Id = ?1 AND Name = ?2")]
    #[case::format(Placeholder::Format, "SELECT * FROM ProbeSet WHERE Id = %s AND Name = %s")]
    #[case::dollar(Placeholder::Dollar, "SELECT * FROM ProbeSet WHERE Id = $1 AND Name = $2")]
    fn placeholder_dialects(#[case] placeholder: Placeholder, #[case] expected: &str) {
        let filter = FieldMap::new().with("name", "1415670_at").with("id", 7_i64);
        let q = QueryBuilder::new(placeholder)
            .select(Kind::ProbeSet, &filter, &Columns::All)
            .unwrap();
        assert_eq!(q.sql, expected);
    }

    // NULL conjuncts (`IS NULL`) bind no argument.
    #[rstest]
    #[case::one(FieldMap::new().with("id", 1_i64), 1, 1)]
    #[case::two(FieldMap::new().with("id", 1_i64).with("units", "mg"), 2, 2)]
    #[case::three(
        FieldMap::new().with("id", 1_i64).with("units", "mg").with("owner", "rw"),
        3,
        3
    )]
    #[case::one_null(FieldMap::new().with("id", 1_i64).with_null("units"), 2, 1)]
    #[case::only_null(FieldMap::new().with_null("owner"), 1, 0)]
    #[case::two_null(
        FieldMap::new().with("id", 1_i64).with_null("units").with_null("owner"),
        3,
        1
    )]
    fn select_conjuncts_match_present_fields(
        #[case] filter: FieldMap,
        #[case] conjuncts: usize,
        #[case] args: usize,
    ) {
        let q = builder()
            .select(Kind::Phenotype, &filter, &Columns::All)
            .unwrap();
        let where_part = q.sql.split(" WHERE ").nth(1).unwrap();
        assert_eq!(where_part.split(" AND ").count(), conjuncts);
        assert_eq!(where_part.matches("%s").count(), args);
        assert_eq!(q.params.len(), args);
        assert!(q.params.iter().all(|p| !p.is_null()));
    }

    #[test]
    fn insert_is_sparse() {
        let record = FieldMap::new()
            .with("title", "Genetic dissection")
            .with("authors", "Doe J")
            .with("year", "2001");
        let q = builder().insert(Kind::Publication, &record).unwrap();
        assert_eq!(
            q.sql,
            "INSERT INTO Publication (Authors, Title, Year) VALUES (%s, %s, %s)"
        );
        assert_eq!(
            q.params,
            vec![
                SqlValue::Text("Doe J".into()),
                SqlValue::Text("Genetic dissection".into()),
                SqlValue::Text("2001".into()),
            ]
        );
    }

    #[test]
    fn insert_binds_explicit_null() {
        let record = FieldMap::new().with("id", 4_i64).with_null("units");
        let q = QueryBuilder::new(Placeholder::Numbered)
            .insert(Kind::Phenotype, &record)
            .unwrap();
        assert_eq!(q.sql, "INSERT INTO Phenotype (id, Units) VALUES (?1, ?2)");
        assert_eq!(q.params, vec![SqlValue::Integer(4), SqlValue::Null]);
    }

    #[test]
    fn insert_ignores_unknown_fields() {
        let record = FieldMap::new().with("editor", "alice").with("bogus", 1_i64);
        let q = builder().insert(Kind::MetadataAudit, &record).unwrap();
        assert_eq!(q.sql, "INSERT INTO metadata_audit (editor) VALUES (%s)");
        assert_eq!(q.params.len(), 1);
    }

    #[test]
    fn insert_refuses_empty_record() {
        let result = builder().insert(Kind::Publication, &FieldMap::new());
        assert!(matches!(result, Err(DatabaseError::EmptyInput { what: "record" })));
    }

    #[test]
    fn update_orders_set_then_where() {
        let data = FieldMap::new().with("units", "g").with("owner", "rw");
        let filter = FieldMap::new().with("id", 10_i64);
        let q = QueryBuilder::new(Placeholder::Numbered)
            .update(Kind::Phenotype, &data, &filter)
            .unwrap();
        assert_eq!(q.sql, "UPDATE Phenotype SET Units = ?1, Owner = ?2 WHERE id = ?3");
        assert_eq!(
            q.params,
            vec![
                SqlValue::Text("g".into()),
                SqlValue::Text("rw".into()),
                SqlValue::Integer(10)
            ]
        );
    }

    #[test]
    fn update_can_clear_a_column() {
        let data = FieldMap::new().with_null("locus");
        let filter = FieldMap::new().with("id", 1_i64).with("inbred_set_id", 2_i64);
        let q = builder().update(Kind::PublishXRef, &data, &filter).unwrap();
        assert_eq!(
            q.sql,
            "UPDATE PublishXRef SET Locus = %s WHERE Id = %s AND InbredSetId = %s"
        );
        assert_eq!(q.params[0], SqlValue::Null);
    }

    #[rstest]
    #[case::empty_data(FieldMap::new(), FieldMap::new().with("id", 1_i64), "data")]
    #[case::empty_filter(FieldMap::new().with("units", "g"), FieldMap::new(), "filter")]
    #[case::both_empty(FieldMap::new(), FieldMap::new(), "data and filter")]
    #[case::only_unknown(
        FieldMap::new().with("bogus", 1_i64),
        FieldMap::new().with("id", 1_i64),
        "data"
    )]
    fn update_refuses_empty_sides(
        #[case] data: FieldMap,
        #[case] filter: FieldMap,
        #[case] expected: &str,
    ) {
        let result = builder().update(Kind::Phenotype, &data, &filter);
        match result {
            Err(DatabaseError::EmptyInput { what }) => assert_eq!(what, expected),
            other => panic!("expected EmptyInput, got {other:?}"),
        }
    }
}
