use rust_decimal::Decimal;
use sqlx::{postgres::PgArguments, postgres::PgRow, FromRow, Postgres};

use crate::models::ModelError;

/// A typed bind parameter
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(i32),
    Text(String),
    Decimal(Decimal),
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<Decimal> for SqlValue {
    fn from(v: Decimal) -> Self {
        SqlValue::Decimal(v)
    }
}

/// Ordered field -> value mapping for a partial update.
///
/// Fields keep the order in which they were first set; setting a field again
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateData {
    fields: Vec<(String, SqlValue)>,
}

impl UpdateData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Set only when a value is present
    pub fn set_opt<V: Into<SqlValue>>(self, field: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(field, v),
            None => self,
        }
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<SqlValue>) {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == field) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((field, value)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Output of [`sql_for_partial_update`]
#[derive(Debug, Clone, PartialEq)]
pub struct SetClause {
    /// `"col_a"=$1, "col_b"=$2`
    pub set_cols: String,
    pub values: Vec<SqlValue>,
}

impl SetClause {
    /// Placeholder for the first parameter after the SET values, e.g. the key
    /// in `WHERE handle = $n`
    pub fn next_placeholder(&self) -> String {
        format!("${}", self.values.len() + 1)
    }
}

/// Build the SET clause of a partial UPDATE.
///
/// `js_to_sql` translates API field names to column names; fields without a
/// translation are used as-is. Placeholders start at `$1` and follow the
/// field order of `data`.
pub fn sql_for_partial_update(
    data: &UpdateData,
    js_to_sql: &[(&str, &str)],
) -> Result<SetClause, ModelError> {
    if data.is_empty() {
        return Err(ModelError::InvalidInput("No data".to_string()));
    }

    let mut cols = Vec::with_capacity(data.len());
    let mut values = Vec::with_capacity(data.len());
    for (idx, (field, value)) in data.iter().enumerate() {
        let column = js_to_sql
            .iter()
            .find(|(js, _)| *js == field)
            .map(|(_, sql)| *sql)
            .unwrap_or(field);
        cols.push(format!("\"{}\"=${}", column, idx + 1));
        values.push(value.clone());
    }

    Ok(SetClause {
        set_cols: cols.join(", "),
        values,
    })
}

pub fn bind_value_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, Postgres, O, PgArguments>,
    v: &SqlValue,
) -> sqlx::query::QueryAs<'q, Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    match v {
        SqlValue::Int(i) => q.bind(*i),
        SqlValue::Text(s) => q.bind(s.clone()),
        SqlValue::Decimal(d) => q.bind(*d),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_mapped_fields() {
        let data = UpdateData::new().set("firstName", "Aliya").set("age", 32);
        let result = sql_for_partial_update(&data, &[("firstName", "first_name")]).unwrap();

        assert_eq!(result.set_cols, "\"first_name\"=$1, \"age\"=$2");
        assert_eq!(result.values, vec![SqlValue::from("Aliya"), SqlValue::Int(32)]);
    }

    #[test]
    fn uses_field_names_without_mapping() {
        let data = UpdateData::new().set("firstName", "Aliya").set("age", 32);
        let result = sql_for_partial_update(&data, &[]).unwrap();

        assert_eq!(result.set_cols, "\"firstName\"=$1, \"age\"=$2");
        assert_eq!(result.values.len(), 2);
    }

    #[test]
    fn partial_mapping_keeps_insertion_order() {
        let data = UpdateData::new()
            .set("firstName", "Aliya")
            .set("age", 32)
            .set("lastName", "Smith");
        let result = sql_for_partial_update(
            &data,
            &[("firstName", "first_name"), ("lastName", "last_name")],
        )
        .unwrap();

        assert_eq!(result.set_cols, "\"first_name\"=$1, \"age\"=$2, \"last_name\"=$3");
        assert_eq!(
            result.values,
            vec![SqlValue::from("Aliya"), SqlValue::Int(32), SqlValue::from("Smith")]
        );
        assert_eq!(result.next_placeholder(), "$4");
    }

    #[test]
    fn empty_data_is_rejected() {
        let err = sql_for_partial_update(&UpdateData::new(), &[]).unwrap_err();
        match err {
            ModelError::InvalidInput(msg) => assert_eq!(msg, "No data"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn placeholders_are_strictly_increasing_and_match_values() {
        for n in 1..=12 {
            let mut data = UpdateData::new();
            for i in 0..n {
                data.insert(format!("f{}", i), i as i32);
            }
            let result = sql_for_partial_update(&data, &[]).unwrap();
            let placeholders: Vec<usize> = result
                .set_cols
                .split(", ")
                .map(|part| part.rsplit('$').next().unwrap().parse().unwrap())
                .collect();

            assert_eq!(placeholders, (1..=n).collect::<Vec<_>>());
            assert_eq!(result.values.len(), n);
            for (i, v) in result.values.iter().enumerate() {
                assert_eq!(*v, SqlValue::Int(i as i32));
            }
        }
    }

    #[test]
    fn setting_a_field_twice_keeps_its_position() {
        let data = UpdateData::new()
            .set("title", "a")
            .set("salary", 1)
            .set("title", "b");
        let result = sql_for_partial_update(&data, &[]).unwrap();

        assert_eq!(result.set_cols, "\"title\"=$1, \"salary\"=$2");
        assert_eq!(result.values[0], SqlValue::from("b"));
    }

    #[test]
    fn set_opt_skips_missing_values() {
        let data = UpdateData::new()
            .set_opt("name", Some("New"))
            .set_opt::<i32>("numEmployees", None);
        assert_eq!(data.len(), 1);
    }
}
