use crate::database::SqlValue;

use super::error::FilterError;
use super::types::SqlResult;

/// Accumulates AND-joined predicates with `$n` placeholders numbered from 1
#[derive(Debug, Default)]
pub struct FilterWhere {
    conditions: Vec<String>,
    param_values: Vec<SqlValue>,
}

impl FilterWhere {
    pub fn new() -> Self {
        Self::default()
    }

    /// `"column" ILIKE '%needle%'`, with LIKE wildcards in the needle matched literally
    pub fn contains_ci(&mut self, column: &str, needle: &str) -> Result<&mut Self, FilterError> {
        let quoted = Self::quote(column)?;
        let pattern = format!("%{}%", Self::escape_like(needle));
        let placeholder = self.param(pattern.into());
        self.conditions.push(format!("{} ILIKE {}", quoted, placeholder));
        Ok(self)
    }

    pub fn gte(&mut self, column: &str, value: impl Into<SqlValue>) -> Result<&mut Self, FilterError> {
        self.compare(column, ">=", value.into())
    }

    pub fn lte(&mut self, column: &str, value: impl Into<SqlValue>) -> Result<&mut Self, FilterError> {
        self.compare(column, "<=", value.into())
    }

    /// `"column" > 0`, no parameter consumed
    pub fn positive(&mut self, column: &str) -> Result<&mut Self, FilterError> {
        let quoted = Self::quote(column)?;
        self.conditions.push(format!("{} > 0", quoted));
        Ok(self)
    }

    /// `WHERE a AND b ...`, or an empty string when nothing was added
    pub fn build(self) -> SqlResult {
        let query = if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        };
        SqlResult { query, params: self.param_values }
    }

    fn compare(&mut self, column: &str, op: &str, value: SqlValue) -> Result<&mut Self, FilterError> {
        let quoted = Self::quote(column)?;
        let placeholder = self.param(value);
        self.conditions.push(format!("{} {} {}", quoted, op, placeholder));
        Ok(self)
    }

    fn param(&mut self, value: SqlValue) -> String {
        self.param_values.push(value);
        format!("${}", self.param_values.len())
    }

    fn quote(column: &str) -> Result<String, FilterError> {
        let valid = column
            .chars()
            .next()
            .map(|c| c.is_ascii_alphabetic() || c == '_')
            .unwrap_or(false)
            && column.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(FilterError::InvalidColumn(column.to_string()));
        }
        Ok(format!("\"{}\"", column))
    }

    fn escape_like(needle: &str) -> String {
        let mut out = String::with_capacity(needle.len());
        for c in needle.chars() {
            if matches!(c, '%' | '_' | '\\') {
                out.push('\\');
            }
            out.push(c);
        }
        out
    }
}
