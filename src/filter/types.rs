use serde::{Deserialize, Serialize};

use crate::database::SqlValue;

/// Optional constraints for listing companies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyFilter {
    /// Case-insensitive substring of the company name
    pub name: Option<String>,
    pub min_employees: Option<i32>,
    pub max_employees: Option<i32>,
}

/// Optional constraints for listing jobs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFilter {
    /// Case-insensitive substring of the job title
    pub title: Option<String>,
    pub min_salary: Option<i32>,
    /// `true` keeps only jobs with non-zero equity; `false` is the same as absent
    pub has_equity: Option<bool>,
}

/// A WHERE clause (possibly empty) and the values for its placeholders
#[derive(Debug, Clone, PartialEq)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<SqlValue>,
}
