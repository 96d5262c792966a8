use super::error::FilterError;
use super::filter_where::FilterWhere;
use super::types::{CompanyFilter, JobFilter, SqlResult};

impl CompanyFilter {
    pub fn to_where_sql(&self) -> Result<SqlResult, FilterError> {
        if let (Some(min), Some(max)) = (self.min_employees, self.max_employees) {
            if min > max {
                return Err(FilterError::InvalidRange {
                    min: "minEmployees",
                    max: "maxEmployees",
                });
            }
        }

        let mut w = FilterWhere::new();
        if let Some(name) = &self.name {
            w.contains_ci("name", name)?;
        }
        if let Some(min) = self.min_employees {
            w.gte("num_employees", min)?;
        }
        if let Some(max) = self.max_employees {
            w.lte("num_employees", max)?;
        }
        Ok(w.build())
    }
}

impl JobFilter {
    pub fn to_where_sql(&self) -> Result<SqlResult, FilterError> {
        let mut w = FilterWhere::new();
        if let Some(title) = &self.title {
            w.contains_ci("title", title)?;
        }
        if let Some(min) = self.min_salary {
            w.gte("salary", min)?;
        }
        if self.has_equity == Some(true) {
            w.positive("equity")?;
        }
        Ok(w.build())
    }
}
