use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::database::sql::{bind_value_query_as, sql_for_partial_update, UpdateData};
use crate::filter::JobFilter;

use super::validate::{fraction, Validate};
use super::{is_foreign_key_violation, ModelError};

const COLUMNS: &str = "id, title, salary, equity, company_handle";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    #[validate(length(min = 1, max = 100, message = "title must be between 1 and 100 characters"))]
    pub title: String,
    #[validate(range(min = 0, message = "salary must be greater than or equal to 0"))]
    pub salary: Option<i32>,
    #[validate(custom(function = "fraction", message = "equity must be between 0 and 1"))]
    pub equity: Option<Decimal>,
    #[validate(length(min = 1, max = 25, message = "companyHandle must be between 1 and 25 characters"))]
    pub company_handle: String,
}

/// The id and owning company never change
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct JobUpdate {
    #[validate(length(min = 1, max = 100, message = "title must be between 1 and 100 characters"))]
    pub title: Option<String>,
    #[validate(range(min = 0, message = "salary must be greater than or equal to 0"))]
    pub salary: Option<i32>,
    #[validate(custom(function = "fraction", message = "equity must be between 0 and 1"))]
    pub equity: Option<Decimal>,
}

impl JobUpdate {
    pub fn to_update_data(&self) -> UpdateData {
        UpdateData::new()
            .set_opt("title", self.title.clone())
            .set_opt("salary", self.salary)
            .set_opt("equity", self.equity)
    }
}

impl Job {
    pub async fn create(pool: &PgPool, data: &NewJob) -> Result<Job, ModelError> {
        let sql = format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&sql)
            .bind(&data.title)
            .bind(data.salary)
            .bind(data.equity)
            .bind(&data.company_handle)
            .fetch_one(pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    ModelError::NotFound(format!("No company: {}", data.company_handle))
                } else {
                    e.into()
                }
            })
    }

    /// All jobs matching `filter`, ordered by id
    pub async fn find_all(pool: &PgPool, filter: &JobFilter) -> Result<Vec<Job>, ModelError> {
        let where_sql = filter.to_where_sql()?;
        let sql = format!("SELECT {COLUMNS} FROM jobs {} ORDER BY id", where_sql.query);
        tracing::debug!(sql = %sql, params = where_sql.params.len(), "listing jobs");

        let mut q = sqlx::query_as::<_, Job>(&sql);
        for p in where_sql.params.iter() {
            q = bind_value_query_as(q, p);
        }
        Ok(q.fetch_all(pool).await?)
    }

    pub async fn get(pool: &PgPool, id: i32) -> Result<Job, ModelError> {
        let sql = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1");
        sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| ModelError::NotFound(format!("No job: {}", id)))
    }

    pub async fn update(pool: &PgPool, id: i32, data: &JobUpdate) -> Result<Job, ModelError> {
        let set = sql_for_partial_update(&data.to_update_data(), &[])?;
        let sql = format!(
            "UPDATE jobs SET {} WHERE id = {} RETURNING {COLUMNS}",
            set.set_cols,
            set.next_placeholder()
        );

        let mut q = sqlx::query_as::<_, Job>(&sql);
        for p in set.values.iter() {
            q = bind_value_query_as(q, p);
        }
        q.bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| ModelError::NotFound(format!("No job: {}", id)))
    }

    pub async fn remove(pool: &PgPool, id: i32) -> Result<(), ModelError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ModelError::NotFound(format!("No job: {}", id)));
        }
        Ok(())
    }
}
