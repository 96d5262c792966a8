use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::database::sql::{bind_value_query_as, sql_for_partial_update, UpdateData};
use crate::filter::CompanyFilter;

use super::validate::{http_url, lowercase_handle, Validate};
use super::{is_unique_violation, ModelError};

const COLUMNS: &str = "handle, name, description, num_employees, logo_url";

/// API field -> column translation for partial updates
const JS_TO_SQL: &[(&str, &str)] = &[("numEmployees", "num_employees"), ("logoUrl", "logo_url")];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// A company together with the jobs it offers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<CompanyJob>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct CompanyJob {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCompany {
    #[validate(
        length(min = 1, max = 25, message = "handle must be between 1 and 25 characters"),
        custom(function = "lowercase_handle", message = "handle must be lowercase without spaces")
    )]
    pub handle: String,
    #[validate(length(min = 1, max = 50, message = "name must be between 1 and 50 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: String,
    #[validate(range(min = 0, message = "numEmployees must be greater than or equal to 0"))]
    pub num_employees: Option<i32>,
    #[validate(
        url(message = "logoUrl must be an http(s) URL"),
        custom(function = "http_url", message = "logoUrl must be an http(s) URL")
    )]
    pub logo_url: Option<String>,
}

/// Fields that may change on an existing company; the handle is fixed
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyUpdate {
    #[validate(length(min = 1, max = 50, message = "name must be between 1 and 50 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,
    #[validate(range(min = 0, message = "numEmployees must be greater than or equal to 0"))]
    pub num_employees: Option<i32>,
    #[validate(
        url(message = "logoUrl must be an http(s) URL"),
        custom(function = "http_url", message = "logoUrl must be an http(s) URL")
    )]
    pub logo_url: Option<String>,
}

impl CompanyUpdate {
    pub fn to_update_data(&self) -> UpdateData {
        UpdateData::new()
            .set_opt("name", self.name.clone())
            .set_opt("description", self.description.clone())
            .set_opt("numEmployees", self.num_employees)
            .set_opt("logoUrl", self.logo_url.clone())
    }
}

impl Company {
    /// Insert a company. Fails with InvalidInput if the handle or name is taken.
    pub async fn create(pool: &PgPool, data: &NewCompany) -> Result<Company, ModelError> {
        let duplicate = sqlx::query_scalar::<_, String>("SELECT handle FROM companies WHERE handle = $1")
            .bind(&data.handle)
            .fetch_optional(pool)
            .await?;
        if duplicate.is_some() {
            return Err(ModelError::InvalidInput(format!("Duplicate company: {}", data.handle)));
        }

        let sql = format!(
            "INSERT INTO companies ({COLUMNS}) VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Company>(&sql)
            .bind(&data.handle)
            .bind(&data.name)
            .bind(&data.description)
            .bind(data.num_employees)
            .bind(&data.logo_url)
            .fetch_one(pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ModelError::InvalidInput(format!("Duplicate company name: {}", data.name))
                } else {
                    e.into()
                }
            })
    }

    /// All companies matching `filter`, ordered by handle
    pub async fn find_all(pool: &PgPool, filter: &CompanyFilter) -> Result<Vec<Company>, ModelError> {
        let where_sql = filter.to_where_sql()?;
        let sql = format!(
            "SELECT {COLUMNS} FROM companies {} ORDER BY handle",
            where_sql.query
        );
        tracing::debug!(sql = %sql, params = where_sql.params.len(), "listing companies");

        let mut q = sqlx::query_as::<_, Company>(&sql);
        for p in where_sql.params.iter() {
            q = bind_value_query_as(q, p);
        }
        Ok(q.fetch_all(pool).await?)
    }

    pub async fn get(pool: &PgPool, handle: &str) -> Result<CompanyDetail, ModelError> {
        let sql = format!("SELECT {COLUMNS} FROM companies WHERE handle = $1");
        let company = sqlx::query_as::<_, Company>(&sql)
            .bind(handle)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| ModelError::NotFound(format!("No company: {}", handle)))?;

        let jobs = sqlx::query_as::<_, CompanyJob>(
            "SELECT id, title, salary, equity FROM jobs WHERE company_handle = $1 ORDER BY id",
        )
        .bind(handle)
        .fetch_all(pool)
        .await?;

        Ok(CompanyDetail { company, jobs })
    }

    /// Apply a partial update; only the supplied fields change
    pub async fn update(pool: &PgPool, handle: &str, data: &CompanyUpdate) -> Result<Company, ModelError> {
        let set = sql_for_partial_update(&data.to_update_data(), JS_TO_SQL)?;
        let sql = format!(
            "UPDATE companies SET {} WHERE handle = {} RETURNING {COLUMNS}",
            set.set_cols,
            set.next_placeholder()
        );

        let mut q = sqlx::query_as::<_, Company>(&sql);
        for p in set.values.iter() {
            q = bind_value_query_as(q, p);
        }
        q.bind(handle)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ModelError::InvalidInput("Duplicate company name".to_string())
                } else {
                    e.into()
                }
            })?
            .ok_or_else(|| ModelError::NotFound(format!("No company: {}", handle)))
    }

    pub async fn remove(pool: &PgPool, handle: &str) -> Result<(), ModelError> {
        let result = sqlx::query("DELETE FROM companies WHERE handle = $1")
            .bind(handle)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ModelError::NotFound(format!("No company: {}", handle)));
        }
        Ok(())
    }
}
