use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use validator::ValidationErrors;

use crate::auth::password::{hash_password, verify_password};
use crate::database::sql::{bind_value_query_as, sql_for_partial_update, UpdateData};

use super::validate::Validate;
use super::{is_foreign_key_violation, is_unique_violation, ModelError};

const COLUMNS: &str = "username, first_name, last_name, email, is_admin";

const JS_TO_SQL: &[(&str, &str)] = &[("firstName", "first_name"), ("lastName", "last_name")];

/// Public view of a user; the password hash never leaves the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDetail {
    #[serde(flatten)]
    pub user: User,
    /// ids of the jobs this user applied to
    pub jobs: Vec<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Credentials {
    #[validate(length(min = 1, max = 25, message = "username must be between 1 and 25 characters"))]
    pub username: String,
    #[validate(length(min = 1, max = 20, message = "password must be between 1 and 20 characters"))]
    pub password: String,
}

/// Admin-created user, possibly an admin
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewUser {
    #[validate(length(min = 1, max = 25, message = "username must be between 1 and 25 characters"))]
    pub username: String,
    #[validate(length(min = 5, max = 20, message = "password must be between 5 and 20 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 30, message = "firstName must be between 1 and 30 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 30, message = "lastName must be between 1 and 30 characters"))]
    pub last_name: String,
    #[validate(
        length(min = 6, max = 60, message = "email must be between 6 and 60 characters"),
        email(message = "email must be a valid email address")
    )]
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Self-service sign up; never an admin
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserRegistration {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<UserRegistration> for NewUser {
    fn from(r: UserRegistration) -> Self {
        NewUser {
            username: r.username,
            password: r.password,
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            is_admin: false,
        }
    }
}

/// Sign up carries the same rules as an admin-created account
impl Validate for UserRegistration {
    fn validate(&self) -> Result<(), ValidationErrors> {
        NewUser::from(self.clone()).validate()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserUpdate {
    #[validate(length(min = 1, max = 30, message = "firstName must be between 1 and 30 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 30, message = "lastName must be between 1 and 30 characters"))]
    pub last_name: Option<String>,
    #[validate(length(min = 5, max = 20, message = "password must be between 5 and 20 characters"))]
    pub password: Option<String>,
    #[validate(
        length(min = 6, max = 60, message = "email must be between 6 and 60 characters"),
        email(message = "email must be a valid email address")
    )]
    pub email: Option<String>,
}

#[derive(FromRow)]
struct UserWithPassword {
    #[sqlx(flatten)]
    user: User,
    password: String,
}

impl User {
    /// Check a username/password pair. Unknown users and wrong passwords fail the same way.
    pub async fn authenticate(pool: &PgPool, username: &str, password: &str) -> Result<User, ModelError> {
        let sql = format!("SELECT {COLUMNS}, password FROM users WHERE username = $1");
        let row = sqlx::query_as::<_, UserWithPassword>(&sql)
            .bind(username)
            .fetch_optional(pool)
            .await?;

        if let Some(row) = row {
            if verify_password(password, &row.password)? {
                return Ok(row.user);
            }
        }
        tracing::debug!(username = %username, "authentication failed");
        Err(ModelError::Unauthorized("Invalid username/password".to_string()))
    }

    pub async fn register(pool: &PgPool, data: &NewUser) -> Result<User, ModelError> {
        let duplicate = sqlx::query_scalar::<_, String>("SELECT username FROM users WHERE username = $1")
            .bind(&data.username)
            .fetch_optional(pool)
            .await?;
        if duplicate.is_some() {
            return Err(ModelError::InvalidInput(format!("Duplicate username: {}", data.username)));
        }

        let hashed = hash_password(&data.password)?;
        let sql = format!(
            "INSERT INTO users (username, password, first_name, last_name, email, is_admin) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(&data.username)
            .bind(&hashed)
            .bind(&data.first_name)
            .bind(&data.last_name)
            .bind(&data.email)
            .bind(data.is_admin)
            .fetch_one(pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ModelError::InvalidInput(format!("Duplicate username: {}", data.username))
                } else {
                    e.into()
                }
            })
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<User>, ModelError> {
        let sql = format!("SELECT {COLUMNS} FROM users ORDER BY username");
        Ok(sqlx::query_as::<_, User>(&sql).fetch_all(pool).await?)
    }

    pub async fn get(pool: &PgPool, username: &str) -> Result<UserDetail, ModelError> {
        let sql = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| ModelError::NotFound(format!("No user: {}", username)))?;

        let jobs = sqlx::query_scalar::<_, i32>(
            "SELECT job_id FROM applications WHERE username = $1 ORDER BY job_id",
        )
        .bind(username)
        .fetch_all(pool)
        .await?;

        Ok(UserDetail { user, jobs })
    }

    /// Partial update. A supplied password is hashed before it is stored.
    pub async fn update(pool: &PgPool, username: &str, data: &UserUpdate) -> Result<User, ModelError> {
        let mut update = UpdateData::new()
            .set_opt("firstName", data.first_name.clone())
            .set_opt("lastName", data.last_name.clone())
            .set_opt("email", data.email.clone());
        if let Some(password) = &data.password {
            update.insert("password", hash_password(password)?);
        }

        let set = sql_for_partial_update(&update, JS_TO_SQL)?;
        let sql = format!(
            "UPDATE users SET {} WHERE username = {} RETURNING {COLUMNS}",
            set.set_cols,
            set.next_placeholder()
        );

        let mut q = sqlx::query_as::<_, User>(&sql);
        for p in set.values.iter() {
            q = bind_value_query_as(q, p);
        }
        q.bind(username)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| ModelError::NotFound(format!("No user: {}", username)))
    }

    pub async fn remove(pool: &PgPool, username: &str) -> Result<(), ModelError> {
        let result = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ModelError::NotFound(format!("No user: {}", username)));
        }
        Ok(())
    }

    /// Record an application. Applying twice is a no-op.
    pub async fn apply_to_job(pool: &PgPool, username: &str, job_id: i32) -> Result<(), ModelError> {
        let job = sqlx::query_scalar::<_, i32>("SELECT id FROM jobs WHERE id = $1")
            .bind(job_id)
            .fetch_optional(pool)
            .await?;
        if job.is_none() {
            return Err(ModelError::NotFound(format!("No job: {}", job_id)));
        }

        let user = sqlx::query_scalar::<_, String>("SELECT username FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(pool)
            .await?;
        if user.is_none() {
            return Err(ModelError::NotFound(format!("No user: {}", username)));
        }

        sqlx::query(
            "INSERT INTO applications (username, job_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(username)
        .bind(job_id)
        .execute(pool)
        .await
        .map_err(|e| {
            // row vanished between the checks and the insert
            if is_foreign_key_violation(&e) {
                ModelError::NotFound(format!("No job: {}", job_id))
            } else {
                e.into()
            }
        })?;
        Ok(())
    }
}
