pub mod company;
pub mod job;
pub mod user;
pub mod validate;

use thiserror::Error;

use crate::filter::FilterError;

pub use company::{Company, CompanyDetail, CompanyJob, CompanyUpdate, NewCompany};
pub use job::{Job, JobUpdate, NewJob};
pub use user::{Credentials, NewUser, User, UserDetail, UserRegistration, UserUpdate};
pub use validate::Validate;

/// Errors raised by the resource models
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl From<FilterError> for ModelError {
    fn from(err: FilterError) -> Self {
        ModelError::InvalidInput(err.to_string())
    }
}

impl From<crate::auth::password::PasswordError> for ModelError {
    fn from(err: crate::auth::password::PasswordError) -> Self {
        ModelError::PasswordHash(err.to_string())
    }
}

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION))
}

pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some(FOREIGN_KEY_VIOLATION))
}
