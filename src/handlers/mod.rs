// handlers/mod.rs - Route handlers, one module per resource
//
// Guards run as extractors ahead of the body, so an unauthorized caller is
// rejected before its payload is validated.

pub mod auth;
pub mod companies;
pub mod jobs;
pub mod users;

use crate::error::ApiError;

/// Job ids arrive as path text; anything that is not an id cannot name a job
pub(crate) fn parse_job_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>()
        .map_err(|_| ApiError::not_found(format!("No job: {}", raw)))
}
