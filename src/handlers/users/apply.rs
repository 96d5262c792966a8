// handlers/users/apply.rs - POST /users/:username/jobs/:id handler

use axum::extract::{Path, State};

use crate::handlers::parse_job_id;
use crate::middleware::{ApiResponse, ApiResult, CorrectUserOrAdmin};
use crate::models::User;
use crate::state::AppState;

/// POST /users/:username/jobs/:id - 201 `{ applied: "<id>" }`
pub async fn user_apply(
    State(state): State<AppState>,
    CorrectUserOrAdmin(_): CorrectUserOrAdmin,
    Path((username, id)): Path<(String, String)>,
) -> ApiResult<String> {
    let job_id = parse_job_id(&id)?;
    User::apply_to_job(&state.pool, &username, job_id).await?;
    Ok(ApiResponse::created("applied", job_id.to_string()))
}
