// handlers/jobs/delete.rs - DELETE /jobs/:id handler

use axum::extract::{Path, State};

use crate::handlers::parse_job_id;
use crate::middleware::{Admin, ApiResponse, ApiResult};
use crate::models::Job;
use crate::state::AppState;

/// DELETE /jobs/:id - `{ deleted: "<id>" }`
pub async fn job_delete(
    State(state): State<AppState>,
    Admin(admin): Admin,
    Path(id): Path<String>,
) -> ApiResult<String> {
    let job_id = parse_job_id(&id)?;
    Job::remove(&state.pool, job_id).await?;
    tracing::info!(id = job_id, by = %admin.username, "deleted job");
    Ok(ApiResponse::success("deleted", job_id.to_string()))
}
