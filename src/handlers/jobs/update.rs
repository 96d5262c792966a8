// handlers/jobs/update.rs - PATCH /jobs/:id handler

use axum::extract::{Path, State};

use crate::handlers::parse_job_id;
use crate::middleware::{Admin, ApiResponse, ApiResult, ValidatedJson};
use crate::models::{Job, JobUpdate};
use crate::state::AppState;

/// PATCH /jobs/:id - any of `{ title, salary, equity }`
pub async fn job_update(
    State(state): State<AppState>,
    Admin(_): Admin,
    Path(id): Path<String>,
    ValidatedJson(data): ValidatedJson<JobUpdate>,
) -> ApiResult<Job> {
    let job = Job::update(&state.pool, parse_job_id(&id)?, &data).await?;
    Ok(ApiResponse::success("job", job))
}
