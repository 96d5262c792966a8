// handlers/jobs/show.rs - GET /jobs/:id handler

use axum::extract::{Path, State};

use crate::handlers::parse_job_id;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::Job;
use crate::state::AppState;

pub async fn job_show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Job> {
    let job = Job::get(&state.pool, parse_job_id(&id)?).await?;
    Ok(ApiResponse::success("job", job))
}
