// handlers/jobs/list.rs - GET /jobs handler

use axum::extract::{Extension, State};

use crate::filter::JobFilter;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::Job;
use crate::state::AppState;

/// GET /jobs?title=&minSalary=&hasEquity= - `{ jobs: [...] }`
pub async fn job_list(
    State(state): State<AppState>,
    Extension(filter): Extension<JobFilter>,
) -> ApiResult<Vec<Job>> {
    let jobs = Job::find_all(&state.pool, &filter).await?;
    Ok(ApiResponse::success("jobs", jobs))
}
