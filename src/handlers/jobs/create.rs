// handlers/jobs/create.rs - POST /jobs handler

use axum::extract::State;

use crate::middleware::{Admin, ApiResponse, ApiResult, ValidatedJson};
use crate::models::{Job, NewJob};
use crate::state::AppState;

/// POST /jobs - `{ title, salary, equity, companyHandle }` => 201 `{ job }`
pub async fn job_create(
    State(state): State<AppState>,
    Admin(admin): Admin,
    ValidatedJson(data): ValidatedJson<NewJob>,
) -> ApiResult<Job> {
    let job = Job::create(&state.pool, &data).await?;
    tracing::info!(id = job.id, company = %job.company_handle, by = %admin.username, "created job");
    Ok(ApiResponse::created("job", job))
}
