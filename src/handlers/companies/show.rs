// handlers/companies/show.rs - GET /companies/:handle handler

use axum::extract::{Path, State};

use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{Company, CompanyDetail};
use crate::state::AppState;

/// GET /companies/:handle - `{ company }` including its jobs
pub async fn company_show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> ApiResult<CompanyDetail> {
    let company = Company::get(&state.pool, &handle).await?;
    Ok(ApiResponse::success("company", company))
}
