// handlers/companies/delete.rs - DELETE /companies/:handle handler

use axum::extract::{Path, State};

use crate::middleware::{Admin, ApiResponse, ApiResult};
use crate::models::Company;
use crate::state::AppState;

/// DELETE /companies/:handle - `{ deleted: handle }`; the company's jobs go with it
pub async fn company_delete(
    State(state): State<AppState>,
    Admin(admin): Admin,
    Path(handle): Path<String>,
) -> ApiResult<String> {
    Company::remove(&state.pool, &handle).await?;
    tracing::info!(handle = %handle, by = %admin.username, "deleted company");
    Ok(ApiResponse::success("deleted", handle))
}
