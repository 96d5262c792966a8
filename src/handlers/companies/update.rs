// handlers/companies/update.rs - PATCH /companies/:handle handler

use axum::extract::{Path, State};

use crate::middleware::{Admin, ApiResponse, ApiResult, ValidatedJson};
use crate::models::{Company, CompanyUpdate};
use crate::state::AppState;

/// PATCH /companies/:handle - any of `{ name, description, numEmployees, logoUrl }`
pub async fn company_update(
    State(state): State<AppState>,
    Admin(_): Admin,
    Path(handle): Path<String>,
    ValidatedJson(data): ValidatedJson<CompanyUpdate>,
) -> ApiResult<Company> {
    let company = Company::update(&state.pool, &handle, &data).await?;
    Ok(ApiResponse::success("company", company))
}
