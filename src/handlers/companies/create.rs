// handlers/companies/create.rs - POST /companies handler

use axum::extract::State;

use crate::middleware::{Admin, ApiResponse, ApiResult, ValidatedJson};
use crate::models::{Company, NewCompany};
use crate::state::AppState;

/// POST /companies - 201 `{ company }`
pub async fn company_create(
    State(state): State<AppState>,
    Admin(admin): Admin,
    ValidatedJson(data): ValidatedJson<NewCompany>,
) -> ApiResult<Company> {
    let company = Company::create(&state.pool, &data).await?;
    tracing::info!(handle = %company.handle, by = %admin.username, "created company");
    Ok(ApiResponse::created("company", company))
}
