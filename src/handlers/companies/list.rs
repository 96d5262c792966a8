// handlers/companies/list.rs - GET /companies handler

use axum::extract::{Extension, State};

use crate::filter::CompanyFilter;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::Company;
use crate::state::AppState;

/// GET /companies?name=&minEmployees=&maxEmployees= - `{ companies: [...] }`
///
/// The filter is parsed by `validate_company_query`, which must wrap this route.
pub async fn company_list(
    State(state): State<AppState>,
    Extension(filter): Extension<CompanyFilter>,
) -> ApiResult<Vec<Company>> {
    let companies = Company::find_all(&state.pool, &filter).await?;
    Ok(ApiResponse::success("companies", companies))
}
