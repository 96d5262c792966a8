// handlers/auth/register.rs - POST /auth/register handler

use axum::extract::State;

use crate::auth::create_token;
use crate::middleware::{ApiResponse, ApiResult, ValidatedJson};
use crate::models::{NewUser, User, UserRegistration};
use crate::state::AppState;

/// POST /auth/register - self-service sign up, never creates an admin.
///
/// Returns 201 `{ token }` for the new account.
pub async fn register_post(
    State(state): State<AppState>,
    ValidatedJson(registration): ValidatedJson<UserRegistration>,
) -> ApiResult<String> {
    let user = User::register(&state.pool, &NewUser::from(registration)).await?;
    let token = create_token(&user)?;
    tracing::info!(username = %user.username, "registered user");
    Ok(ApiResponse::created("token", token))
}
