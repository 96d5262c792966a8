// handlers/auth/token.rs - POST /auth/token handler

use axum::extract::State;

use crate::auth::create_token;
use crate::middleware::{ApiResponse, ApiResult, ValidatedJson};
use crate::models::{Credentials, User};
use crate::state::AppState;

/// POST /auth/token - exchange `{ username, password }` for `{ token }`
pub async fn token_post(
    State(state): State<AppState>,
    ValidatedJson(credentials): ValidatedJson<Credentials>,
) -> ApiResult<String> {
    let user = User::authenticate(&state.pool, &credentials.username, &credentials.password).await?;
    let token = create_token(&user)?;
    tracing::info!(username = %user.username, "issued token");
    Ok(ApiResponse::success("token", token))
}
