// handlers/users/show.rs - GET /users/:username handler

use axum::extract::{Path, State};

use crate::middleware::{ApiResponse, ApiResult, CorrectUserOrAdmin};
use crate::models::{User, UserDetail};
use crate::state::AppState;

/// GET /users/:username - `{ user }` with the ids of jobs applied to
pub async fn user_show(
    State(state): State<AppState>,
    CorrectUserOrAdmin(_): CorrectUserOrAdmin,
    Path(username): Path<String>,
) -> ApiResult<UserDetail> {
    let user = User::get(&state.pool, &username).await?;
    Ok(ApiResponse::success("user", user))
}
