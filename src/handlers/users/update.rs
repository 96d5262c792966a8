// handlers/users/update.rs - PATCH /users/:username handler

use axum::extract::{Path, State};

use crate::middleware::{ApiResponse, ApiResult, CorrectUserOrAdmin, ValidatedJson};
use crate::models::{User, UserUpdate};
use crate::state::AppState;

/// PATCH /users/:username - any of `{ firstName, lastName, password, email }`
pub async fn user_update(
    State(state): State<AppState>,
    CorrectUserOrAdmin(_): CorrectUserOrAdmin,
    Path(username): Path<String>,
    ValidatedJson(data): ValidatedJson<UserUpdate>,
) -> ApiResult<User> {
    let user = User::update(&state.pool, &username, &data).await?;
    Ok(ApiResponse::success("user", user))
}
