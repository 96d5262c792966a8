// handlers/users/delete.rs - DELETE /users/:username handler

use axum::extract::{Path, State};

use crate::middleware::{ApiResponse, ApiResult, CorrectUserOrAdmin};
use crate::models::User;
use crate::state::AppState;

pub async fn user_delete(
    State(state): State<AppState>,
    CorrectUserOrAdmin(caller): CorrectUserOrAdmin,
    Path(username): Path<String>,
) -> ApiResult<String> {
    User::remove(&state.pool, &username).await?;
    tracing::info!(username = %username, by = %caller.username, "deleted user");
    Ok(ApiResponse::success("deleted", username))
}
