// handlers/users/list.rs - GET /users handler

use axum::extract::State;

use crate::middleware::{Admin, ApiResponse, ApiResult};
use crate::models::User;
use crate::state::AppState;

pub async fn user_list(State(state): State<AppState>, Admin(_): Admin) -> ApiResult<Vec<User>> {
    let users = User::find_all(&state.pool).await?;
    Ok(ApiResponse::success("users", users))
}
