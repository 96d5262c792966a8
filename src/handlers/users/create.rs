// handlers/users/create.rs - POST /users handler

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::auth::create_token;
use crate::error::ApiError;
use crate::middleware::{Admin, ValidatedJson};
use crate::models::{NewUser, User};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreatedUser {
    pub user: User,
    pub token: String,
}

/// POST /users - admin adds a user (who may be an admin).
///
/// Unlike /auth/register this returns the user as well as a token for them.
pub async fn user_create(
    State(state): State<AppState>,
    Admin(admin): Admin,
    ValidatedJson(data): ValidatedJson<NewUser>,
) -> Result<(StatusCode, Json<CreatedUser>), ApiError> {
    let user = User::register(&state.pool, &data).await?;
    let token = create_token(&user)?;
    tracing::info!(username = %user.username, is_admin = user.is_admin, by = %admin.username, "created user");
    Ok((StatusCode::CREATED, Json(CreatedUser { user, token })))
}
