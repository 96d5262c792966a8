use std::collections::HashMap;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path, Request},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::{decode_token, Claims};
use crate::error::ApiError;

/// Identity carried by a valid bearer token
#[derive(Clone, Debug, PartialEq)]
pub struct AuthUser {
    pub username: String,
    pub is_admin: bool,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.username,
            is_admin: claims.is_admin,
        }
    }
}

/// Attach an [`AuthUser`] to the request when a valid bearer token is present.
///
/// Never rejects: a missing or bad token just leaves the request anonymous and
/// the route guards decide.
pub async fn authenticate_jwt(mut request: Request, next: Next) -> Response {
    if let Some(token) = extract_jwt_from_headers(request.headers()) {
        match decode_token(&token) {
            Ok(claims) => {
                request.extensions_mut().insert(AuthUser::from(claims));
            }
            Err(e) => tracing::debug!("ignoring bearer token: {}", e),
        }
    }
    next.run(request).await
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Option<String> {
    let auth_str = headers.get(axum::http::header::AUTHORIZATION)?.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

fn unauthorized() -> ApiError {
    ApiError::unauthorized("Unauthorized")
}

pub fn ensure_logged_in(user: Option<&AuthUser>) -> Result<&AuthUser, ApiError> {
    user.ok_or_else(unauthorized)
}

pub fn ensure_admin(user: Option<&AuthUser>) -> Result<&AuthUser, ApiError> {
    let user = ensure_logged_in(user)?;
    if !user.is_admin {
        tracing::debug!(username = %user.username, "admin required");
        return Err(unauthorized());
    }
    Ok(user)
}

/// Admins may act on anyone; other users only on themselves
pub fn ensure_correct_user_or_admin<'a>(
    user: Option<&'a AuthUser>,
    username: &str,
) -> Result<&'a AuthUser, ApiError> {
    let user = ensure_logged_in(user)?;
    if !user.is_admin && user.username != username {
        tracing::debug!(username = %user.username, target = %username, "not the account owner");
        return Err(unauthorized());
    }
    Ok(user)
}

/// Extractor for routes restricted to admins
#[derive(Debug, Clone)]
pub struct Admin(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for Admin
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        ensure_admin(parts.extensions.get::<AuthUser>())
            .cloned()
            .map(Admin)
    }
}

/// Extractor for `/users/:username/...` routes: the named user or an admin
#[derive(Debug, Clone)]
pub struct CorrectUserOrAdmin(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for CorrectUserOrAdmin
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = ensure_logged_in(parts.extensions.get::<AuthUser>())?.clone();
        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|_| unauthorized())?;
        let username = params.get("username").ok_or_else(unauthorized)?;

        ensure_correct_user_or_admin(Some(&user), username)?;
        Ok(CorrectUserOrAdmin(user))
    }
}
