use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    middleware::from_fn,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config;
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::handlers::{auth, companies, jobs, users};
use crate::middleware::{authenticate_jwt, validate_company_query, validate_job_query};
use crate::state::AppState;

/// The full HTTP application
pub fn app(state: AppState) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_routes())
        // Resources
        .merge(company_routes())
        .merge(job_routes())
        .merge(user_routes())
        .fallback(not_found)
        // Global middleware
        .layer(from_fn(authenticate_jwt))
        .layer(cors_layer());

    let router = if config::config().api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };
    router.with_state(state)
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/token", post(auth::token_post))
        .route("/auth/register", post(auth::register_post))
}

fn company_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/companies",
            get(companies::company_list)
                .route_layer(from_fn(validate_company_query))
                .post(companies::company_create),
        )
        .route(
            "/companies/:handle",
            get(companies::company_show)
                .patch(companies::company_update)
                .delete(companies::company_delete),
        )
}

fn job_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/jobs",
            get(jobs::job_list)
                .route_layer(from_fn(validate_job_query))
                .post(jobs::job_create),
        )
        .route(
            "/jobs/:id",
            get(jobs::job_show)
                .patch(jobs::job_update)
                .delete(jobs::job_delete),
        )
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::user_list).post(users::user_create))
        .route(
            "/users/:username",
            get(users::user_show)
                .patch(users::user_update)
                .delete(users::user_delete),
        )
        .route("/users/:username/jobs/:id", post(users::user_apply))
}

fn cors_layer() -> CorsLayer {
    let security = &config::config().security;
    if !security.enable_cors {
        return CorsLayer::new();
    }
    if security.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    CorsLayer::permissive().allow_origin(origins)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Jobly API",
        "version": version,
        "endpoints": {
            "auth": "/auth/token, /auth/register (public)",
            "companies": "/companies[/:handle] (read public, write admin)",
            "jobs": "/jobs[/:id] (read public, write admin)",
            "users": "/users[/:username[/jobs/:id]] (admin or account owner)",
            "health": "/health (public)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}

async fn not_found() -> ApiError {
    ApiError::not_found("Not Found")
}
