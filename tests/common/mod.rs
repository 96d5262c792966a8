#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Once;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};
use tower::ServiceExt;
use tracing_subscriber::EnvFilter;

use jobly_api::auth::{generate_jwt, Claims};
use jobly_api::config::DatabaseConfig;
use jobly_api::database::{schema, DatabaseManager};
use jobly_api::models::{Company, Job, NewCompany, NewJob, NewUser, User};
use jobly_api::{app, AppState};

static INIT: Once = Once::new();

/// Must run before anything reads the config
pub fn init() {
    INIT.call_once(|| {
        std::env::set_var("APP_ENV", "test");
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
            .with_test_writer()
            .try_init();
    });
}

/// Router over a pool that never connects. Only for requests that are
/// answered before any query runs.
pub fn lazy_app() -> Result<Router> {
    init();
    let config = DatabaseConfig {
        url: "postgresql:///jobly_unused".to_string(),
        max_connections: 1,
        connection_timeout: 1,
    };
    let pool = DatabaseManager::connect_lazy(&config)?;
    Ok(app(AppState::new(pool)))
}

pub fn token_for(username: &str, is_admin: bool) -> String {
    init();
    generate_jwt(&Claims::new(username.to_string(), is_admin)).expect("test token")
}

pub fn u1_token() -> String {
    token_for("u1", false)
}

pub fn u2_token() -> String {
    token_for("u2", false)
}

pub fn admin_token() -> String {
    token_for("admin", true)
}

/// Send one request through the router, returning status and parsed JSON body
/// (`Value::Null` for an empty body).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    Ok((status, json))
}

/// A seeded database living in its own schema
pub struct TestDb {
    pub pool: PgPool,
    pub app: Router,
    /// ids of J1, J2, J3
    pub job_ids: Vec<i32>,
    admin_pool: PgPool,
    schema: String,
}

impl TestDb {
    /// `None` when TEST_DATABASE_URL is unset, so DB suites pass as no-ops
    pub async fn setup() -> Result<Option<TestDb>> {
        init();
        let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
            eprintln!("TEST_DATABASE_URL not set; skipping database test");
            return Ok(None);
        };

        let schema_name = format!("jobly_test_{}_{}", std::process::id(), rand::random::<u32>());
        let admin_pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(&url)
            .await
            .context("connect TEST_DATABASE_URL")?;
        sqlx::query(&format!("CREATE SCHEMA \"{}\"", schema_name))
            .execute(&admin_pool)
            .await?;

        let options = PgConnectOptions::from_str(&url)?.options([("search_path", schema_name.as_str())]);
        let pool = PgPoolOptions::new().max_connections(5).connect_with(options).await?;
        schema::migrate(&pool).await?;
        let job_ids = seed(&pool).await?;

        Ok(Some(TestDb {
            app: app(AppState::new(pool.clone())),
            pool,
            job_ids,
            admin_pool,
            schema: schema_name,
        }))
    }

    pub async fn teardown(self) -> Result<()> {
        self.pool.close().await;
        sqlx::query(&format!("DROP SCHEMA \"{}\" CASCADE", self.schema))
            .execute(&self.admin_pool)
            .await?;
        self.admin_pool.close().await;
        Ok(())
    }
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).expect("decimal literal")
}

/// c1..c3, jobs J1..J3, users u1, u2 and admin; u1 has applied to J1
async fn seed(pool: &PgPool) -> Result<Vec<i32>> {
    for n in 1..=3 {
        Company::create(
            pool,
            &NewCompany {
                handle: format!("c{}", n),
                name: format!("C{}", n),
                description: format!("Desc{}", n),
                num_employees: Some(n),
                logo_url: Some(format!("http://c{}.img", n)),
            },
        )
        .await?;
    }

    let mut job_ids = Vec::new();
    for (title, salary, equity, handle) in [
        ("J1", 100000, "0.01", "c1"),
        ("J2", 200000, "0.02", "c1"),
        ("J3", 300000, "0", "c2"),
    ] {
        let job = Job::create(
            pool,
            &NewJob {
                title: title.to_string(),
                salary: Some(salary),
                equity: Some(dec(equity)),
                company_handle: handle.to_string(),
            },
        )
        .await?;
        job_ids.push(job.id);
    }

    for (username, is_admin) in [("u1", false), ("u2", false), ("admin", true)] {
        User::register(
            pool,
            &NewUser {
                username: username.to_string(),
                password: format!("password-{}", username),
                first_name: format!("{}F", username.to_uppercase()),
                last_name: format!("{}L", username.to_uppercase()),
                email: format!("{}@user.com", username),
                is_admin,
            },
        )
        .await?;
    }

    User::apply_to_job(pool, "u1", job_ids[0]).await?;
    Ok(job_ids)
}
