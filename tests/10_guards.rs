mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

// Everything here is rejected or answered before a query runs, so no database
// is needed.

#[tokio::test]
async fn unknown_route_is_404_envelope() -> Result<()> {
    let app = common::lazy_app()?;
    let (status, body) = common::send(&app, Method::GET, "/no-such-thing", None, None).await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": { "message": "Not Found", "status": 404 } }));
    Ok(())
}

#[tokio::test]
async fn root_describes_service() -> Result<()> {
    let app = common::lazy_app()?;
    let (status, body) = common::send(&app, Method::GET, "/", None, None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Jobly API");
    Ok(())
}

#[tokio::test]
async fn admin_routes_reject_anonymous_and_regular_users() -> Result<()> {
    let app = common::lazy_app()?;
    let new_company = json!({
        "handle": "new",
        "name": "New",
        "description": "DescNew",
        "numEmployees": 10,
        "logoUrl": "http://new.img"
    });

    let (status, body) = common::send(&app, Method::POST, "/companies", None, Some(new_company.clone())).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": { "message": "Unauthorized", "status": 401 } }));

    let token = common::u1_token();
    let (status, _) = common::send(&app, Method::POST, "/companies", Some(&token), Some(new_company)).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = common::send(&app, Method::DELETE, "/jobs/1", Some(&token), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = common::send(&app, Method::GET, "/users", Some(&token), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn forged_token_is_treated_as_anonymous() -> Result<()> {
    let app = common::lazy_app()?;
    let forged = format!("{}tampered", common::admin_token());

    let (status, _) = common::send(&app, Method::GET, "/users", Some(&forged), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn user_routes_require_owner_or_admin() -> Result<()> {
    let app = common::lazy_app()?;

    let (status, _) = common::send(&app, Method::GET, "/users/u1", None, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let other = common::u2_token();
    let (status, _) = common::send(&app, Method::GET, "/users/u1", Some(&other), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = common::send(
        &app,
        Method::PATCH,
        "/users/u1",
        Some(&other),
        Some(json!({ "firstName": "Nope" })),
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = common::send(&app, Method::POST, "/users/u1/jobs/1", Some(&other), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn guard_runs_before_body_validation() -> Result<()> {
    let app = common::lazy_app()?;
    let (status, _) = common::send(&app, Method::POST, "/jobs", None, Some(json!({ "bogus": true }))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn company_query_validation() -> Result<()> {
    let app = common::lazy_app()?;

    let (status, body) = common::send(&app, Method::GET, "/companies?foo=bar", None, None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Invalid field: foo");

    let (status, body) = common::send(
        &app,
        Method::GET,
        "/companies?minEmployees=10&maxEmployees=5",
        None,
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "minEmployees cannot be greater than maxEmployees");

    let (status, body) = common::send(
        &app,
        Method::GET,
        "/companies?color=red&minEmployees=lots",
        None,
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["message"],
        "Invalid field: color, minEmployees must be a number"
    );
    Ok(())
}

#[tokio::test]
async fn job_query_validation() -> Result<()> {
    let app = common::lazy_app()?;

    let (status, body) = common::send(&app, Method::GET, "/jobs?hasEquity=maybe", None, None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "hasEquity must be 'true' or 'false'");

    let (status, body) = common::send(&app, Method::GET, "/jobs?minSalary=abc&name=x", None, None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["message"],
        "Invalid field: name, minSalary must be a number"
    );
    Ok(())
}

#[tokio::test]
async fn malformed_bodies_are_400() -> Result<()> {
    let app = common::lazy_app()?;
    let admin = common::admin_token();

    let (status, body) = common::send(
        &app,
        Method::POST,
        "/companies",
        Some(&admin),
        Some(json!({ "handle": "new" })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["status"], 400);

    let (status, body) = common::send(
        &app,
        Method::POST,
        "/companies",
        Some(&admin),
        Some(json!({
            "handle": "new",
            "name": "New",
            "description": "DescNew",
            "numEmployees": -1,
            "logoUrl": "not-a-url"
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["message"],
        "logoUrl must be an http(s) URL, numEmployees must be greater than or equal to 0"
    );

    let (status, _) = common::send(&app, Method::POST, "/auth/token", None, Some(json!({}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let u1 = common::u1_token();
    let (status, _) = common::send(
        &app,
        Method::PATCH,
        "/users/u1",
        Some(&u1),
        Some(json!({ "username": "renamed" })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn empty_patch_is_no_data() -> Result<()> {
    let app = common::lazy_app()?;
    let admin = common::admin_token();

    let (status, body) = common::send(&app, Method::PATCH, "/companies/c1", Some(&admin), Some(json!({}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "No data");
    Ok(())
}

#[tokio::test]
async fn non_numeric_job_ids_are_not_found() -> Result<()> {
    let app = common::lazy_app()?;

    let (status, body) = common::send(&app, Method::GET, "/jobs/nope", None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "No job: nope");

    let u1 = common::u1_token();
    let (status, _) = common::send(&app, Method::POST, "/users/u1/jobs/nope", Some(&u1), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn register_rejects_malformed_emails() -> Result<()> {
    let app = common::lazy_app()?;

    for email in ["a@x.com@y", "a b@x.com", "a@b..c", "<script>@x.y"] {
        let (status, body) = common::send(
            &app,
            Method::POST,
            "/auth/register",
            None,
            Some(json!({
                "username": "new",
                "firstName": "first",
                "lastName": "last",
                "password": "password",
                "email": email
            })),
        )
        .await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", email);
        assert_eq!(body["error"]["message"], "email must be a valid email address", "{}", email);
    }
    Ok(())
}
