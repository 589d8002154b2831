use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::test_server;

#[tokio::test]
async fn test_health_uses_success_envelope() {
    let server = test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "status": "success", "data": { "status": "ok" } }));
}

#[tokio::test]
async fn test_listing_requires_a_token() {
    let server = test_server();

    let response = server.get("/reservations").expect_failure().await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "AUTH_REQUIRED");
}

#[rstest]
#[case("Basic dXNlcjpwYXNzd29yZA==")]
#[case("Bearer")]
#[tokio::test]
async fn test_non_bearer_authorization_is_missing_credentials(#[case] header: &'static str) {
    let server = test_server();

    let response = server
        .get("/reservations")
        .add_header(AUTHORIZATION, HeaderValue::from_static(header))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "AUTH_REQUIRED");
}

#[tokio::test]
async fn test_booking_checks_auth_before_the_body() {
    let server = test_server();

    let response = server
        .post("/reservations")
        .json(&json!({ "court_id": "not-a-uuid" }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_cancel_requires_a_token() {
    let server = test_server();

    let response = server
        .put(&format!("/reservations/{}/cancel", Uuid::new_v4()))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let server = test_server();

    let response = server.get("/courts/unknown").expect_failure().await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_register_validates_before_touching_the_database() {
    let server = test_server();

    let response = server
        .post("/auth/register")
        .json(&json!({ "name": "Ana", "email": "ana@example.com", "password": "short" }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALIDATION");
}
