//! These tests need a Postgres database reachable through `TEST_DATABASE_URL`.

use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{create_test_pool, seed_court, seed_user, server_for};

fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
}

async fn book(server: &TestServer, token: &str, court_id: Uuid) -> String {
    let response = server
        .post("/reservations")
        .add_header(AUTHORIZATION, bearer(token))
        .json(&json!({
            "court_id": court_id,
            "start_datetime": "2031-01-01 09:00:00",
            "end_datetime": "2031-01-01 10:00:00",
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    body["data"]["id"].as_str().unwrap().to_string()
}

async fn stored(server: &TestServer, token: &str, id: &str) -> Value {
    let response = server
        .get(&format!("/reservations/{}", id))
        .add_header(AUTHORIZATION, bearer(token))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    body["data"].clone()
}

#[tokio::test]
#[ignore = "requires a Postgres test database"]
async fn test_forbidden_confirm_does_not_move_the_reservation() {
    let pool = create_test_pool().await;
    let server = server_for(&pool);
    let court_id = seed_court(&pool).await;
    let (_, token) = seed_user(&pool, "user").await;
    let id = book(&server, &token, court_id).await;

    let response = server
        .patch(&format!("/reservations/{}", id))
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({
            "start_datetime": "2031-01-01 14:00:00",
            "end_datetime": "2031-01-01 15:00:00",
            "status": "confirmed",
        }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    let reservation = stored(&server, &token, &id).await;
    assert_eq!(reservation["start_datetime"], "2031-01-01 09:00:00");
    assert_eq!(reservation["status"], "pending");
}

#[tokio::test]
#[ignore = "requires a Postgres test database"]
async fn test_illegal_transition_does_not_move_the_reservation() {
    let pool = create_test_pool().await;
    let server = server_for(&pool);
    let court_id = seed_court(&pool).await;
    let (_, token) = seed_user(&pool, "user").await;
    let (_, admin_token) = seed_user(&pool, "admin").await;
    let id = book(&server, &token, court_id).await;

    server
        .patch(&format!("/reservations/{}", id))
        .add_header(AUTHORIZATION, bearer(&admin_token))
        .json(&json!({ "status": "confirmed" }))
        .await
        .assert_status_ok();

    let response = server
        .patch(&format!("/reservations/{}", id))
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({
            "start_datetime": "2031-01-01 14:00:00",
            "end_datetime": "2031-01-01 15:00:00",
            "status": "pending",
        }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let reservation = stored(&server, &token, &id).await;
    assert_eq!(reservation["start_datetime"], "2031-01-01 09:00:00");
    assert_eq!(reservation["status"], "confirmed");
}

#[tokio::test]
#[ignore = "requires a Postgres test database"]
async fn test_admin_moves_and_confirms_together() {
    let pool = create_test_pool().await;
    let server = server_for(&pool);
    let court_id = seed_court(&pool).await;
    let (_, token) = seed_user(&pool, "user").await;
    let (_, admin_token) = seed_user(&pool, "admin").await;
    let id = book(&server, &token, court_id).await;

    let response = server
        .patch(&format!("/reservations/{}", id))
        .add_header(AUTHORIZATION, bearer(&admin_token))
        .json(&json!({
            "start_datetime": "2031-01-01 14:00:00",
            "end_datetime": "2031-01-01 16:00:00",
            "status": "confirmed",
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["start_datetime"], "2031-01-01 14:00:00");
    assert_eq!(body["data"]["status"], "confirmed");
    assert_eq!(body["data"]["total_price"], "100.00");
}
