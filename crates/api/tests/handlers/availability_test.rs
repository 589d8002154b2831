use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::test_utils::test_server;

#[tokio::test]
async fn test_malformed_date_is_rejected_before_querying() {
    let server = test_server();

    let response = server
        .get("/availability")
        .add_query_param("date", "14/03/2026")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"]["code"], "VALIDATION");
}

#[tokio::test]
async fn test_malformed_venue_id_is_rejected() {
    let server = test_server();

    let response = server
        .get("/availability")
        .add_query_param("date", "2026-03-14")
        .add_query_param("club_id", "center-court")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALIDATION");
}

#[tokio::test]
async fn test_empty_filters_are_not_rejected() {
    let server = test_server();

    // The date is malformed so the request is answered before any query runs.
    let response = server
        .get("/availability?date=tomorrow&club_id=&sport_id=")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.contains("Invalid date"), "unexpected message: {}", message);
}
