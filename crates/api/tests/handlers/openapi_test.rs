use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::test_utils::test_server;

#[tokio::test]
async fn test_openapi_document_is_served() {
    let server = test_server();

    let response = server.get("/openapi.json").await;

    response.assert_status(StatusCode::OK);
    let doc: Value = response.json();
    assert!(doc["openapi"].as_str().unwrap().starts_with("3."));
    assert_eq!(doc["info"]["title"], "Courtside API");

    let paths = doc["paths"].as_object().unwrap();
    for path in [
        "/health",
        "/sports",
        "/availability",
        "/auth/register",
        "/auth/login",
        "/reservations",
        "/reservations/{id}",
        "/reservations/{id}/cancel",
    ] {
        assert!(paths.contains_key(path), "{} is not documented", path);
    }

    let reservation = paths["/reservations/{id}"].as_object().unwrap();
    for method in ["get", "put", "patch", "delete"] {
        assert!(reservation.contains_key(method), "{} /reservations/{{id}} is not documented", method);
    }
}

#[tokio::test]
async fn test_openapi_document_declares_bearer_auth_and_error_schema() {
    let server = test_server();

    let doc: Value = server.get("/openapi.json").await.json();

    let scheme = &doc["components"]["securitySchemes"]["BearerAuth"];
    assert_eq!(scheme["type"], "http");
    assert_eq!(scheme["scheme"], "bearer");

    let schemas = doc["components"]["schemas"].as_object().unwrap();
    for schema in ["Reservation", "PatchReservationRequest", "CourtAvailability", "ErrorResponse"] {
        assert!(schemas.contains_key(schema), "{} schema is missing", schema);
    }

    let params: Vec<&str> = doc["paths"]["/availability"]["get"]["parameters"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|param| param["name"].as_str())
        .collect();
    assert!(params.contains(&"date"));
    assert!(params.contains(&"club_id"));
}
