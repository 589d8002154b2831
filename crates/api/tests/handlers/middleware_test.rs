use argon2::PasswordVerifier;
use axum::{body::to_bytes, http::StatusCode, response::Response};
use chrono::NaiveTime;
use courtside_api::middleware::{auth, error_handling::map_error};
use courtside_core::errors::{BookingError, CourtsideError};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn outside_hours() -> BookingError {
    BookingError::OutsideOperatingHours {
        open: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        close: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
    }
}

#[rstest]
#[case(BookingError::InvalidInterval, StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION")]
#[case(
    BookingError::MisalignedInterval { minutes: 45, slot_minutes: 60 },
    StatusCode::UNPROCESSABLE_ENTITY,
    "VALIDATION"
)]
#[case(outside_hours(), StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION")]
#[case(BookingError::CourtUnavailable, StatusCode::CONFLICT, "NOT_AVAILABLE")]
#[case(BookingError::CourtBlocked, StatusCode::CONFLICT, "NOT_AVAILABLE")]
#[case(BookingError::SlotConflict, StatusCode::CONFLICT, "CONFLICT")]
#[tokio::test]
async fn test_booking_errors_map_to_codes(
    #[case] error: BookingError,
    #[case] status: StatusCode,
    #[case] code: &str,
) {
    let message = error.to_string();
    let response = map_error(CourtsideError::Booking(error));

    assert_eq!(response.status(), status);
    assert_eq!(
        body_json(response).await,
        json!({ "status": "error", "error": { "code": code, "message": message } })
    );
}

#[rstest]
#[case(CourtsideError::NotFound("reservation".into()), StatusCode::NOT_FOUND, "NOT_FOUND")]
#[case(CourtsideError::Validation("bad".into()), StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION")]
#[case(CourtsideError::AuthRequired("no token".into()), StatusCode::UNAUTHORIZED, "AUTH_REQUIRED")]
#[case(CourtsideError::Authentication("bad token".into()), StatusCode::UNAUTHORIZED, "AUTH_INVALID")]
#[case(CourtsideError::Authorization("not yours".into()), StatusCode::FORBIDDEN, "FORBIDDEN")]
#[case(CourtsideError::Conflict("email taken".into()), StatusCode::CONFLICT, "CONFLICT")]
#[tokio::test]
async fn test_service_errors_map_to_codes(
    #[case] error: CourtsideError,
    #[case] status: StatusCode,
    #[case] code: &str,
) {
    let response = map_error(error);

    assert_eq!(response.status(), status);
    assert_eq!(body_json(response).await["error"]["code"], code);
}

#[tokio::test]
async fn test_error_handling_database_hides_details() {
    let error = CourtsideError::Database(eyre::eyre!("connection refused by 10.0.0.5"));

    let response = map_error(error);

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({
            "status": "error",
            "error": { "code": "SERVER_ERROR", "message": "Internal server error" },
        })
    );
}

#[tokio::test]
async fn test_error_handling_internal() {
    let error = CourtsideError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    let response = map_error(error);

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_hash_password() {
    let password = "test_password";
    let hashed = auth::hash_password(password).unwrap();

    assert_ne!(hashed, password);
    assert!(hashed.starts_with("$argon2"));

    let argon2 = argon2::Argon2::default();
    let parsed_hash = argon2::PasswordHash::new(&hashed).unwrap();
    assert!(argon2.verify_password(password.as_bytes(), &parsed_hash).is_ok());
    assert!(argon2.verify_password(b"wrong_password", &parsed_hash).is_err());
}

#[tokio::test]
async fn test_same_password_hashes_differently() {
    let first = auth::hash_password("test_password").unwrap();
    let second = auth::hash_password("test_password").unwrap();

    assert_ne!(first, second);
}
