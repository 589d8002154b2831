//! # Error Handling Middleware
//!
//! Maps `CourtsideError` to an HTTP status, a stable machine-readable code and
//! the error envelope:
//!
//! ```json
//! { "status": "error", "error": { "code": "CONFLICT", "message": "..." } }
//! ```
//!
//! Persistence and unexpected failures are logged here and answered with a
//! generic message so internals never reach the client.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use courtside_core::errors::{BookingError, CourtsideError};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

/// Application error wrapper that provides HTTP status code mapping
///
/// Handlers return `Result<_, AppError>` and use `?` on anything that converts
/// into a `CourtsideError`.
///
/// ```
/// use courtside_api::middleware::error_handling::AppError;
/// use courtside_core::errors::CourtsideError;
///
/// fn find(id: u32) -> Result<u32, AppError> {
///     Err(CourtsideError::NotFound(format!("Reservation {} not found", id)).into())
/// }
/// # assert!(find(1).is_err());
/// ```
#[derive(Debug)]
pub struct AppError(pub CourtsideError);

/// Status code and error code for `err`.
pub fn classify(err: &CourtsideError) -> (StatusCode, &'static str) {
    match err {
        CourtsideError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        CourtsideError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION"),
        CourtsideError::AuthRequired(_) => (StatusCode::UNAUTHORIZED, "AUTH_REQUIRED"),
        CourtsideError::Authentication(_) => (StatusCode::UNAUTHORIZED, "AUTH_INVALID"),
        CourtsideError::Authorization(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        CourtsideError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
        CourtsideError::Booking(booking) => match booking {
            BookingError::InvalidInterval
            | BookingError::MisalignedInterval { .. }
            | BookingError::OutsideOperatingHours { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION")
            }
            BookingError::CourtUnavailable | BookingError::CourtBlocked => {
                (StatusCode::CONFLICT, "NOT_AVAILABLE")
            }
            BookingError::SlotConflict => (StatusCode::CONFLICT, "CONFLICT"),
        },
        CourtsideError::Database(_) | CourtsideError::Internal(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "SERVER_ERROR")
        }
    }
}

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `"error"`
    #[schema(example = "error")]
    pub status: String,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorDetail {
    #[schema(example = "CONFLICT")]
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            error: ErrorDetail {
                code: code.to_string(),
                message: message.into(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = classify(&self.0);

        let message = if status.is_server_error() {
            error!("Request failed: {:?}", self.0);
            "Internal server error".to_string()
        } else {
            match &self.0 {
                CourtsideError::Booking(err) => err.to_string(),
                other => other.to_string(),
            }
        };

        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}

impl From<CourtsideError> for AppError {
    fn from(err: CourtsideError) -> Self {
        AppError(err)
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(CourtsideError::Booking(err))
    }
}

/// Repository failures surface as `CourtsideError::Database`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(CourtsideError::Database(err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(CourtsideError::Validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError(CourtsideError::Validation(rejection.body_text()))
    }
}

/// Malformed ids cannot name an existing resource.
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError(CourtsideError::NotFound(rejection.body_text()))
    }
}

/// Maps a CourtsideError straight to an HTTP response
pub fn map_error(err: CourtsideError) -> Response {
    AppError(err).into_response()
}

/// Answers requests that match no route.
pub async fn route_not_found() -> AppError {
    AppError(CourtsideError::NotFound("Route not found".to_string()))
}

/// Converts failures raised by tower layers (the request timeout) into the envelope.
///
/// The handler future is dropped on timeout, so an open transaction is rolled back.
pub async fn handle_layer_error(err: tower::BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        let body = Json(ErrorResponse::new("TIMEOUT", "Request timed out"));
        return (StatusCode::REQUEST_TIMEOUT, body).into_response();
    }

    AppError(CourtsideError::Internal(err)).into_response()
}
