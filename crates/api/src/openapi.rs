//! OpenAPI 3 document for the HTTP surface, served at `GET /openapi.json`.
//!
//! Documented bodies are the `data` payloads; every success response is
//! wrapped in `{"status": "success", "data": ...}` and every failure is an
//! [`ErrorResponse`].

use axum::Json;
use courtside_core::models::{
    availability::{CourtAvailability, Slot},
    reservation::{
        CancelReservationResponse, CreateReservationRequest, PatchReservationRequest,
        Reservation, ReservationIdResponse, ReservationStatus, UpdateReservationRequest,
    },
    sport::Sport,
    user::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, Role, User},
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::{
    handlers,
    middleware::error_handling::{ErrorDetail, ErrorResponse},
    routes::health::{self, HealthResponse, VersionResponse},
};

/// Registers the bearer token scheme issued by `/auth/login`.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Courtside API",
        description = "Court availability and reservations"
    ),
    paths(
        health::health_check,
        health::version,
        handlers::sports::list_sports,
        handlers::availability::get_availability,
        handlers::auth::register,
        handlers::auth::login,
        handlers::reservations::list_reservations,
        handlers::reservations::create_reservation,
        handlers::reservations::get_reservation,
        handlers::reservations::update_reservation,
        handlers::reservations::patch_reservation,
        handlers::reservations::cancel_reservation,
        handlers::reservations::delete_reservation,
    ),
    components(schemas(
        HealthResponse,
        VersionResponse,
        Sport,
        Slot,
        CourtAvailability,
        Role,
        User,
        RegisterRequest,
        RegisterResponse,
        LoginRequest,
        LoginResponse,
        ReservationStatus,
        Reservation,
        CreateReservationRequest,
        UpdateReservationRequest,
        PatchReservationRequest,
        ReservationIdResponse,
        CancelReservationResponse,
        ErrorResponse,
        ErrorDetail,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Liveness and version"),
        (name = "catalogue", description = "Sports"),
        (name = "availability", description = "Free slots per court"),
        (name = "auth", description = "Registration and login"),
        (name = "reservations", description = "Reservation lifecycle; bearer token required"),
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
