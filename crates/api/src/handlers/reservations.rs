//! # Reservation Handlers
//!
//! All routes require a bearer token. A reservation can be read or changed by
//! its owner or by an admin; only admins may confirm one. Moving a reservation
//! goes through the same locked validation as booking it.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use courtside_core::{
    errors::CourtsideError,
    models::{
        reservation::{
            CancelReservationResponse, CreateReservationRequest, PatchReservationRequest,
            Reservation, ReservationIdResponse, ReservationStatus, UpdateReservationRequest,
        },
        user::Actor,
    },
    slots::TimeWindow,
};
use courtside_db::{booking, models::DbReservation, repositories::reservation};
use tracing::info;
use uuid::Uuid;

use crate::{
    middleware::{
        auth::AuthUser,
        error_handling::{AppError, ErrorResponse},
    },
    response::ApiResponse,
    ApiState,
};

/// Loads reservation `id`, refusing callers that are neither its owner nor an admin.
async fn load_managed(state: &ApiState, actor: &Actor, id: Uuid) -> Result<DbReservation, AppError> {
    let found = reservation::get_reservation_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| CourtsideError::NotFound(format!("Reservation with ID {} not found", id)))?;

    if !actor.can_manage(found.user_id) {
        return Err(CourtsideError::Authorization(
            "You cannot access this reservation".to_string(),
        )
        .into());
    }

    Ok(found)
}

fn ensure_may_set_status(actor: &Actor, next: ReservationStatus) -> Result<(), AppError> {
    if next == ReservationStatus::Confirmed && !actor.is_admin() {
        return Err(CourtsideError::Authorization(
            "Only admins can confirm reservations".to_string(),
        )
        .into());
    }
    Ok(())
}

fn to_reservation(row: DbReservation) -> Result<Reservation, AppError> {
    Ok(Reservation::try_from(row)?)
}

/// The caller's reservations, latest start first.
#[utoipa::path(
    get,
    path = "/reservations",
    tag = "reservations",
    responses(
        (status = 200, description = "Reservations of the caller", body = [Reservation]),
        (status = 401, description = "Missing or unknown bearer token", body = ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
pub async fn list_reservations(
    State(state): State<Arc<ApiState>>,
    AuthUser(actor): AuthUser,
) -> Result<ApiResponse<Vec<Reservation>>, AppError> {
    let reservations = reservation::get_reservations_by_user(&state.db_pool, actor.user_id)
        .await?
        .into_iter()
        .map(to_reservation)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ApiResponse::success(reservations))
}

/// Books a court; the reservation starts out `pending`.
#[utoipa::path(
    post,
    path = "/reservations",
    tag = "reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = ReservationIdResponse),
        (status = 401, description = "Missing or unknown bearer token", body = ErrorResponse),
        (status = 409, description = "`CONFLICT` when the slot is taken, `NOT_AVAILABLE` when the court is inactive or blocked", body = ErrorResponse),
        (status = 422, description = "Empty, misaligned or out-of-hours interval", body = ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
pub async fn create_reservation(
    State(state): State<Arc<ApiState>>,
    AuthUser(actor): AuthUser,
    payload: Result<Json<CreateReservationRequest>, JsonRejection>,
) -> Result<ApiResponse<ReservationIdResponse>, AppError> {
    let Json(payload) = payload?;
    let window = TimeWindow::new(payload.start_datetime, payload.end_datetime);

    let id = booking::create_reservation(&state.db_pool, actor.user_id, payload.court_id, window)
        .await?;

    Ok(ApiResponse::created(ReservationIdResponse { id }))
}

#[utoipa::path(
    get,
    path = "/reservations/{id}",
    tag = "reservations",
    params(
        ("id" = Uuid, Path, description = "Reservation id"),
    ),
    responses(
        (status = 200, description = "The reservation", body = Reservation),
        (status = 401, description = "Missing or unknown bearer token", body = ErrorResponse),
        (status = 403, description = "Neither the owner nor an admin", body = ErrorResponse),
        (status = 404, description = "No such reservation", body = ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
pub async fn get_reservation(
    State(state): State<Arc<ApiState>>,
    AuthUser(actor): AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<ApiResponse<Reservation>, AppError> {
    let Path(id) = id?;
    let found = load_managed(&state, &actor, id).await?;

    Ok(ApiResponse::success(to_reservation(found)?))
}

/// Replaces court and interval (`PUT /reservations/:id`).
#[utoipa::path(
    put,
    path = "/reservations/{id}",
    tag = "reservations",
    params(
        ("id" = Uuid, Path, description = "Reservation id"),
    ),
    request_body = UpdateReservationRequest,
    responses(
        (status = 200, description = "The moved reservation", body = Reservation),
        (status = 401, description = "Missing or unknown bearer token", body = ErrorResponse),
        (status = 403, description = "Neither the owner nor an admin", body = ErrorResponse),
        (status = 404, description = "No such reservation", body = ErrorResponse),
        (status = 409, description = "Slot taken, court inactive or blocked", body = ErrorResponse),
        (status = 422, description = "Invalid interval or cancelled reservation", body = ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
pub async fn update_reservation(
    State(state): State<Arc<ApiState>>,
    AuthUser(actor): AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateReservationRequest>, JsonRejection>,
) -> Result<ApiResponse<Reservation>, AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    load_managed(&state, &actor, id).await?;

    let window = TimeWindow::new(payload.start_datetime, payload.end_datetime);
    let updated =
        booking::reschedule_reservation(&state.db_pool, id, payload.court_id, window).await?;

    Ok(ApiResponse::success(to_reservation(updated)?))
}

/// Partial update (`PATCH /reservations/:id`).
///
/// Permission to set the requested status is settled before anything is
/// written; the move and the status change then commit together or not at all.
#[utoipa::path(
    patch,
    path = "/reservations/{id}",
    tag = "reservations",
    params(
        ("id" = Uuid, Path, description = "Reservation id"),
    ),
    request_body = PatchReservationRequest,
    responses(
        (status = 200, description = "The updated reservation", body = Reservation),
        (status = 401, description = "Missing or unknown bearer token", body = ErrorResponse),
        (status = 403, description = "Neither the owner nor an admin", body = ErrorResponse),
        (status = 404, description = "No such reservation", body = ErrorResponse),
        (status = 409, description = "Slot taken, court inactive or blocked", body = ErrorResponse),
        (status = 422, description = "No fields, invalid interval or illegal status transition", body = ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
pub async fn patch_reservation(
    State(state): State<Arc<ApiState>>,
    AuthUser(actor): AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<PatchReservationRequest>, JsonRejection>,
) -> Result<ApiResponse<Reservation>, AppError> {
    let Path(id) = id?;
    let Json(patch) = payload?;
    if patch.is_empty() {
        return Err(CourtsideError::Validation("No fields to update".to_string()).into());
    }

    load_managed(&state, &actor, id).await?;
    if let Some(next) = patch.status {
        ensure_may_set_status(&actor, next)?;
    }

    let updated = booking::update_reservation(&state.db_pool, id, &patch).await?;

    Ok(ApiResponse::success(to_reservation(updated)?))
}

#[utoipa::path(
    put,
    path = "/reservations/{id}/cancel",
    tag = "reservations",
    params(
        ("id" = Uuid, Path, description = "Reservation id"),
    ),
    responses(
        (status = 200, description = "Reservation cancelled", body = CancelReservationResponse),
        (status = 401, description = "Missing or unknown bearer token", body = ErrorResponse),
        (status = 403, description = "Neither the owner nor an admin", body = ErrorResponse),
        (status = 404, description = "No such reservation", body = ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
pub async fn cancel_reservation(
    State(state): State<Arc<ApiState>>,
    AuthUser(actor): AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<ApiResponse<CancelReservationResponse>, AppError> {
    let Path(id) = id?;
    load_managed(&state, &actor, id).await?;

    let cancelled = booking::cancel_reservation(&state.db_pool, id).await?;
    info!("Reservation {} cancelled by {}", cancelled.id, actor.user_id);

    Ok(ApiResponse::success(CancelReservationResponse {
        cancelled_id: cancelled.id,
    }))
}

#[utoipa::path(
    delete,
    path = "/reservations/{id}",
    tag = "reservations",
    params(
        ("id" = Uuid, Path, description = "Reservation id"),
    ),
    responses(
        (status = 200, description = "Reservation deleted", body = ReservationIdResponse),
        (status = 401, description = "Missing or unknown bearer token", body = ErrorResponse),
        (status = 403, description = "Neither the owner nor an admin", body = ErrorResponse),
        (status = 404, description = "No such reservation", body = ErrorResponse),
    ),
    security(("BearerAuth" = []))
)]
pub async fn delete_reservation(
    State(state): State<Arc<ApiState>>,
    AuthUser(actor): AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<ApiResponse<ReservationIdResponse>, AppError> {
    let Path(id) = id?;
    load_managed(&state, &actor, id).await?;

    if !reservation::delete_reservation(&state.db_pool, id).await? {
        return Err(CourtsideError::NotFound(format!("Reservation with ID {} not found", id)).into());
    }
    info!("Reservation {} deleted by {}", id, actor.user_id);

    Ok(ApiResponse::success(ReservationIdResponse { id }))
}
