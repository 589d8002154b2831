//! Transactional booking.
//!
//! Every write to a reservation's court or interval happens inside a
//! transaction that first locks the court row with `SELECT ... FOR UPDATE`.
//! Concurrent bookings for the same court therefore run their conflict check
//! and insert one after another, and no two active reservations of a court
//! can overlap once committed. Returning early with an error drops the
//! transaction, which rolls it back.
//!
//! Locks are always taken in the same order: court rows (lowest id first),
//! then reservation rows.

use courtside_core::{
    booking,
    errors::{BookingError, CourtsideError, CourtsideResult},
    models::{
        court::Court,
        reservation::{PatchReservationRequest, ReservationStatus},
    },
    slots::TimeWindow,
};
use eyre::WrapErr;
use sqlx::{PgConnection, PgPool};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    conflict::check_window,
    models::DbReservation,
    repositories::{court, reservation},
};

const MAX_MOVE_ATTEMPTS: usize = 3;

async fn load_court(pool: &PgPool, court_id: Uuid) -> CourtsideResult<Court> {
    let court = court::get_court_by_id(pool, court_id)
        .await?
        .ok_or(BookingError::CourtUnavailable)?;
    Ok(court.into())
}

/// Serializes bookings on `court_id` for the rest of the transaction.
async fn lock_court_for_booking(conn: &mut PgConnection, court_id: Uuid) -> CourtsideResult<()> {
    match court::lock_court(conn, court_id).await? {
        Some(true) => {}
        // Deactivated between validation and locking.
        _ => return Err(BookingError::CourtUnavailable.into()),
    }
    reservation::lock_active_reservations(conn, court_id).await?;
    Ok(())
}

/// Books `window` on `court_id` for `user_id` and returns the new reservation id.
///
/// The interval is checked before anything is read from the store; the court
/// is then loaded and the window validated against its hours and slot length.
/// Only then is the court locked and the window checked against active
/// reservations and blackout periods. The reservation is stored as `pending`.
pub async fn create_reservation(
    pool: &PgPool,
    user_id: Uuid,
    court_id: Uuid,
    window: TimeWindow,
) -> CourtsideResult<Uuid> {
    booking::validate_interval(&window)?;
    let court = load_court(pool, court_id).await?;
    let quote = booking::quote(&court, window)?;

    let mut tx = pool.begin().await.wrap_err("Failed to begin booking transaction")?;
    lock_court_for_booking(&mut *tx, court_id).await?;

    if let Err(err) = check_window(&mut *tx, court_id, &window, None).await {
        warn!("Booking refused on court {} for {:?}: {}", court_id, window, err);
        return Err(err);
    }

    let created = reservation::insert_reservation(&mut *tx, user_id, court_id, &quote).await?;
    tx.commit().await.wrap_err("Failed to commit reservation")?;

    info!(
        "Reservation {} created on court {} ({} slot(s), total {})",
        created.id, court_id, quote.slots, quote.total_price
    );
    Ok(created.id)
}

/// Locks the court a reservation sits on and the court it moves to, lowest id
/// first, so that two moves in opposite directions queue instead of deadlocking.
async fn lock_courts_for_move(
    conn: &mut PgConnection,
    current_court: Uuid,
    target_court: Uuid,
) -> CourtsideResult<()> {
    let mut courts = vec![current_court, target_court];
    courts.sort();
    courts.dedup();

    for court_id in courts {
        let active = court::lock_court(conn, court_id).await?;
        if court_id == target_court && active != Some(true) {
            return Err(BookingError::CourtUnavailable.into());
        }
    }

    reservation::lock_active_reservations(conn, target_court).await?;
    Ok(())
}

fn not_found(reservation_id: Uuid) -> CourtsideError {
    CourtsideError::NotFound(format!("Reservation with ID {} not found", reservation_id))
}

/// Moves an active reservation to a new court and/or interval.
///
/// Runs the same validation as [`create_reservation`] against the new values,
/// ignoring the reservation's own current row in the conflict check, and
/// reprices it.
pub async fn reschedule_reservation(
    pool: &PgPool,
    reservation_id: Uuid,
    court_id: Uuid,
    window: TimeWindow,
) -> CourtsideResult<DbReservation> {
    let change = PatchReservationRequest {
        court_id: Some(court_id),
        start_datetime: Some(window.start),
        end_datetime: Some(window.end),
        status: None,
    };
    update_reservation(pool, reservation_id, &change).await
}

/// Applies a partial change (court, start, end and/or status) in one transaction.
///
/// Missing fields keep their stored value. When the change moves the
/// reservation, the new window is validated and checked for conflicts the way
/// a booking is, and a requested status transition is checked before anything
/// is written, so a refused transition leaves the reservation where it was.
pub async fn update_reservation(
    pool: &PgPool,
    reservation_id: Uuid,
    change: &PatchReservationRequest,
) -> CourtsideResult<DbReservation> {
    if !change.moves_reservation() {
        return match change.status {
            Some(next) => change_status(pool, reservation_id, next).await,
            None => Err(CourtsideError::Validation("No fields to update".to_string())),
        };
    }

    for attempt in 1..=MAX_MOVE_ATTEMPTS {
        // Which courts to lock depends on where the reservation is now.
        let seen = reservation::get_reservation_by_id(pool, reservation_id)
            .await?
            .ok_or_else(|| not_found(reservation_id))?;
        let court_id = change.court_id.unwrap_or(seen.court_id);
        let window = TimeWindow::new(
            change.start_datetime.unwrap_or(seen.start_datetime),
            change.end_datetime.unwrap_or(seen.end_datetime),
        );

        booking::validate_interval(&window)?;
        let court = load_court(pool, court_id).await?;
        let quote = booking::quote(&court, window)?;

        let mut tx = pool.begin().await.wrap_err("Failed to begin reschedule transaction")?;
        lock_courts_for_move(&mut *tx, seen.court_id, court_id).await?;

        let current = reservation::get_reservation_for_update(&mut *tx, reservation_id)
            .await?
            .ok_or_else(|| not_found(reservation_id))?;
        if current.court_id != seen.court_id
            || current.start_datetime != seen.start_datetime
            || current.end_datetime != seen.end_datetime
        {
            debug!(
                "Reservation {} moved while locking (attempt {}), retrying",
                reservation_id, attempt
            );
            continue;
        }

        let status = current.status()?;
        if !status.is_active() {
            return Err(CourtsideError::Validation(
                "Cancelled reservations cannot be changed".to_string(),
            ));
        }
        let next = change.status.unwrap_or(status);
        if !status.can_transition_to(next) {
            return Err(CourtsideError::Validation(format!(
                "Cannot change reservation status from {} to {}",
                status, next
            )));
        }

        check_window(&mut *tx, court_id, &window, Some(reservation_id)).await?;

        let mut updated =
            reservation::update_reservation_window(&mut *tx, reservation_id, court_id, &quote)
                .await?;
        if next != status {
            updated = reservation::update_reservation_status(&mut *tx, reservation_id, next).await?;
        }
        tx.commit().await.wrap_err("Failed to commit reservation change")?;

        info!(
            "Reservation {} moved to court {} {:?} (total {}, {})",
            reservation_id, court_id, window, quote.total_price, next
        );
        return Ok(updated);
    }

    Err(CourtsideError::Conflict(format!(
        "Reservation {} is being changed by another request",
        reservation_id
    )))
}

/// Applies a status transition, refusing the ones [`ReservationStatus::can_transition_to`] forbids.
pub async fn change_status(
    pool: &PgPool,
    reservation_id: Uuid,
    next: ReservationStatus,
) -> CourtsideResult<DbReservation> {
    let mut tx = pool.begin().await.wrap_err("Failed to begin status transaction")?;

    let current = reservation::get_reservation_for_update(&mut *tx, reservation_id)
        .await?
        .ok_or_else(|| not_found(reservation_id))?;
    let status = current.status()?;

    if status == next {
        return Ok(current);
    }
    if !status.can_transition_to(next) {
        return Err(CourtsideError::Validation(format!(
            "Cannot change reservation status from {} to {}",
            status, next
        )));
    }

    let updated = reservation::update_reservation_status(&mut *tx, reservation_id, next).await?;
    tx.commit().await.wrap_err("Failed to commit status change")?;

    info!("Reservation {} is now {}", reservation_id, next);
    Ok(updated)
}

pub async fn cancel_reservation(pool: &PgPool, reservation_id: Uuid) -> CourtsideResult<DbReservation> {
    change_status(pool, reservation_id, ReservationStatus::Cancelled).await
}
