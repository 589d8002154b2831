use crate::models::DbReservation;
use courtside_core::{booking::BookingQuote, models::reservation::ReservationStatus, slots::TimeWindow};
use eyre::Result;
use sqlx::{PgConnection, Pool, Postgres};
use uuid::Uuid;

/// First active reservation of the court that overlaps `window`.
///
/// `exclude` leaves one reservation out of the check, used when that
/// reservation is itself being moved.
pub async fn find_conflicting_reservation(
    conn: &mut PgConnection,
    court_id: Uuid,
    window: &TimeWindow,
    exclude: Option<Uuid>,
) -> Result<Option<Uuid>> {
    let conflict = sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT id
        FROM reservations
        WHERE court_id = $1
          AND status = ANY($2)
          AND NOT (end_datetime <= $3 OR start_datetime >= $4)
          AND ($5::uuid IS NULL OR id <> $5)
        ORDER BY start_datetime ASC
        LIMIT 1
        "#,
    )
    .bind(court_id)
    .bind(&ReservationStatus::ACTIVE[..])
    .bind(window.start)
    .bind(window.end)
    .bind(exclude)
    .fetch_optional(conn)
    .await?;

    Ok(conflict)
}

/// Locks every active reservation row of the court for the rest of the transaction.
pub async fn lock_active_reservations(conn: &mut PgConnection, court_id: Uuid) -> Result<usize> {
    let locked = sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT id
        FROM reservations
        WHERE court_id = $1 AND status = ANY($2)
        FOR UPDATE
        "#,
    )
    .bind(court_id)
    .bind(&ReservationStatus::ACTIVE[..])
    .fetch_all(conn)
    .await?;

    Ok(locked.len())
}

pub async fn insert_reservation(
    conn: &mut PgConnection,
    user_id: Uuid,
    court_id: Uuid,
    quote: &BookingQuote,
) -> Result<DbReservation> {
    let id = Uuid::new_v4();

    let reservation = sqlx::query_as::<_, DbReservation>(
        r#"
        INSERT INTO reservations (id, court_id, user_id, start_datetime, end_datetime, status, total_price, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, NOW(), NOW())
        RETURNING id, court_id, user_id, start_datetime, end_datetime, status, total_price, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(court_id)
    .bind(user_id)
    .bind(quote.window.start)
    .bind(quote.window.end)
    .bind(ReservationStatus::Pending.as_str())
    .bind(quote.total_price)
    .fetch_one(conn)
    .await?;

    Ok(reservation)
}

pub async fn get_reservation_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbReservation>> {
    let reservation = sqlx::query_as::<_, DbReservation>(
        r#"
        SELECT id, court_id, user_id, start_datetime, end_datetime, status, total_price, created_at, updated_at
        FROM reservations
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(reservation)
}

pub async fn get_reservation_for_update(
    conn: &mut PgConnection,
    id: Uuid,
) -> Result<Option<DbReservation>> {
    let reservation = sqlx::query_as::<_, DbReservation>(
        r#"
        SELECT id, court_id, user_id, start_datetime, end_datetime, status, total_price, created_at, updated_at
        FROM reservations
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(reservation)
}

pub async fn get_reservations_by_user(
    pool: &Pool<Postgres>,
    user_id: Uuid,
) -> Result<Vec<DbReservation>> {
    let reservations = sqlx::query_as::<_, DbReservation>(
        r#"
        SELECT id, court_id, user_id, start_datetime, end_datetime, status, total_price, created_at, updated_at
        FROM reservations
        WHERE user_id = $1
        ORDER BY start_datetime DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(reservations)
}

pub async fn update_reservation_window(
    conn: &mut PgConnection,
    id: Uuid,
    court_id: Uuid,
    quote: &BookingQuote,
) -> Result<DbReservation> {
    let reservation = sqlx::query_as::<_, DbReservation>(
        r#"
        UPDATE reservations
        SET court_id = $2, start_datetime = $3, end_datetime = $4, total_price = $5, updated_at = NOW()
        WHERE id = $1
        RETURNING id, court_id, user_id, start_datetime, end_datetime, status, total_price, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(court_id)
    .bind(quote.window.start)
    .bind(quote.window.end)
    .bind(quote.total_price)
    .fetch_one(conn)
    .await?;

    Ok(reservation)
}

pub async fn update_reservation_status(
    conn: &mut PgConnection,
    id: Uuid,
    status: ReservationStatus,
) -> Result<DbReservation> {
    let reservation = sqlx::query_as::<_, DbReservation>(
        r#"
        UPDATE reservations
        SET status = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING id, court_id, user_id, start_datetime, end_datetime, status, total_price, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(status.as_str())
    .fetch_one(conn)
    .await?;

    Ok(reservation)
}

/// Returns whether a row was deleted.
pub async fn delete_reservation(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM reservations
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
