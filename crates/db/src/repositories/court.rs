use crate::models::DbCourt;
use courtside_core::models::court::CourtFilter;
use eyre::Result;
use sqlx::{PgConnection, Pool, Postgres};
use uuid::Uuid;

/// Active courts matching the filter, ordered by name then id.
pub async fn get_active_courts(pool: &Pool<Postgres>, filter: &CourtFilter) -> Result<Vec<DbCourt>> {
    let courts = sqlx::query_as::<_, DbCourt>(
        r#"
        SELECT c.id, c.name, c.venue_id, v.name AS venue_name, c.sport_id, s.name AS sport_name,
               c.active, c.open_time, c.close_time, c.slot_minutes, c.price_per_slot
        FROM courts c
        JOIN venues v ON v.id = c.venue_id
        JOIN sports s ON s.id = c.sport_id
        WHERE c.active
          AND ($1::uuid IS NULL OR c.venue_id = $1)
          AND ($2::uuid IS NULL OR c.sport_id = $2)
        ORDER BY c.name ASC, c.id ASC
        "#,
    )
    .bind(filter.venue_id)
    .bind(filter.sport_id)
    .fetch_all(pool)
    .await?;

    tracing::debug!("Found {} active courts for {:?}", courts.len(), filter);
    Ok(courts)
}

pub async fn get_court_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbCourt>> {
    let court = sqlx::query_as::<_, DbCourt>(
        r#"
        SELECT c.id, c.name, c.venue_id, v.name AS venue_name, c.sport_id, s.name AS sport_name,
               c.active, c.open_time, c.close_time, c.slot_minutes, c.price_per_slot
        FROM courts c
        JOIN venues v ON v.id = c.venue_id
        JOIN sports s ON s.id = c.sport_id
        WHERE c.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(court)
}

/// Takes the row lock that serializes bookings on a court and returns its
/// current `active` flag, or `None` when the court does not exist.
pub async fn lock_court(conn: &mut PgConnection, id: Uuid) -> Result<Option<bool>> {
    let active = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT active
        FROM courts
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(active)
}
