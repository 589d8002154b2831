use crate::models::DbBlackoutPeriod;
use courtside_core::slots::TimeWindow;
use eyre::Result;
use sqlx::PgConnection;
use uuid::Uuid;

/// First blackout period of the court that overlaps `window`, if any.
pub async fn find_overlapping_blackout(
    conn: &mut PgConnection,
    court_id: Uuid,
    window: &TimeWindow,
) -> Result<Option<DbBlackoutPeriod>> {
    let blackout = sqlx::query_as::<_, DbBlackoutPeriod>(
        r#"
        SELECT id, court_id, start_datetime, end_datetime, reason, created_at
        FROM blackout_periods
        WHERE court_id = $1
          AND NOT (end_datetime <= $2 OR start_datetime >= $3)
        ORDER BY start_datetime ASC
        LIMIT 1
        "#,
    )
    .bind(court_id)
    .bind(window.start)
    .bind(window.end)
    .fetch_optional(conn)
    .await?;

    Ok(blackout)
}
