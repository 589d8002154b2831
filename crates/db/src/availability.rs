use chrono::NaiveDate;
use courtside_core::{
    availability::assemble_availability,
    models::{availability::CourtAvailability, court::{Court, CourtFilter}},
};
use eyre::Result;
use sqlx::PgPool;

use crate::{conflict::PgConflictChecker, repositories::court};

/// Free slots per active court on `date`.
///
/// Reads are not locked, so the listing may already be stale when a booking
/// for one of its slots arrives; booking re-checks under a lock.
pub async fn get_availability(
    pool: &PgPool,
    date: NaiveDate,
    filter: &CourtFilter,
) -> Result<Vec<CourtAvailability>> {
    let courts: Vec<Court> = court::get_active_courts(pool, filter)
        .await?
        .into_iter()
        .map(Court::from)
        .collect();

    let checker = PgConflictChecker::new(pool.clone());
    assemble_availability(&checker, courts, date, filter).await
}
