//! Postgres-backed conflict checks.

use async_trait::async_trait;
use courtside_core::{
    availability::ConflictChecker,
    errors::{BookingError, CourtsideResult},
    slots::TimeWindow,
};
use eyre::Result;
use sqlx::{PgConnection, PgPool};
use tracing::debug;
use uuid::Uuid;

use crate::repositories::{blackout, reservation};

/// Unlocked point-in-time checks, one pooled connection per call.
#[derive(Debug, Clone)]
pub struct PgConflictChecker {
    pool: PgPool,
}

impl PgConflictChecker {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConflictChecker for PgConflictChecker {
    async fn reservation_overlaps(&self, court_id: Uuid, window: TimeWindow) -> Result<bool> {
        let mut conn = self.pool.acquire().await?;
        let conflict =
            reservation::find_conflicting_reservation(&mut conn, court_id, &window, None).await?;
        Ok(conflict.is_some())
    }

    async fn blackout_overlaps(&self, court_id: Uuid, window: TimeWindow) -> Result<bool> {
        let mut conn = self.pool.acquire().await?;
        let blackout = blackout::find_overlapping_blackout(&mut conn, court_id, &window).await?;
        Ok(blackout.is_some())
    }
}

/// Conflict check run on an already locked connection. Reservations are
/// checked before blackouts.
pub async fn check_window(
    conn: &mut PgConnection,
    court_id: Uuid,
    window: &TimeWindow,
    exclude: Option<Uuid>,
) -> CourtsideResult<()> {
    if let Some(existing) =
        reservation::find_conflicting_reservation(conn, court_id, window, exclude).await?
    {
        debug!(
            "Window {:?} on court {} conflicts with reservation {}",
            window, court_id, existing
        );
        return Err(BookingError::SlotConflict.into());
    }

    if let Some(blackout) = blackout::find_overlapping_blackout(conn, court_id, window).await? {
        debug!(
            "Window {:?} on court {} falls in blackout {} ({})",
            window,
            court_id,
            blackout.id,
            blackout.reason.as_deref().unwrap_or("no reason given")
        );
        return Err(BookingError::CourtBlocked.into());
    }

    Ok(())
}
