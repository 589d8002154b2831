//! Per-court availability for a calendar date.

use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::Result;
use uuid::Uuid;

use crate::{
    models::{
        availability::{CourtAvailability, Slot},
        court::{Court, CourtFilter},
    },
    slots::{generate_slots, TimeWindow},
};

/// Answers whether a window on a court is already taken.
///
/// Reservation checks only consider `pending` and `confirmed` reservations;
/// blackout checks apply unconditionally. Both use half-open overlap.
#[async_trait]
pub trait ConflictChecker: Send + Sync {
    async fn reservation_overlaps(&self, court_id: Uuid, window: TimeWindow) -> Result<bool>;

    async fn blackout_overlaps(&self, court_id: Uuid, window: TimeWindow) -> Result<bool>;

    async fn overlaps(&self, court_id: Uuid, window: TimeWindow) -> Result<bool> {
        if self.reservation_overlaps(court_id, window).await? {
            return Ok(true);
        }
        self.blackout_overlaps(court_id, window).await
    }
}

/// Orders courts by name, ties broken by id.
pub fn sort_courts(courts: &mut [Court]) {
    courts.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
}

/// Builds the availability listing for `date`.
///
/// Every active court matching `filter` appears in the result, even when none
/// of its slots is free. Slots keep the generator's ascending order and carry
/// the court's flat per-slot price.
pub async fn assemble_availability<C>(
    checker: &C,
    mut courts: Vec<Court>,
    date: NaiveDate,
    filter: &CourtFilter,
) -> Result<Vec<CourtAvailability>>
where
    C: ConflictChecker + ?Sized,
{
    courts.retain(|court| court.active && filter.matches(court));
    sort_courts(&mut courts);

    let mut result = Vec::with_capacity(courts.len());
    for court in courts {
        let mut slots = Vec::new();
        for window in generate_slots(&court, date) {
            if checker.overlaps(court.id, window).await? {
                continue;
            }
            slots.push(Slot {
                court_id: court.id,
                start: window.start,
                end: window.end,
                price: court.price_per_slot,
            });
        }

        result.push(CourtAvailability {
            court_id: court.id,
            court_name: court.name,
            venue_name: court.venue_name,
            sport_name: court.sport_name,
            slots,
        });
    }

    Ok(result)
}
