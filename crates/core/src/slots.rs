//! Time windows, the half-open overlap test and the slot generator.

use std::iter::FusedIterator;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::court::Court;

/// A half-open interval `[start, end)` of court-local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    #[serde(with = "crate::models::datetime")]
    pub start: NaiveDateTime,
    #[serde(with = "crate::models::datetime")]
    pub end: NaiveDateTime,
}

impl TimeWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// `[a1, a2)` and `[b1, b2)` overlap iff `!(a2 <= b1 || a1 >= b2)`.
    ///
    /// Windows that only touch at an edge do not overlap.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        !(self.end <= other.start || self.start >= other.end)
    }
}

/// Candidate slots of `court` on `date`, in ascending order.
///
/// The first window starts at the opening time; each following window starts
/// where the previous one ended. A trailing window that would run past the
/// closing time is dropped rather than truncated. Calling this again yields a
/// fresh iterator over the same sequence.
pub fn generate_slots(court: &Court, date: NaiveDate) -> SlotIter {
    SlotIter {
        cursor: court.opens_at(date),
        close: court.closes_at(date),
        step: Duration::minutes(i64::from(court.slot_minutes)),
    }
}

#[derive(Debug, Clone)]
pub struct SlotIter {
    cursor: NaiveDateTime,
    close: NaiveDateTime,
    step: Duration,
}

impl Iterator for SlotIter {
    type Item = TimeWindow;

    fn next(&mut self) -> Option<Self::Item> {
        if self.step <= Duration::zero() {
            return None;
        }

        // Past the representable range there is nothing left to emit.
        let end = self.cursor.checked_add_signed(self.step)?;
        if end > self.close {
            return None;
        }

        let window = TimeWindow::new(self.cursor, end);
        self.cursor = end;
        Some(window)
    }
}

impl FusedIterator for SlotIter {}
