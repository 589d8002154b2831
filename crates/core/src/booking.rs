//! Validation and pricing of a proposed booking.
//!
//! These are the store-independent steps of booking. The checks run in a fixed
//! order so a request with several problems always reports the same one:
//! interval, court availability, opening hours, slot alignment.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors::BookingError, models::court::Court, slots::TimeWindow};

/// A validated booking window with its price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingQuote {
    pub window: TimeWindow,
    pub slots: i64,
    pub total_price: Decimal,
}

pub fn validate_interval(window: &TimeWindow) -> Result<(), BookingError> {
    if window.is_empty() {
        return Err(BookingError::InvalidInterval);
    }
    Ok(())
}

pub fn ensure_court_active(court: &Court) -> Result<(), BookingError> {
    if !court.active {
        return Err(BookingError::CourtUnavailable);
    }
    Ok(())
}

/// The window must sit inside the opening hours of the day it starts on.
/// Windows that cross midnight are refused.
pub fn check_operating_hours(court: &Court, window: &TimeWindow) -> Result<(), BookingError> {
    let date = window.start.date();
    let outside = window.end.date() != date
        || window.start < court.opens_at(date)
        || window.end > court.closes_at(date);

    if outside {
        return Err(BookingError::OutsideOperatingHours {
            open: court.open_time,
            close: court.close_time,
        });
    }
    Ok(())
}

/// Number of whole slots covered by the window.
pub fn slot_count(court: &Court, window: &TimeWindow) -> Result<i64, BookingError> {
    let seconds = window.duration().num_seconds();
    let minutes = seconds / 60;
    let slot_minutes = i64::from(court.slot_minutes);

    if slot_minutes <= 0 || seconds % 60 != 0 || minutes <= 0 || minutes % slot_minutes != 0 {
        return Err(BookingError::MisalignedInterval {
            minutes,
            slot_minutes: court.slot_minutes,
        });
    }
    Ok(minutes / slot_minutes)
}

pub fn total_price(court: &Court, slots: i64) -> Decimal {
    court.price_per_slot * Decimal::from(slots)
}

/// Runs every store-independent check against `court` and prices the window.
pub fn quote(court: &Court, window: TimeWindow) -> Result<BookingQuote, BookingError> {
    validate_interval(&window)?;
    ensure_court_active(court)?;
    check_operating_hours(court, &window)?;
    let slots = slot_count(court, &window)?;

    Ok(BookingQuote {
        window,
        slots,
        total_price: total_price(court, slots),
    })
}
