use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bookable court together with the names of its venue and sport.
///
/// Courts are administered outside this service; the booking rules only read them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Court {
    pub id: Uuid,
    pub name: String,
    pub venue_id: Uuid,
    pub venue_name: String,
    pub sport_id: Uuid,
    pub sport_name: String,
    pub active: bool,
    pub open_time: NaiveTime,
    pub close_time: NaiveTime,
    pub slot_minutes: i32,
    pub price_per_slot: Decimal,
}

impl Court {
    pub fn opens_at(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.open_time)
    }

    pub fn closes_at(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.close_time)
    }
}

/// Optional venue/sport restriction applied when listing courts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourtFilter {
    pub venue_id: Option<Uuid>,
    pub sport_id: Option<Uuid>,
}

impl CourtFilter {
    pub fn matches(&self, court: &Court) -> bool {
        self.venue_id.is_none_or(|id| id == court.venue_id)
            && self.sport_id.is_none_or(|id| id == court.sport_id)
    }
}
