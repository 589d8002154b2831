use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A bookable window on one court. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Slot {
    pub court_id: Uuid,
    #[serde(with = "crate::models::datetime")]
    #[schema(value_type = String, example = "2026-03-14 18:00:00")]
    pub start: NaiveDateTime,
    #[serde(with = "crate::models::datetime")]
    #[schema(value_type = String, example = "2026-03-14 18:00:00")]
    pub end: NaiveDateTime,
    #[schema(value_type = String, example = "50.00")]
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CourtAvailability {
    pub court_id: Uuid,
    pub court_name: String,
    pub venue_name: String,
    pub sport_name: String,
    pub slots: Vec<Slot>,
}
