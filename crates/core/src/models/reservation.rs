use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::slots::TimeWindow;

/// Lifecycle of a reservation.
///
/// `pending` and `confirmed` reservations hold their court; `cancelled` ones
/// never take part in conflict checks and cannot be revived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl ReservationStatus {
    /// Statuses that occupy a court, as stored in the database.
    pub const ACTIVE: [&'static str; 2] = ["pending", "confirmed"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, ReservationStatus::Cancelled)
    }

    pub fn can_transition_to(&self, next: ReservationStatus) -> bool {
        use ReservationStatus::*;
        matches!(
            (self, next),
            (Pending, Pending)
                | (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, Confirmed)
                | (Confirmed, Cancelled)
                | (Cancelled, Cancelled)
        )
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    // Older rows used CREATED/CONFIRMED/CANCELED.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" | "created" => Ok(ReservationStatus::Pending),
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "cancelled" | "canceled" => Ok(ReservationStatus::Cancelled),
            other => Err(format!("unknown reservation status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Reservation {
    pub id: Uuid,
    pub court_id: Uuid,
    pub user_id: Uuid,
    #[serde(with = "crate::models::datetime")]
    #[schema(value_type = String, example = "2026-03-14 18:00:00")]
    pub start_datetime: NaiveDateTime,
    #[serde(with = "crate::models::datetime")]
    #[schema(value_type = String, example = "2026-03-14 18:00:00")]
    pub end_datetime: NaiveDateTime,
    pub status: ReservationStatus,
    #[schema(value_type = String, example = "50.00")]
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start_datetime, self.end_datetime)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateReservationRequest {
    pub court_id: Uuid,
    #[serde(with = "crate::models::datetime")]
    #[schema(value_type = String, example = "2026-03-14 18:00:00")]
    pub start_datetime: NaiveDateTime,
    #[serde(with = "crate::models::datetime")]
    #[schema(value_type = String, example = "2026-03-14 18:00:00")]
    pub end_datetime: NaiveDateTime,
}

/// Full replacement of a reservation's court and interval (`PUT`).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateReservationRequest {
    pub court_id: Uuid,
    #[serde(with = "crate::models::datetime")]
    #[schema(value_type = String, example = "2026-03-14 18:00:00")]
    pub start_datetime: NaiveDateTime,
    #[serde(with = "crate::models::datetime")]
    #[schema(value_type = String, example = "2026-03-14 18:00:00")]
    pub end_datetime: NaiveDateTime,
}

/// Partial update (`PATCH`). Missing fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PatchReservationRequest {
    #[serde(default)]
    pub court_id: Option<Uuid>,
    #[serde(default, with = "crate::models::datetime::option")]
    #[schema(value_type = Option<String>, example = "2026-03-14 18:00:00")]
    pub start_datetime: Option<NaiveDateTime>,
    #[serde(default, with = "crate::models::datetime::option")]
    #[schema(value_type = Option<String>, example = "2026-03-14 18:00:00")]
    pub end_datetime: Option<NaiveDateTime>,
    #[serde(default)]
    pub status: Option<ReservationStatus>,
}

impl PatchReservationRequest {
    pub fn is_empty(&self) -> bool {
        self.court_id.is_none()
            && self.start_datetime.is_none()
            && self.end_datetime.is_none()
            && self.status.is_none()
    }

    pub fn moves_reservation(&self) -> bool {
        self.court_id.is_some() || self.start_datetime.is_some() || self.end_datetime.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReservationIdResponse {
    pub id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CancelReservationResponse {
    pub cancelled_id: Uuid,
}
