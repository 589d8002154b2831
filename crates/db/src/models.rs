use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};
use courtside_core::models::{
    court::Court,
    reservation::{Reservation, ReservationStatus},
    sport::Sport,
    user::{Role, User},
};
use eyre::{eyre, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A court row joined with its venue and sport names.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCourt {
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

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReservation {
    pub id: Uuid,
    pub court_id: Uuid,
    pub user_id: Uuid,
    pub start_datetime: NaiveDateTime,
    pub end_datetime: NaiveDateTime,
    pub status: String,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBlackoutPeriod {
    pub id: Uuid,
    pub court_id: Uuid,
    pub start_datetime: NaiveDateTime,
    pub end_datetime: NaiveDateTime,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub api_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSport {
    pub id: Uuid,
    pub name: String,
}

impl DbReservation {
    pub fn status(&self) -> Result<ReservationStatus> {
        self.status.parse().map_err(|e: String| eyre!(e))
    }
}

impl DbUser {
    pub fn role(&self) -> Result<Role> {
        self.role.parse().map_err(|e: String| eyre!(e))
    }
}

impl From<DbCourt> for Court {
    fn from(row: DbCourt) -> Self {
        Court {
            id: row.id,
            name: row.name,
            venue_id: row.venue_id,
            venue_name: row.venue_name,
            sport_id: row.sport_id,
            sport_name: row.sport_name,
            active: row.active,
            open_time: row.open_time,
            close_time: row.close_time,
            slot_minutes: row.slot_minutes,
            price_per_slot: row.price_per_slot,
        }
    }
}

impl TryFrom<DbReservation> for Reservation {
    type Error = eyre::Report;

    fn try_from(row: DbReservation) -> Result<Self> {
        let status = row.status()?;
        Ok(Reservation {
            id: row.id,
            court_id: row.court_id,
            user_id: row.user_id,
            start_datetime: row.start_datetime,
            end_datetime: row.end_datetime,
            status,
            total_price: row.total_price,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<DbUser> for User {
    type Error = eyre::Report;

    fn try_from(row: DbUser) -> Result<Self> {
        let role = row.role()?;
        Ok(User {
            id: row.id,
            name: row.name,
            email: row.email,
            role,
            created_at: row.created_at,
        })
    }
}

impl From<DbSport> for Sport {
    fn from(row: DbSport) -> Self {
        Sport {
            id: row.id,
            name: row.name,
        }
    }
}
