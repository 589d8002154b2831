//! # Availability Handlers
//!
//! `GET /availability?date=YYYY-MM-DD&club_id=<uuid>&sport_id=<uuid>`
//!
//! Lists, per active court, the slots of `date` that overlap neither an active
//! reservation nor a blackout period. `date` defaults to today (server local
//! time) and `venue_id` is accepted in place of `club_id`.
//!
//! The listing is a snapshot: it takes no locks, so a slot shown as free can
//! still be refused by a concurrent booking.

use std::{fmt, str::FromStr, sync::Arc};

use axum::extract::{rejection::QueryRejection, Query, State};
use chrono::{Local, NaiveDate};
use courtside_core::{
    errors::CourtsideError,
    models::{availability::CourtAvailability, court::CourtFilter, datetime},
};
use serde::{de, Deserialize, Deserializer};
use utoipa::IntoParams;
use tracing::debug;
use uuid::Uuid;

use crate::{
    middleware::error_handling::{AppError, ErrorResponse},
    response::ApiResponse,
    ApiState,
};

/// Query parameters for the availability endpoint
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvailabilityQuery {
    /// Date as `YYYY-MM-DD`, today when omitted
    #[param(example = "2026-03-14")]
    pub date: Option<String>,

    /// Venue to restrict the listing to (`venue_id` is accepted too)
    #[serde(default, alias = "venue_id", deserialize_with = "empty_as_none")]
    pub club_id: Option<Uuid>,

    /// Sport to restrict the listing to
    #[serde(default, deserialize_with = "empty_as_none")]
    pub sport_id: Option<Uuid>,
}

/// `?club_id=` means no filter, the same as leaving the parameter out.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(de::Error::custom),
    }
}

impl AvailabilityQuery {
    pub fn date(&self) -> Result<NaiveDate, CourtsideError> {
        match self.date.as_deref().map(str::trim) {
            None | Some("") => Ok(Local::now().date_naive()),
            Some(raw) => datetime::parse_date(raw).ok_or_else(|| {
                CourtsideError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", raw))
            }),
        }
    }

    pub fn filter(&self) -> CourtFilter {
        CourtFilter {
            venue_id: self.club_id,
            sport_id: self.sport_id,
        }
    }
}

#[utoipa::path(
    get,
    path = "/availability",
    tag = "availability",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Free slots per active court, ordered by court name", body = [CourtAvailability]),
        (status = 422, description = "Malformed date or filter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<AvailabilityQuery>, QueryRejection>,
) -> Result<ApiResponse<Vec<CourtAvailability>>, AppError> {
    let Query(query) = query?;
    let date = query.date()?;
    let filter = query.filter();

    let courts = courtside_db::availability::get_availability(&state.db_pool, date, &filter).await?;
    debug!("Availability for {}: {} court(s)", date, courts.len());

    Ok(ApiResponse::success(courts))
}
