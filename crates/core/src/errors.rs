use chrono::NaiveTime;
use thiserror::Error;

/// Reasons a proposed booking window is refused.
///
/// Each variant maps to its own client-facing error; none of them is retried
/// inside the service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("End must be after start")]
    InvalidInterval,

    #[error("Interval of {minutes} minutes is not a multiple of the {slot_minutes} minute slot")]
    MisalignedInterval { minutes: i64, slot_minutes: i32 },

    #[error("Interval outside court opening hours ({open} - {close})")]
    OutsideOperatingHours { open: NaiveTime, close: NaiveTime },

    #[error("Court not found or inactive")]
    CourtUnavailable,

    #[error("Conflict with an existing reservation")]
    SlotConflict,

    #[error("Court is blocked for the selected interval")]
    CourtBlocked,
}

#[derive(Error, Debug)]
pub enum CourtsideError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication required: {0}")]
    AuthRequired(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type CourtsideResult<T> = Result<T, CourtsideError>;
