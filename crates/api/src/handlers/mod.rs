/// Registration and login
pub mod auth;
/// Bookable slots per court for a date
pub mod availability;
/// Reservation lifecycle
pub mod reservations;
/// Sport catalogue
pub mod sports;
