pub mod availability;
pub mod court;
pub mod datetime;
pub mod reservation;
pub mod sport;
pub mod user;
