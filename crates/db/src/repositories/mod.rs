pub mod blackout;
pub mod court;
pub mod reservation;
pub mod sport;
pub mod user;
