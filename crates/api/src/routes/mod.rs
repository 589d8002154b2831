pub mod auth;
pub mod availability;
pub mod docs;
pub mod health;
pub mod reservations;
pub mod sports;
