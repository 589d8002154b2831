//! Domain types and booking rules for the Courtside reservation service.
//!
//! Nothing in this crate talks to the database. The slot generator, the
//! half-open overlap predicate, the booking validation pipeline and the
//! availability assembler are all expressed over plain values plus the
//! [`availability::ConflictChecker`] trait, which the `courtside-db` crate
//! implements on top of Postgres.

pub mod availability;
pub mod booking;
pub mod errors;
pub mod models;
pub mod slots;
