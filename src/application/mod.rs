//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands (bookings, admin edits) and queries (schedule, rosters) each
//! get their own handler.

pub mod handlers;

pub use handlers::*;
