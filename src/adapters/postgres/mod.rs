//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresClassTypeRepository`, `PostgresClassSessionRepository` - the schedule
//! - `PostgresBookingRepository` - bookings with row-locked placement
//! - `PostgresMemberRepository` - member profiles
//! - `PostgresAnnouncementRepository` - studio notices
//!
//! `connect` and `run_migrations` set up the shared pool.

mod announcement_repository;
mod booking_repository;
mod class_session_repository;
mod class_type_repository;
mod member_repository;
mod pool;

pub use announcement_repository::PostgresAnnouncementRepository;
pub use booking_repository::PostgresBookingRepository;
pub use class_session_repository::PostgresClassSessionRepository;
pub use class_type_repository::PostgresClassTypeRepository;
pub use member_repository::PostgresMemberRepository;
pub use pool::{connect, run_migrations};
