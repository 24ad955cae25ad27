//! In-memory adapters.
//!
//! Repository implementations over a shared `InMemoryStore`, used by
//! tests and by local runs without a database.

mod announcement_repository;
mod booking_repository;
mod class_session_repository;
mod class_type_repository;
mod member_repository;
mod store;

pub use announcement_repository::InMemoryAnnouncementRepository;
pub use booking_repository::InMemoryBookingRepository;
pub use class_session_repository::InMemoryClassSessionRepository;
pub use class_type_repository::InMemoryClassTypeRepository;
pub use member_repository::InMemoryMemberRepository;
pub use store::InMemoryStore;
