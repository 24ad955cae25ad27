//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Repositories
//!
//! - `ClassTypeRepository`, `ClassSessionRepository` - the schedule
//! - `BookingRepository` - bookings, including atomic placement and cancellation
//! - `MemberRepository` - member profiles
//! - `AnnouncementRepository` - studio notices
//!
//! ## Infrastructure
//!
//! - `SessionValidator` - bearer-token validation
//! - `EventPublisher` - domain event publishing

mod announcement_repository;
mod booking_repository;
mod class_session_repository;
mod class_type_repository;
mod event_publisher;
mod member_repository;
mod session_validator;

pub use announcement_repository::AnnouncementRepository;
pub use booking_repository::{BookingRepository, Cancellation};
pub use class_session_repository::ClassSessionRepository;
pub use class_type_repository::ClassTypeRepository;
pub use event_publisher::EventPublisher;
pub use member_repository::MemberRepository;
pub use session_validator::SessionValidator;
