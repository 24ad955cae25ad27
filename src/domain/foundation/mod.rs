//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, errors and event plumbing
//! that form the vocabulary of the studio booking domain.

mod auth;
mod command;
mod errors;
mod events;
mod ids;
mod money;
mod text;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{AnnouncementId, BookingId, ClassSessionId, ClassTypeId, UserId};
pub use money::{parse_major_to_minor, Currency, Price};
pub use text::normalize_optional;
pub use timestamp::Timestamp;
