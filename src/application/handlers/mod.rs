//! Application handlers.
//!
//! One command or query handler per operation. Handlers hold their ports
//! as `Arc<dyn Port>`, validate through the domain, persist, then publish.
//! Publishing failures after a commit are logged, never returned.

pub mod admin;
pub mod announcement;
pub mod booking;
pub mod member;
pub mod schedule;

mod publish;
pub(crate) use publish::publish_committed;

#[cfg(test)]
pub(crate) mod test_support;

pub use admin::*;
pub use announcement::*;
pub use booking::*;
pub use member::*;
pub use schedule::*;
