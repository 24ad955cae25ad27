//! Schedule domain module.
//!
//! Class types, the sessions scheduled from them, and the studio calendar
//! used to cut the schedule into local days.

mod calendar;
mod class_session;
mod class_type;
mod errors;
mod events;

pub use calendar::StudioCalendar;
pub use class_session::{ClassSession, SessionDetails, MAX_DURATION_MINUTES, MAX_TITLE_LENGTH};
pub use class_type::ClassType;
pub use errors::ScheduleError;
pub use events::SessionCancellationChanged;

#[cfg(test)]
pub(crate) use class_session::test_support;
