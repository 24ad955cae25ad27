//! Announcement domain module.
//!
//! Short notices staff post to the member home screen.

mod aggregate;
mod errors;
mod events;

pub use aggregate::{Announcement, MAX_LIST_LIMIT};
pub use errors::AnnouncementError;
pub use events::AnnouncementPosted;
