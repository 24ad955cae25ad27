//! Studio announcement handlers.

mod list_announcements;
mod post_announcement;

pub use list_announcements::{ListAnnouncementsHandler, ListAnnouncementsQuery};
pub use post_announcement::{PostAnnouncementCommand, PostAnnouncementHandler};
