//! HTTP adapter for studio announcements.
//!
//! Posting lives under the admin routes.

mod dto;
mod handlers;
mod routes;

pub use dto::{AnnouncementParams, AnnouncementResponse, PostAnnouncementRequest};
pub use handlers::AnnouncementHandlers;
pub use routes::announcement_routes;
