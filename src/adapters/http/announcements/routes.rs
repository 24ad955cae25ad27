//! HTTP routes for the public announcement feed.

use axum::{routing::get, Router};

use super::handlers::{list_announcements, AnnouncementHandlers};

pub fn announcement_routes(handlers: AnnouncementHandlers) -> Router {
    Router::new()
        .route("/api/announcements", get(list_announcements))
        .with_state(handlers)
}
