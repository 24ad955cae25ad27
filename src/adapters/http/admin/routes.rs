//! HTTP routes for the staff console.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    create_class_type, create_session, export_members, list_class_types, list_members,
    list_sessions, post_announcement, session_roster, toggle_cancellation, update_class_type,
    update_session, AdminHandlers,
};

/// Creates the admin router.
///
/// Routes:
/// - `GET/POST /api/admin/class-types`, `PUT /api/admin/class-types/:id`
/// - `GET/POST /api/admin/sessions`, `PUT /api/admin/sessions/:id`
/// - `POST /api/admin/sessions/:id/cancellation`
/// - `GET /api/admin/sessions/:id/roster`
/// - `GET /api/admin/members`, `GET /api/admin/members/export`
/// - `POST /api/admin/announcements`
pub fn admin_routes(handlers: AdminHandlers) -> Router {
    Router::new()
        .route(
            "/api/admin/class-types",
            get(list_class_types).post(create_class_type),
        )
        .route("/api/admin/class-types/:id", put(update_class_type))
        .route("/api/admin/sessions", get(list_sessions).post(create_session))
        .route("/api/admin/sessions/:id", put(update_session))
        .route(
            "/api/admin/sessions/:id/cancellation",
            post(toggle_cancellation),
        )
        .route("/api/admin/sessions/:id/roster", get(session_roster))
        .route("/api/admin/members", get(list_members))
        .route("/api/admin/members/export", get(export_members))
        .route("/api/admin/announcements", post(post_announcement))
        .with_state(handlers)
}
