//! HTTP routes for the caller's own profile.

use axum::{routing::get, Router};

use super::handlers::{get_profile, update_profile, ProfileHandlers};

/// Creates the profile router: `GET /api/me` and `PATCH /api/me`.
pub fn profile_routes(handlers: ProfileHandlers) -> Router {
    Router::new()
        .route("/api/me", get(get_profile).patch(update_profile))
        .with_state(handlers)
}
