//! HTTP routes for the public schedule.

use axum::{routing::get, Router};

use super::handlers::{get_schedule, get_session, list_class_types, ScheduleHandlers};

/// Creates the schedule router.
///
/// Routes:
/// - `GET /api/schedule?date=&class_type_id=&available_only=`
/// - `GET /api/sessions/:id`
/// - `GET /api/class-types`
pub fn schedule_routes(handlers: ScheduleHandlers) -> Router {
    Router::new()
        .route("/api/schedule", get(get_schedule))
        .route("/api/sessions/:id", get(get_session))
        .route("/api/class-types", get(list_class_types))
        .with_state(handlers)
}
