//! HTTP routes for member bookings.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{cancel_booking, create_booking, list_my_bookings, BookingHandlers};

/// Creates the bookings router.
pub fn booking_routes(handlers: BookingHandlers) -> Router {
    Router::new()
        .route("/api/bookings", post(create_booking))
        .route("/api/bookings/mine", get(list_my_bookings))
        .route("/api/bookings/:id/cancel", post(cancel_booking))
        .with_state(handlers)
}
