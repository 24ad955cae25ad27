//! HTTP adapter for member bookings.
//!
//! - `POST /api/bookings` - book or join the waitlist
//! - `POST /api/bookings/:id/cancel` - cancel own booking
//! - `GET /api/bookings/mine?upcoming_only=` - own bookings

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CancelBookingResponse, CreateBookingRequest, CreateBookingResponse, MyBookingResponse,
    MyBookingsParams,
};
pub use handlers::BookingHandlers;
pub use routes::booking_routes;
