//! Member booking commands and queries.

mod cancel_booking;
mod create_booking;
mod list_my_bookings;

pub use cancel_booking::{CancelBookingCommand, CancelBookingHandler, CancelBookingResult};
pub use create_booking::{CreateBookingCommand, CreateBookingHandler, CreateBookingResult};
pub use list_my_bookings::{ListMyBookingsHandler, ListMyBookingsQuery, MyBooking};
