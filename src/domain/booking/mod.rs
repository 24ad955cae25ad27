//! Booking domain module.
//!
//! Bookings, their lifecycle, and the availability calculator that decides
//! whether a new booking lands as `booked` or `waitlist`.
//!
//! # Events
//!
//! - `BookingCreated`
//! - `BookingCancelled`
//! - `WaitlistPromoted`

mod aggregate;
mod availability;
mod errors;
mod events;
mod status;

pub use aggregate::Booking;
pub use availability::{Availability, BookingAction, SlotStatus, Viewer};
pub use errors::BookingError;
pub use events::{BookingCancelled, BookingCreated, WaitlistPromoted};
pub use status::BookingStatus;
