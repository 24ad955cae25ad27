//! HTTP DTOs for member bookings.

use serde::{Deserialize, Serialize};

use crate::adapters::http::schedule::{BookingResponse, SessionSummaryResponse};
use crate::application::handlers::booking::{CancelBookingResult, MyBooking};
use crate::domain::booking::BookingStatus;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookingRequest {
    pub session_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MyBookingsParams {
    #[serde(default)]
    pub upcoming_only: bool,
}

/// Result of a booking request; `message` is toast copy.
#[derive(Debug, Clone, Serialize)]
pub struct CreateBookingResponse {
    pub booking: BookingResponse,
    pub message: &'static str,
}

impl CreateBookingResponse {
    pub fn new(booking: BookingResponse) -> Self {
        let message = match booking.status {
            BookingStatus::Waitlist => {
                "This class is full. You've been added to the waitlist."
            }
            _ => "You're booked!",
        };
        Self { booking, message }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CancelBookingResponse {
    pub booking: BookingResponse,
    /// Waitlisted booking moved into the freed spot, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promoted: Option<BookingResponse>,
}

impl From<CancelBookingResult> for CancelBookingResponse {
    fn from(result: CancelBookingResult) -> Self {
        Self {
            booking: (&result.booking).into(),
            promoted: result.promoted.as_ref().map(Into::into),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MyBookingResponse {
    #[serde(flatten)]
    pub booking: BookingResponse,
    /// Missing when the session row was deleted.
    pub session: Option<SessionSummaryResponse>,
}

impl From<MyBooking> for MyBookingResponse {
    fn from(item: MyBooking) -> Self {
        Self {
            booking: (&item.booking).into(),
            session: item
                .session
                .as_ref()
                .map(|s| SessionSummaryResponse::new(s, item.class_type_name.clone())),
        }
    }
}
