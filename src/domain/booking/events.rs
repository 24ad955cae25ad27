//! Booking domain events.
//!
//! - `BookingCreated` - Member booked or joined a waitlist
//! - `BookingCancelled` - Member released their booking
//! - `WaitlistPromoted` - Waitlisted booking moved into a freed spot

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{BookingId, ClassSessionId, EventId, Timestamp, UserId};
use crate::domain_event;

use super::BookingStatus;

/// Published when a booking row is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreated {
    pub event_id: EventId,
    pub booking_id: BookingId,
    pub session_id: ClassSessionId,
    pub user_id: UserId,
    /// `booked` or `waitlist`, as decided at insert time.
    pub status: BookingStatus,
    pub created_at: Timestamp,
}

domain_event!(
    BookingCreated,
    event_type = "booking.created.v1",
    aggregate_id = booking_id,
    aggregate_type = "Booking",
    occurred_at = created_at,
    event_id = event_id
);

/// Published when a member cancels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCancelled {
    pub event_id: EventId,
    pub booking_id: BookingId,
    pub session_id: ClassSessionId,
    pub user_id: UserId,
    /// Status held before cancelling; `booked` means a spot was freed.
    pub previous_status: BookingStatus,
    pub cancelled_at: Timestamp,
}

domain_event!(
    BookingCancelled,
    event_type = "booking.cancelled.v1",
    aggregate_id = booking_id,
    aggregate_type = "Booking",
    occurred_at = cancelled_at,
    event_id = event_id
);

/// Published when the oldest waitlisted booking takes a freed spot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitlistPromoted {
    pub event_id: EventId,
    pub booking_id: BookingId,
    pub session_id: ClassSessionId,
    pub user_id: UserId,
    pub promoted_at: Timestamp,
}

domain_event!(
    WaitlistPromoted,
    event_type = "booking.waitlist_promoted.v1",
    aggregate_id = booking_id,
    aggregate_type = "Booking",
    occurred_at = promoted_at,
    event_id = event_id
);
