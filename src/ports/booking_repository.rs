//! Booking repository port.
//!
//! `place` and `cancel` are the two capacity-sensitive writes. Implementations must make each one atomic with respect to other
//! writes on the same session, so concurrent requests can never leave more
//! `booked` rows than the session's capacity.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{BookingId, ClassSessionId, DomainError, UserId};

/// What a committed [`BookingRepository::cancel`] changed.
#[derive(Debug, Clone)]
pub struct Cancellation {
    /// The booking, now `cancelled`.
    pub booking: Booking,
    /// Status the booking held before cancelling.
    pub previous_status: BookingStatus,
    /// Waitlisted booking moved into the freed spot, if any.
    pub promoted: Option<Booking>,
}

/// Repository port for bookings.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Atomically create a booking for `user_id` on `session_id`.
    ///
    /// Under a lock on the session: re-reads capacity and the cancelled
    /// flag, rejects a second active booking for the member, counts
    /// `booked` rows, and lets the availability calculator pick `booked`
    /// or `waitlist`.
    ///
    /// # Errors
    ///
    /// - `ClassSessionNotFound` (with a `session_id` detail) if the session doesn't exist
    /// - `SessionCancelled` if the session is cancelled
    /// - `AlreadyBooked` if the member already holds a booked or waitlisted row
    async fn place(
        &self,
        session_id: &ClassSessionId,
        user_id: &UserId,
    ) -> Result<Booking, DomainError>;

    /// Find a booking by ID.
    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError>;

    /// Atomically cancel a booking.
    ///
    /// Under the same session lock `place` takes: marks the booking
    /// cancelled and, when `promote_waitlist` is set and the booking held a
    /// spot, promotes the oldest waitlisted booking if the session now has
    /// room. Both changes commit together or not at all.
    ///
    /// # Errors
    ///
    /// - `BookingNotFound` if it doesn't exist
    /// - `BookingAlreadyCancelled` if it is already cancelled
    async fn cancel(
        &self,
        id: &BookingId,
        promote_waitlist: bool,
    ) -> Result<Cancellation, DomainError>;

    /// Number of `booked` rows per session. Sessions with none are absent.
    async fn count_booked(
        &self,
        session_ids: &[ClassSessionId],
    ) -> Result<HashMap<ClassSessionId, u32>, DomainError>;

    /// The member's booked or waitlisted rows among the given sessions.
    async fn find_active_for_member(
        &self,
        session_ids: &[ClassSessionId],
        user_id: &UserId,
    ) -> Result<Vec<Booking>, DomainError>;

    /// All of a member's bookings, newest first.
    async fn list_for_member(&self, user_id: &UserId) -> Result<Vec<Booking>, DomainError>;

    /// All bookings on a session, oldest first.
    async fn list_for_session(
        &self,
        session_id: &ClassSessionId,
    ) -> Result<Vec<Booking>, DomainError>;
}
