//! Booking aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    BookingId, ClassSessionId, DomainError, ErrorCode, Timestamp, UserId,
};

use super::BookingStatus;

/// A member's reservation against one class session.
///
/// # Invariants
///
/// - created in an active status (`booked` or `waitlist`)
/// - `cancelled_at` is set exactly when `status` is `cancelled`
/// - cancellation is terminal; rebooking creates a new row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    id: BookingId,
    session_id: ClassSessionId,
    user_id: UserId,
    status: BookingStatus,
    created_at: Timestamp,
    cancelled_at: Option<Timestamp>,
}

impl Booking {
    /// Creates a new active booking.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if `status` is `cancelled`
    pub fn new(
        id: BookingId,
        session_id: ClassSessionId,
        user_id: UserId,
        status: BookingStatus,
    ) -> Result<Self, DomainError> {
        if !status.is_active() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "A booking must start as booked or waitlist",
            ));
        }

        Ok(Self {
            id,
            session_id,
            user_id,
            status,
            created_at: Timestamp::now(),
            cancelled_at: None,
        })
    }

    /// Reconstitute a booking from persistence (no validation).
    pub fn reconstitute(
        id: BookingId,
        session_id: ClassSessionId,
        user_id: UserId,
        status: BookingStatus,
        created_at: Timestamp,
        cancelled_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            session_id,
            user_id,
            status,
            created_at,
            cancelled_at,
        }
    }

    pub fn id(&self) -> &BookingId {
        &self.id
    }

    pub fn session_id(&self) -> &ClassSessionId {
        &self.session_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn cancelled_at(&self) -> Option<&Timestamp> {
        self.cancelled_at.as_ref()
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// Cancels the booking, returning the status it held before.
    ///
    /// # Errors
    ///
    /// - `BookingAlreadyCancelled` if it is already cancelled
    pub fn cancel(&mut self) -> Result<BookingStatus, DomainError> {
        if self.status == BookingStatus::Cancelled {
            return Err(DomainError::new(
                ErrorCode::BookingAlreadyCancelled,
                format!("Booking {} is already cancelled", self.id),
            ));
        }

        let previous = self.status;
        self.status = BookingStatus::Cancelled;
        self.cancelled_at = Some(Timestamp::now());
        Ok(previous)
    }

    /// Moves a waitlisted booking into a freed spot.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless the booking is waitlisted
    pub fn promote(&mut self) -> Result<(), DomainError> {
        if self.status != BookingStatus::Waitlist {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot promote a {} booking", self.status),
            ));
        }
        self.status = BookingStatus::Booked;
        Ok(())
    }
}
