//! CancelBookingHandler - Command handler for releasing a booking.
//!
//! Only the owner may cancel. With waitlist promotion enabled, releasing a
//! `booked` row hands the spot to the oldest waitlisted booking.

use std::sync::Arc;

use crate::application::handlers::publish_committed;
use crate::domain::booking::{
    Booking, BookingCancelled, BookingError, BookingStatus, WaitlistPromoted,
};
use crate::domain::foundation::{BookingId, CommandMetadata, EventId, Timestamp, UserId};
use crate::ports::{BookingRepository, Cancellation, EventPublisher};

#[derive(Debug, Clone)]
pub struct CancelBookingCommand {
    pub booking_id: BookingId,
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct CancelBookingResult {
    pub booking: Booking,
    /// Waitlisted booking moved into the freed spot, if any.
    pub promoted: Option<Booking>,
}

pub struct CancelBookingHandler {
    bookings: Arc<dyn BookingRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    auto_promote_waitlist: bool,
}

impl CancelBookingHandler {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            bookings,
            event_publisher,
            auto_promote_waitlist: false,
        }
    }

    pub fn with_waitlist_promotion(mut self, enabled: bool) -> Self {
        self.auto_promote_waitlist = enabled;
        self
    }

    pub async fn handle(
        &self,
        cmd: CancelBookingCommand,
        metadata: CommandMetadata,
    ) -> Result<CancelBookingResult, BookingError> {
        // 1. Load and check ownership
        let booking = self
            .bookings
            .find_by_id(&cmd.booking_id)
            .await?
            .ok_or(BookingError::NotFound(cmd.booking_id))?;

        if !booking.is_owned_by(&cmd.user_id) {
            tracing::warn!(
                booking_id = %cmd.booking_id,
                user_id = %cmd.user_id,
                "Attempt to cancel another member's booking"
            );
            return Err(BookingError::Forbidden);
        }

        // 2. Cancel and hand the spot on in one committed step
        let Cancellation {
            booking,
            previous_status,
            promoted,
        } = self
            .bookings
            .cancel(&cmd.booking_id, self.auto_promote_waitlist)
            .await?;

        tracing::info!(
            booking_id = %booking.id(),
            session_id = %booking.session_id(),
            previous_status = %previous_status,
            "Booking cancelled"
        );

        // 3. Publish
        let event = BookingCancelled {
            event_id: EventId::new(),
            booking_id: *booking.id(),
            session_id: *booking.session_id(),
            user_id: booking.user_id().clone(),
            previous_status,
            cancelled_at: booking.cancelled_at().copied().unwrap_or_else(Timestamp::now),
        };
        publish_committed(self.event_publisher.as_ref(), &event, &metadata).await;

        if let Some(promoted) = &promoted {
            tracing::info!(
                booking_id = %promoted.id(),
                session_id = %promoted.session_id(),
                "Waitlisted booking promoted"
            );
            let event = WaitlistPromoted {
                event_id: EventId::new(),
                booking_id: *promoted.id(),
                session_id: *promoted.session_id(),
                user_id: promoted.user_id().clone(),
                promoted_at: Timestamp::now(),
            };
            publish_committed(self.event_publisher.as_ref(), &event, &metadata).await;
        }

        Ok(CancelBookingResult { booking, promoted })
    }
}
