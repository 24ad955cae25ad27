//! CreateBookingHandler - Command handler for booking a class.
//!
//! The member never chooses `booked` or `waitlist`; the repository derives
//! it from the availability calculator while holding the session lock.

use std::sync::Arc;

use crate::application::handlers::publish_committed;
use crate::domain::booking::{Booking, BookingCreated, BookingError};
use crate::domain::foundation::{ClassSessionId, CommandMetadata, EventId, UserId};
use crate::ports::{BookingRepository, EventPublisher};

#[derive(Debug, Clone)]
pub struct CreateBookingCommand {
    pub session_id: ClassSessionId,
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct CreateBookingResult {
    pub booking: Booking,
    pub event: BookingCreated,
}

pub struct CreateBookingHandler {
    bookings: Arc<dyn BookingRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CreateBookingHandler {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            bookings,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateBookingCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateBookingResult, BookingError> {
        // 1. Place atomically; capacity, cancellation and duplicates are checked under lock
        let booking = self.bookings.place(&cmd.session_id, &cmd.user_id).await?;

        tracing::info!(
            booking_id = %booking.id(),
            session_id = %cmd.session_id,
            status = %booking.status(),
            "Booking placed"
        );

        // 2. Publish
        let event = BookingCreated {
            event_id: EventId::new(),
            booking_id: *booking.id(),
            session_id: *booking.session_id(),
            user_id: booking.user_id().clone(),
            status: booking.status(),
            created_at: *booking.created_at(),
        };
        publish_committed(self.event_publisher.as_ref(), &event, &metadata).await;

        Ok(CreateBookingResult { booking, event })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{metadata, user, FailingPublisher, Fixture};
    use crate::domain::booking::BookingStatus;
    use crate::ports::ClassSessionRepository;

    fn handler(fx: &Fixture) -> CreateBookingHandler {
        CreateBookingHandler::new(fx.bookings.clone(), fx.events.clone())
    }

    fn command(session_id: ClassSessionId, who: &str) -> CreateBookingCommand {
        CreateBookingCommand {
            session_id,
            user_id: user(who),
        }
    }

    #[tokio::test]
    async fn books_when_space_then_waitlists_when_full() {
        let fx = Fixture::new();
        let ct = fx.class_type("Mat", 1000).await;
        let session = fx.session_at(&ct, "Mat", 9, 1).await;
        let handler = handler(&fx);

        let first = handler
            .handle(command(*session.id(), "alice"), metadata(&user("alice")))
            .await
            .unwrap();
        let second = handler
            .handle(command(*session.id(), "bob"), metadata(&user("bob")))
            .await
            .unwrap();

        assert_eq!(first.booking.status(), BookingStatus::Booked);
        assert_eq!(second.booking.status(), BookingStatus::Waitlist);
    }

    #[tokio::test]
    async fn publishes_booking_created_with_correlation() {
        let fx = Fixture::new();
        let ct = fx.class_type("Mat", 1000).await;
        let session = fx.session_at(&ct, "Mat", 9, 5).await;

        let result = handler(&fx)
            .handle(command(*session.id(), "alice"), metadata(&user("alice")))
            .await
            .unwrap();

        let events = fx.events.events_of_type("booking.created.v1");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].aggregate_id, result.booking.id().to_string());
        assert_eq!(
            events[0].metadata.correlation_id.as_deref(),
            Some("test-correlation")
        );
    }

    #[tokio::test]
    async fn rejects_duplicate_active_booking() {
        let fx = Fixture::new();
        let ct = fx.class_type("Mat", 1000).await;
        let session = fx.session_at(&ct, "Mat", 9, 5).await;
        let handler = handler(&fx);

        handler
            .handle(command(*session.id(), "alice"), metadata(&user("alice")))
            .await
            .unwrap();
        let result = handler
            .handle(command(*session.id(), "alice"), metadata(&user("alice")))
            .await;

        assert_eq!(result.unwrap_err(), BookingError::AlreadyBooked);
        assert_eq!(fx.events.event_count(), 1);
    }

    #[tokio::test]
    async fn rejects_cancelled_session() {
        let fx = Fixture::new();
        let ct = fx.class_type("Mat", 1000).await;
        let mut session = fx.session_at(&ct, "Mat", 9, 5).await;
        session.toggle_cancelled();
        fx.sessions.update(&session).await.unwrap();

        let result = handler(&fx)
            .handle(command(*session.id(), "alice"), metadata(&user("alice")))
            .await;
        assert_eq!(result.unwrap_err(), BookingError::SessionCancelled);
    }

    #[tokio::test]
    async fn rejects_unknown_session() {
        let fx = Fixture::new();
        let id = ClassSessionId::new();
        let result = handler(&fx)
            .handle(command(id, "alice"), metadata(&user("alice")))
            .await;
        assert_eq!(result.unwrap_err(), BookingError::SessionNotFound(id));
    }

    #[tokio::test]
    async fn publish_failure_still_reports_the_committed_booking() {
        let fx = Fixture::new();
        let ct = fx.class_type("Mat", 1000).await;
        let session = fx.session_at(&ct, "Mat", 9, 5).await;
        let handler = CreateBookingHandler::new(fx.bookings.clone(), Arc::new(FailingPublisher));

        let result = handler
            .handle(command(*session.id(), "alice"), metadata(&user("alice")))
            .await
            .unwrap();

        let stored = fx
            .bookings
            .find_by_id(result.booking.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status(), BookingStatus::Booked);
    }
}
