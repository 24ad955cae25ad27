//! EventPublisher port - Interface for publishing domain events.
//!
//! Handlers publish booking, schedule and announcement events without
//! knowing whether they end up in a log, an in-memory bus or a broker.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Publishing happens after the state change is committed; a failure here
/// does not roll the change back, and handlers log it instead of failing
/// the request.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publish several events in order.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}
