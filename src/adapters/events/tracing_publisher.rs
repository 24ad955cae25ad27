//! Event publisher that writes domain events to the structured log.
//!
//! There is no downstream consumer of domain events yet, so production
//! wiring records them as `tracing` events that log pipelines can pick up.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::EventPublisher;

#[derive(Debug, Clone, Default)]
pub struct TracingEventPublisher;

impl TracingEventPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        tracing::info!(
            event_id = %event.event_id,
            event_type = %event.event_type,
            aggregate_type = %event.aggregate_type,
            aggregate_id = %event.aggregate_id,
            correlation_id = event.metadata.correlation_id.as_deref().unwrap_or("-"),
            user_id = event.metadata.user_id.as_deref().unwrap_or("-"),
            payload = %event.payload,
            "domain event"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn publish_never_fails() {
        let publisher = TracingEventPublisher::new();
        let envelope = EventEnvelope::new("announcement.posted.v1", "a-1", "Announcement", json!({}))
            .with_correlation_id("req-1");
        assert!(publisher.publish(envelope).await.is_ok());
    }
}
