//! Event publishing after a committed write.

use crate::domain::foundation::{CommandMetadata, DomainEvent, SerializableDomainEvent};
use crate::ports::EventPublisher;

/// Publishes `event` tagged with the request's correlation and user ids.
///
/// The state change is already committed, so a failure is logged rather
/// than returned: the caller's write stands and a retry would only hit a
/// conflict.
pub(crate) async fn publish_committed<E: SerializableDomainEvent>(
    publisher: &dyn EventPublisher,
    event: &E,
    metadata: &CommandMetadata,
) {
    let result = match event.to_envelope() {
        Ok(envelope) => {
            publisher
                .publish(
                    envelope
                        .with_correlation_id(metadata.correlation_id())
                        .with_user_id(metadata.user_id.to_string()),
                )
                .await
        }
        Err(e) => Err(e),
    };

    if let Err(error) = result {
        tracing::error!(
            event_type = event.event_type(),
            aggregate_id = %event.aggregate_id(),
            error = %error,
            "Failed to publish event after commit"
        );
    }
}
