//! Schedule domain events.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ClassSessionId, EventId, Timestamp, UserId};
use crate::domain_event;

/// Published when staff cancel or reinstate a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCancellationChanged {
    pub event_id: EventId,
    pub session_id: ClassSessionId,
    pub is_cancelled: bool,
    pub changed_by: UserId,
    pub changed_at: Timestamp,
}

domain_event!(
    SessionCancellationChanged,
    event_type = "class_session.cancellation_changed.v1",
    aggregate_id = session_id,
    aggregate_type = "ClassSession",
    occurred_at = changed_at,
    event_id = event_id
);
