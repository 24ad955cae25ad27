//! Announcement domain events.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AnnouncementId, EventId, Timestamp, UserId};
use crate::domain_event;

/// Published when staff post an announcement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementPosted {
    pub event_id: EventId,
    pub announcement_id: AnnouncementId,
    pub title: String,
    pub created_by: UserId,
    pub created_at: Timestamp,
}

domain_event!(
    AnnouncementPosted,
    event_type = "announcement.posted.v1",
    aggregate_id = announcement_id,
    aggregate_type = "Announcement",
    occurred_at = created_at,
    event_id = event_id
);
