//! ListAnnouncementsHandler - newest studio notices.

use std::sync::Arc;

use crate::domain::announcement::{Announcement, AnnouncementError, MAX_LIST_LIMIT};
use crate::ports::AnnouncementRepository;

#[derive(Debug, Clone, Copy, Default)]
pub struct ListAnnouncementsQuery {
    /// Falls back to the configured default; clamped to `1..=MAX_LIST_LIMIT`.
    pub limit: Option<u32>,
}

pub struct ListAnnouncementsHandler {
    announcements: Arc<dyn AnnouncementRepository>,
    default_limit: u32,
}

impl ListAnnouncementsHandler {
    pub fn new(announcements: Arc<dyn AnnouncementRepository>, default_limit: u32) -> Self {
        Self {
            announcements,
            default_limit,
        }
    }

    pub async fn handle(
        &self,
        query: ListAnnouncementsQuery,
    ) -> Result<Vec<Announcement>, AnnouncementError> {
        let limit = query
            .limit
            .unwrap_or(self.default_limit)
            .clamp(1, MAX_LIST_LIMIT);
        Ok(self.announcements.list_recent(limit).await?)
    }
}
