//! PostAnnouncementHandler - staff post a notice.

use std::sync::Arc;

use crate::application::handlers::admin::AdminGuard;
use crate::domain::announcement::{Announcement, AnnouncementError, AnnouncementPosted};
use crate::application::handlers::publish_committed;
use crate::domain::foundation::{AnnouncementId, CommandMetadata, EventId};
use crate::ports::{AnnouncementRepository, EventPublisher, MemberRepository};

#[derive(Debug, Clone)]
pub struct PostAnnouncementCommand {
    pub title: String,
    pub message: String,
}

pub struct PostAnnouncementHandler {
    guard: AdminGuard,
    announcements: Arc<dyn AnnouncementRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl PostAnnouncementHandler {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        announcements: Arc<dyn AnnouncementRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            guard: AdminGuard::new(members),
            announcements,
            event_publisher,
        }
    }

    /// Attributed to the caller in `metadata`.
    pub async fn handle(
        &self,
        cmd: PostAnnouncementCommand,
        metadata: CommandMetadata,
    ) -> Result<Announcement, AnnouncementError> {
        self.guard.require_admin(&metadata.user_id).await?;

        let announcement = Announcement::new(
            AnnouncementId::new(),
            cmd.title,
            cmd.message,
            metadata.user_id.clone(),
        )?;
        self.announcements.save(&announcement).await?;

        let event = AnnouncementPosted {
            event_id: EventId::new(),
            announcement_id: *announcement.id(),
            title: announcement.title().to_string(),
            created_by: announcement.created_by().clone(),
            created_at: *announcement.created_at(),
        };
        publish_committed(self.event_publisher.as_ref(), &event, &metadata).await;

        Ok(announcement)
    }
}
