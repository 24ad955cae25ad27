//! Announcement repository port.

use async_trait::async_trait;

use crate::domain::announcement::Announcement;
use crate::domain::foundation::DomainError;

/// Repository port for announcements.
#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    async fn save(&self, announcement: &Announcement) -> Result<(), DomainError>;

    /// The newest `limit` announcements, newest first.
    async fn list_recent(&self, limit: u32) -> Result<Vec<Announcement>, DomainError>;
}
