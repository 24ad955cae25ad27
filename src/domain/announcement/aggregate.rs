//! Announcement entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    AnnouncementId, DomainError, Timestamp, UserId, ValidationError,
};

/// Upper bound on how many announcements one listing returns.
pub const MAX_LIST_LIMIT: u32 = 50;

/// A studio notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    id: AnnouncementId,
    title: String,
    message: String,
    created_by: UserId,
    created_at: Timestamp,
}

impl Announcement {
    /// Post a new announcement. Title and message are required.
    pub fn new(
        id: AnnouncementId,
        title: impl Into<String>,
        message: impl Into<String>,
        created_by: UserId,
    ) -> Result<Self, DomainError> {
        let title = required("title", title.into())?;
        let message = required("message", message.into())?;

        Ok(Self {
            id,
            title,
            message,
            created_by,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute from persistence (no validation).
    pub fn reconstitute(
        id: AnnouncementId,
        title: String,
        message: String,
        created_by: UserId,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            title,
            message,
            created_by,
            created_at,
        }
    }

    pub fn id(&self) -> &AnnouncementId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn created_by(&self) -> &UserId {
        &self.created_by
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}

fn required(field: &str, value: String) -> Result<String, ValidationError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(value)
}
