//! HTTP DTOs for studio announcements.

use serde::{Deserialize, Serialize};

use crate::domain::announcement::Announcement;

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct AnnouncementParams {
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostAnnouncementRequest {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnnouncementResponse {
    pub id: String,
    pub title: String,
    pub message: String,
    pub created_by: String,
    pub created_at: String,
}

impl From<&Announcement> for AnnouncementResponse {
    fn from(a: &Announcement) -> Self {
        Self {
            id: a.id().to_string(),
            title: a.title().to_string(),
            message: a.message().to_string(),
            created_by: a.created_by().to_string(),
            created_at: a.created_at().to_rfc3339(),
        }
    }
}
