//! Announcement-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnouncementError {
    #[error("Only studio staff can do that")]
    Forbidden,

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl AnnouncementError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AnnouncementError::Forbidden => ErrorCode::Forbidden,
            AnnouncementError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            AnnouncementError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<DomainError> for AnnouncementError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => AnnouncementError::Forbidden,
            ErrorCode::ValidationFailed => AnnouncementError::ValidationFailed {
                field: err.field().unwrap_or("unknown").to_string(),
                message: err.message,
            },
            _ => AnnouncementError::Infrastructure(err.to_string()),
        }
    }
}
