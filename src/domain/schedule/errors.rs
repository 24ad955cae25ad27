//! Schedule-specific error types.

use thiserror::Error;

use crate::domain::foundation::{
    ClassSessionId, ClassTypeId, DomainError, ErrorCode, ValidationError,
};

/// Errors raised by schedule queries and admin schedule management.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("Class type not found: {0}")]
    ClassTypeNotFound(ClassTypeId),

    #[error("Class not found: {0}")]
    SessionNotFound(ClassSessionId),

    #[error("Only studio staff can do that")]
    Forbidden,

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl ScheduleError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ScheduleError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ScheduleError::ClassTypeNotFound(_) => ErrorCode::ClassTypeNotFound,
            ScheduleError::SessionNotFound(_) => ErrorCode::ClassSessionNotFound,
            ScheduleError::Forbidden => ErrorCode::Forbidden,
            ScheduleError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ScheduleError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<DomainError> for ScheduleError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => ScheduleError::Forbidden,
            ErrorCode::ValidationFailed => ScheduleError::ValidationFailed {
                field: err.field().unwrap_or("unknown").to_string(),
                message: err.message,
            },
            _ => ScheduleError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationError> for ScheduleError {
    fn from(err: ValidationError) -> Self {
        ScheduleError::validation(err.field(), err.to_string())
    }
}
