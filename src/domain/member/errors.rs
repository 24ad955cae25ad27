//! Member-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors raised by profile and member-directory operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemberError {
    #[error("Member not found: {0}")]
    NotFound(String),

    #[error("Only studio staff can do that")]
    Forbidden,

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Export failed: {0}")]
    ExportFailed(String),

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl MemberError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MemberError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn export(message: impl Into<String>) -> Self {
        MemberError::ExportFailed(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            MemberError::NotFound(_) => ErrorCode::MemberNotFound,
            MemberError::Forbidden => ErrorCode::Forbidden,
            MemberError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            MemberError::ExportFailed(_) => ErrorCode::InternalError,
            MemberError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<DomainError> for MemberError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden => MemberError::Forbidden,
            ErrorCode::MemberNotFound => MemberError::NotFound(err.message),
            ErrorCode::ValidationFailed => MemberError::ValidationFailed {
                field: err.field().unwrap_or("unknown").to_string(),
                message: err.message,
            },
            _ => MemberError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationError> for MemberError {
    fn from(err: ValidationError) -> Self {
        MemberError::validation(err.field(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_maps_through() {
        let err: MemberError = DomainError::new(ErrorCode::Forbidden, "no").into();
        assert_eq!(err, MemberError::Forbidden);
    }

    #[test]
    fn export_failure_is_internal() {
        assert_eq!(MemberError::export("io").code(), ErrorCode::InternalError);
    }
}
