//! Booking-specific error types.

use thiserror::Error;

use crate::domain::foundation::{
    BookingId, ClassSessionId, DomainError, ErrorCode, ValidationError,
};

/// Errors raised by booking commands and queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("Class not found: {0}")]
    SessionNotFound(ClassSessionId),

    #[error("Booking not found: {0}")]
    NotFound(BookingId),

    #[error("This class has been cancelled")]
    SessionCancelled,

    #[error("You already have a booking for this class")]
    AlreadyBooked,

    #[error("This booking is already cancelled")]
    AlreadyCancelled,

    #[error("You can only manage your own bookings")]
    Forbidden,

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl BookingError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        BookingError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        BookingError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            BookingError::SessionNotFound(_) => ErrorCode::ClassSessionNotFound,
            BookingError::NotFound(_) => ErrorCode::BookingNotFound,
            BookingError::SessionCancelled => ErrorCode::SessionCancelled,
            BookingError::AlreadyBooked => ErrorCode::AlreadyBooked,
            BookingError::AlreadyCancelled => ErrorCode::BookingAlreadyCancelled,
            BookingError::Forbidden => ErrorCode::Forbidden,
            BookingError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            BookingError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            BookingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<DomainError> for BookingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SessionCancelled => BookingError::SessionCancelled,
            ErrorCode::AlreadyBooked => BookingError::AlreadyBooked,
            ErrorCode::BookingAlreadyCancelled => BookingError::AlreadyCancelled,
            ErrorCode::Forbidden => BookingError::Forbidden,
            ErrorCode::InvalidStateTransition => BookingError::InvalidState(err.message),
            ErrorCode::ValidationFailed => BookingError::ValidationFailed {
                field: err.field().unwrap_or("unknown").to_string(),
                message: err.message,
            },
            ErrorCode::BookingNotFound => match err.details.get("booking_id") {
                Some(id) => match id.parse() {
                    Ok(id) => BookingError::NotFound(id),
                    Err(_) => BookingError::Infrastructure(err.message),
                },
                None => BookingError::Infrastructure(err.message),
            },
            ErrorCode::ClassSessionNotFound => match err.details.get("session_id") {
                Some(id) => match id.parse() {
                    Ok(id) => BookingError::SessionNotFound(id),
                    Err(_) => BookingError::Infrastructure(err.message),
                },
                None => BookingError::Infrastructure(err.message),
            },
            _ => BookingError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationError> for BookingError {
    fn from(err: ValidationError) -> Self {
        BookingError::validation(err.field(), err.to_string())
    }
}
