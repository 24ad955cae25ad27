//! Error responses for the HTTP API.
//!
//! Every failure leaves the service as `{ "code": "...", "message": "..." }`.
//! Module errors carry an [`ErrorCode`]; the status is derived from it so the
//! mapping lives in one place.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::announcement::AnnouncementError;
use crate::domain::booking::BookingError;
use crate::domain::foundation::ErrorCode;
use crate::domain::member::MemberError;
use crate::domain::schedule::ScheduleError;

/// Message shown for 5xx responses when verbose errors are off.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Standard error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new("UNAUTHENTICATED", message)
    }

    /// 400 response for unparseable path or query values.
    pub fn invalid_input(message: impl Into<String>) -> Response {
        (StatusCode::BAD_REQUEST, Json(Self::bad_request(message))).into_response()
    }
}

/// Status code for a domain error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::ClassTypeNotFound
        | ErrorCode::ClassSessionNotFound
        | ErrorCode::BookingNotFound
        | ErrorCode::MemberNotFound => StatusCode::NOT_FOUND,
        ErrorCode::AlreadyBooked
        | ErrorCode::SessionCancelled
        | ErrorCode::BookingAlreadyCancelled
        | ErrorCode::InvalidStateTransition => StatusCode::CONFLICT,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Module errors that can be rendered as HTTP responses.
pub trait ApiError {
    fn error_code(&self) -> ErrorCode;
    fn error_message(&self) -> String;
}

macro_rules! api_error {
    ($($ty:ty),+) => {
        $(
            impl ApiError for $ty {
                fn error_code(&self) -> ErrorCode {
                    self.code()
                }

                fn error_message(&self) -> String {
                    self.message()
                }
            }
        )+
    };
}

api_error!(BookingError, ScheduleError, MemberError, AnnouncementError);

/// Turns module errors into responses.
///
/// Server-side failures are logged; their message is replaced with a generic
/// one unless `verbose` is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorRenderer {
    verbose: bool,
}

impl ErrorRenderer {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn render<E: ApiError>(&self, error: E) -> Response {
        let code = error.error_code();
        let status = status_for(code);
        let mut message = error.error_message();

        if status.is_server_error() {
            tracing::error!(code = %code, error = %message, "request failed");
            if !self.verbose {
                message = GENERIC_ERROR_MESSAGE.to_string();
            }
        }

        (status, Json(ErrorResponse::new(code.to_string(), message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{BookingId, ClassSessionId};

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn conflicts_map_to_409() {
        let renderer = ErrorRenderer::default();
        for err in [
            BookingError::AlreadyBooked,
            BookingError::SessionCancelled,
            BookingError::AlreadyCancelled,
        ] {
            assert_eq!(renderer.render(err).status(), StatusCode::CONFLICT);
        }
    }

    #[test]
    fn not_found_maps_to_404() {
        let renderer = ErrorRenderer::default();
        assert_eq!(
            renderer
                .render(BookingError::NotFound(BookingId::new()))
                .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            renderer
                .render(ScheduleError::SessionNotFound(ClassSessionId::new()))
                .status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn forbidden_and_validation_statuses() {
        let renderer = ErrorRenderer::default();
        assert_eq!(
            renderer.render(MemberError::Forbidden).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            renderer
                .render(ScheduleError::validation("capacity", "must be positive"))
                .status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn body_carries_code_and_message() {
        let response = ErrorRenderer::default().render(BookingError::AlreadyBooked);
        let body = body_json(response).await;
        assert_eq!(body["code"], "ALREADY_BOOKED");
        assert_eq!(body["message"], "You already have a booking for this class");
    }

    #[tokio::test]
    async fn infrastructure_message_is_hidden_unless_verbose() {
        let hidden = ErrorRenderer::new(false)
            .render(AnnouncementError::Infrastructure("pool timed out".to_string()));
        assert_eq!(hidden.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(hidden).await["message"], GENERIC_ERROR_MESSAGE);

        let shown = ErrorRenderer::new(true)
            .render(AnnouncementError::Infrastructure("pool timed out".to_string()));
        assert_eq!(body_json(shown).await["message"], "Error: pool timed out");
    }
}
