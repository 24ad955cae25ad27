//! HTTP handlers for member bookings.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::extract::{JsonBody, QueryParams};
use crate::adapters::http::error::ErrorRenderer;
use crate::adapters::http::middleware::{CorrelationId, RequireAuth};
use crate::adapters::http::params::parse_id;
use crate::application::handlers::booking::{
    CancelBookingCommand, CancelBookingHandler, CreateBookingCommand, CreateBookingHandler,
    ListMyBookingsHandler, ListMyBookingsQuery,
};

use super::dto::{
    CancelBookingResponse, CreateBookingRequest, CreateBookingResponse, MyBookingResponse,
    MyBookingsParams,
};

#[derive(Clone)]
pub struct BookingHandlers {
    create_handler: Arc<CreateBookingHandler>,
    cancel_handler: Arc<CancelBookingHandler>,
    list_handler: Arc<ListMyBookingsHandler>,
    errors: ErrorRenderer,
}

impl BookingHandlers {
    pub fn new(
        create_handler: Arc<CreateBookingHandler>,
        cancel_handler: Arc<CancelBookingHandler>,
        list_handler: Arc<ListMyBookingsHandler>,
        errors: ErrorRenderer,
    ) -> Self {
        Self {
            create_handler,
            cancel_handler,
            list_handler,
            errors,
        }
    }
}

/// POST /api/bookings - Book a session or join its waitlist
pub async fn create_booking(
    State(handlers): State<BookingHandlers>,
    RequireAuth(user): RequireAuth,
    correlation: CorrelationId,
    JsonBody(req): JsonBody<CreateBookingRequest>,
) -> Response {
    let session_id = match parse_id(&req.session_id, "session") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = CreateBookingCommand {
        session_id,
        user_id: user.id.clone(),
    };
    let metadata = correlation.metadata(user.id);

    match handlers.create_handler.handle(cmd, metadata).await {
        Ok(result) => {
            let response = CreateBookingResponse::new((&result.booking).into());
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handlers.errors.render(e),
    }
}

/// POST /api/bookings/:id/cancel - Cancel one of the caller's bookings
pub async fn cancel_booking(
    State(handlers): State<BookingHandlers>,
    RequireAuth(user): RequireAuth,
    correlation: CorrelationId,
    Path(booking_id): Path<String>,
) -> Response {
    let booking_id = match parse_id(&booking_id, "booking") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = CancelBookingCommand {
        booking_id,
        user_id: user.id.clone(),
    };
    let metadata = correlation.metadata(user.id);

    match handlers.cancel_handler.handle(cmd, metadata).await {
        Ok(result) => (StatusCode::OK, Json(CancelBookingResponse::from(result))).into_response(),
        Err(e) => handlers.errors.render(e),
    }
}

/// GET /api/bookings/mine - The caller's bookings, newest first
pub async fn list_my_bookings(
    State(handlers): State<BookingHandlers>,
    RequireAuth(user): RequireAuth,
    QueryParams(params): QueryParams<MyBookingsParams>,
) -> Response {
    let query = ListMyBookingsQuery {
        user_id: user.id,
        upcoming_only: params.upcoming_only,
    };

    match handlers.list_handler.handle(query).await {
        Ok(items) => {
            let body: Vec<MyBookingResponse> = items.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => handlers.errors.render(e),
    }
}
