//! HTTP handlers for the public schedule.
//!
//! All three endpoints work for anonymous visitors; a signed-in member
//! additionally sees their own booking and the matching action.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::extract::QueryParams;
use crate::adapters::http::error::ErrorRenderer;
use crate::adapters::http::middleware::OptionalAuth;
use crate::adapters::http::params::{parse_id, parse_optional_date, parse_optional_id};
use crate::application::handlers::schedule::{
    GetSessionDetailHandler, GetSessionDetailQuery, ListClassTypesHandler, ListDayScheduleHandler,
    ListDayScheduleQuery,
};

use super::dto::{ClassTypeResponse, DayScheduleResponse, ScheduleParams, SessionResponse};

#[derive(Clone)]
pub struct ScheduleHandlers {
    day_schedule: Arc<ListDayScheduleHandler>,
    session_detail: Arc<GetSessionDetailHandler>,
    class_types: Arc<ListClassTypesHandler>,
    errors: ErrorRenderer,
}

impl ScheduleHandlers {
    pub fn new(
        day_schedule: Arc<ListDayScheduleHandler>,
        session_detail: Arc<GetSessionDetailHandler>,
        class_types: Arc<ListClassTypesHandler>,
        errors: ErrorRenderer,
    ) -> Self {
        Self {
            day_schedule,
            session_detail,
            class_types,
            errors,
        }
    }
}

/// GET /api/schedule - Sessions for one studio day
pub async fn get_schedule(
    State(handlers): State<ScheduleHandlers>,
    OptionalAuth(user): OptionalAuth,
    QueryParams(params): QueryParams<ScheduleParams>,
) -> Response {
    let date = match parse_optional_date(params.date.as_deref(), "date") {
        Ok(date) => date,
        Err(response) => return response,
    };
    let class_type_id = match parse_optional_id(params.class_type_id.as_deref(), "class type") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let query = ListDayScheduleQuery {
        date,
        class_type_id,
        available_only: params.available_only,
        viewer: user.map(|u| u.id),
    };

    match handlers.day_schedule.handle(query).await {
        Ok(day) => (StatusCode::OK, Json(DayScheduleResponse::from(day))).into_response(),
        Err(e) => handlers.errors.render(e),
    }
}

/// GET /api/sessions/:id - One session with availability
pub async fn get_session(
    State(handlers): State<ScheduleHandlers>,
    OptionalAuth(user): OptionalAuth,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_id(&session_id, "session") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let query = GetSessionDetailQuery {
        session_id,
        viewer: user.map(|u| u.id),
    };

    match handlers.session_detail.handle(query).await {
        Ok(view) => (StatusCode::OK, Json(SessionResponse::from(view))).into_response(),
        Err(e) => handlers.errors.render(e),
    }
}

/// GET /api/class-types - Catalogue for the schedule filter
pub async fn list_class_types(State(handlers): State<ScheduleHandlers>) -> Response {
    match handlers.class_types.handle().await {
        Ok(types) => {
            let body: Vec<ClassTypeResponse> = types.iter().map(Into::into).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => handlers.errors.render(e),
    }
}
