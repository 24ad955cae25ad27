//! HTTP handlers for the staff console.
//!
//! Every endpoint requires a signed-in caller; the application handlers
//! reject non-admins with 403.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::announcements::{AnnouncementResponse, PostAnnouncementRequest};
use crate::adapters::http::extract::{JsonBody, QueryParams};
use crate::adapters::http::error::{ErrorRenderer, ErrorResponse};
use crate::adapters::http::middleware::{CorrelationId, RequireAuth};
use crate::adapters::http::params::{non_blank, parse_id, parse_optional_date};
use crate::adapters::http::profile::ProfileResponse;
use crate::adapters::http::schedule::{ClassTypeResponse, SessionSummaryResponse};
use crate::application::handlers::admin::{
    AdminListClassTypesHandler, CreateClassSessionCommand, CreateClassSessionHandler,
    CreateClassTypeCommand, CreateClassTypeHandler, ListAdminSessionsHandler,
    ListAdminSessionsQuery, SessionRange, SessionRosterHandler, SessionRosterQuery,
    ToggleSessionCancellationCommand, ToggleSessionCancellationHandler,
    UpdateClassSessionCommand, UpdateClassSessionHandler, UpdateClassTypeCommand,
    UpdateClassTypeHandler,
};
use crate::application::handlers::announcement::{PostAnnouncementCommand, PostAnnouncementHandler};
use crate::application::handlers::member::{
    ExportMembersHandler, ExportMembersQuery, ListMembersHandler, ListMembersQuery,
};

use super::dto::{
    AdminSessionResponse, AdminSessionsParams, ClassTypeRequest, MemberSearchParams,
    RosterResponse, SessionRequest,
};

/// Application handlers behind the admin routes.
#[derive(Clone)]
pub struct AdminHandlers {
    pub list_class_types: Arc<AdminListClassTypesHandler>,
    pub create_class_type: Arc<CreateClassTypeHandler>,
    pub update_class_type: Arc<UpdateClassTypeHandler>,
    pub list_sessions: Arc<ListAdminSessionsHandler>,
    pub create_session: Arc<CreateClassSessionHandler>,
    pub update_session: Arc<UpdateClassSessionHandler>,
    pub toggle_cancellation: Arc<ToggleSessionCancellationHandler>,
    pub roster: Arc<SessionRosterHandler>,
    pub list_members: Arc<ListMembersHandler>,
    pub export_members: Arc<ExportMembersHandler>,
    pub post_announcement: Arc<PostAnnouncementHandler>,
    pub errors: ErrorRenderer,
}

// ════════════════════════════════════════════════════════════════════════════
// Class types
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/class-types
pub async fn list_class_types(
    State(handlers): State<AdminHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers.list_class_types.handle(&user.id).await {
        Ok(types) => {
            let body: Vec<ClassTypeResponse> = types.iter().map(Into::into).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => handlers.errors.render(e),
    }
}

/// POST /api/admin/class-types
pub async fn create_class_type(
    State(handlers): State<AdminHandlers>,
    RequireAuth(user): RequireAuth,
    JsonBody(req): JsonBody<ClassTypeRequest>,
) -> Response {
    let cmd = CreateClassTypeCommand {
        requested_by: user.id,
        fields: req.into(),
    };

    match handlers.create_class_type.handle(cmd).await {
        Ok(ct) => (StatusCode::CREATED, Json(ClassTypeResponse::from(&ct))).into_response(),
        Err(e) => handlers.errors.render(e),
    }
}

/// PUT /api/admin/class-types/:id
pub async fn update_class_type(
    State(handlers): State<AdminHandlers>,
    RequireAuth(user): RequireAuth,
    Path(class_type_id): Path<String>,
    JsonBody(req): JsonBody<ClassTypeRequest>,
) -> Response {
    let class_type_id = match parse_id(&class_type_id, "class type") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = UpdateClassTypeCommand {
        requested_by: user.id,
        class_type_id,
        fields: req.into(),
    };

    match handlers.update_class_type.handle(cmd).await {
        Ok(ct) => (StatusCode::OK, Json(ClassTypeResponse::from(&ct))).into_response(),
        Err(e) => handlers.errors.render(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Sessions
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/sessions?date= or ?from=&to=
pub async fn list_sessions(
    State(handlers): State<AdminHandlers>,
    RequireAuth(user): RequireAuth,
    QueryParams(params): QueryParams<AdminSessionsParams>,
) -> Response {
    let range = match session_range(&params) {
        Ok(range) => range,
        Err(response) => return response,
    };

    let query = ListAdminSessionsQuery {
        requested_by: user.id,
        range,
    };

    match handlers.list_sessions.handle(query).await {
        Ok(rows) => {
            let body: Vec<AdminSessionResponse> = rows.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => handlers.errors.render(e),
    }
}

fn session_range(params: &AdminSessionsParams) -> Result<SessionRange, Response> {
    if let Some(date) = parse_optional_date(params.date.as_deref(), "date")? {
        return Ok(SessionRange::Day(date));
    }
    Ok(SessionRange::Between {
        from: parse_optional_date(params.from.as_deref(), "from")?,
        to: parse_optional_date(params.to.as_deref(), "to")?,
    })
}

/// POST /api/admin/sessions
pub async fn create_session(
    State(handlers): State<AdminHandlers>,
    RequireAuth(user): RequireAuth,
    JsonBody(req): JsonBody<SessionRequest>,
) -> Response {
    let fields = match req.into_fields() {
        Ok(fields) => fields,
        Err(message) => return ErrorResponse::invalid_input(message),
    };

    let cmd = CreateClassSessionCommand {
        requested_by: user.id,
        fields,
    };

    match handlers.create_session.handle(cmd).await {
        Ok(session) => (
            StatusCode::CREATED,
            Json(SessionSummaryResponse::new(&session, None)),
        )
            .into_response(),
        Err(e) => handlers.errors.render(e),
    }
}

/// PUT /api/admin/sessions/:id
pub async fn update_session(
    State(handlers): State<AdminHandlers>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
    JsonBody(req): JsonBody<SessionRequest>,
) -> Response {
    let session_id = match parse_id(&session_id, "session") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let fields = match req.into_fields() {
        Ok(fields) => fields,
        Err(message) => return ErrorResponse::invalid_input(message),
    };

    let cmd = UpdateClassSessionCommand {
        requested_by: user.id,
        session_id,
        fields,
    };

    match handlers.update_session.handle(cmd).await {
        Ok(session) => (
            StatusCode::OK,
            Json(SessionSummaryResponse::new(&session, None)),
        )
            .into_response(),
        Err(e) => handlers.errors.render(e),
    }
}

/// POST /api/admin/sessions/:id/cancellation - Cancel or reinstate
pub async fn toggle_cancellation(
    State(handlers): State<AdminHandlers>,
    RequireAuth(user): RequireAuth,
    correlation: CorrelationId,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_id(&session_id, "session") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = ToggleSessionCancellationCommand { session_id };
    let metadata = correlation.metadata(user.id);

    match handlers.toggle_cancellation.handle(cmd, metadata).await {
        Ok(session) => (
            StatusCode::OK,
            Json(SessionSummaryResponse::new(&session, None)),
        )
            .into_response(),
        Err(e) => handlers.errors.render(e),
    }
}

/// GET /api/admin/sessions/:id/roster
pub async fn session_roster(
    State(handlers): State<AdminHandlers>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_id(&session_id, "session") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let query = SessionRosterQuery {
        requested_by: user.id,
        session_id,
    };

    match handlers.roster.handle(query).await {
        Ok(roster) => (StatusCode::OK, Json(RosterResponse::from(roster))).into_response(),
        Err(e) => handlers.errors.render(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Members
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/members?q=
pub async fn list_members(
    State(handlers): State<AdminHandlers>,
    RequireAuth(user): RequireAuth,
    QueryParams(params): QueryParams<MemberSearchParams>,
) -> Response {
    let query = ListMembersQuery {
        requested_by: user.id,
        search: non_blank(params.q),
    };

    match handlers.list_members.handle(query).await {
        Ok(members) => {
            let body: Vec<ProfileResponse> = members.iter().map(Into::into).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => handlers.errors.render(e),
    }
}

/// GET /api/admin/members/export?q= - CSV download
pub async fn export_members(
    State(handlers): State<AdminHandlers>,
    RequireAuth(user): RequireAuth,
    QueryParams(params): QueryParams<MemberSearchParams>,
) -> Response {
    let query = ExportMembersQuery {
        requested_by: user.id,
        search: non_blank(params.q),
    };

    match handlers.export_members.handle(query).await {
        Ok(export) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", export.filename),
                ),
            ],
            export.csv,
        )
            .into_response(),
        Err(e) => handlers.errors.render(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Announcements
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/admin/announcements
pub async fn post_announcement(
    State(handlers): State<AdminHandlers>,
    RequireAuth(user): RequireAuth,
    correlation: CorrelationId,
    JsonBody(req): JsonBody<PostAnnouncementRequest>,
) -> Response {
    let cmd = PostAnnouncementCommand {
        title: req.title,
        message: req.message,
    };
    let metadata = correlation.metadata(user.id);

    match handlers.post_announcement.handle(cmd, metadata).await {
        Ok(announcement) => (
            StatusCode::CREATED,
            Json(AnnouncementResponse::from(&announcement)),
        )
            .into_response(),
        Err(e) => handlers.errors.render(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn params(date: Option<&str>, from: Option<&str>, to: Option<&str>) -> AdminSessionsParams {
        AdminSessionsParams {
            date: date.map(str::to_string),
            from: from.map(str::to_string),
            to: to.map(str::to_string),
        }
    }

    #[test]
    fn date_takes_precedence_over_range() {
        let range = session_range(&params(Some("2024-05-20"), Some("2024-05-01"), None)).unwrap();
        assert_eq!(
            range,
            SessionRange::Day(NaiveDate::from_ymd_opt(2024, 5, 20).unwrap())
        );
    }

    #[test]
    fn open_range_without_params() {
        assert_eq!(
            session_range(&params(None, None, None)).unwrap(),
            SessionRange::Between {
                from: None,
                to: None
            }
        );
    }

    #[test]
    fn malformed_range_is_400() {
        let err = session_range(&params(None, Some("May 1"), None)).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
