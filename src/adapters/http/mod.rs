//! HTTP adapters - REST API under `/api`.
//!
//! Each area has its own dto/handlers/routes module; [`build_router`] wires
//! the application handlers over the ports and stacks the cross-cutting
//! layers (request ids, tracing, CORS, timeout, auth).

pub mod admin;
pub mod announcements;
pub mod bookings;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod params;
pub mod profile;
pub mod schedule;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderValue, Method, Request},
    middleware::from_fn_with_state,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::application::handlers::admin::{
    AdminListClassTypesHandler, CreateClassSessionHandler, CreateClassTypeHandler,
    ListAdminSessionsHandler, SessionRosterHandler, ToggleSessionCancellationHandler,
    UpdateClassSessionHandler, UpdateClassTypeHandler,
};
use crate::application::handlers::announcement::{
    ListAnnouncementsHandler, PostAnnouncementHandler,
};
use crate::application::handlers::booking::{
    CancelBookingHandler, CreateBookingHandler, ListMyBookingsHandler,
};
use crate::application::handlers::member::{
    ExportMembersHandler, GetMyProfileHandler, ListMembersHandler, UpdateMyProfileHandler,
};
use crate::application::handlers::schedule::{
    GetSessionDetailHandler, ListClassTypesHandler, ListDayScheduleHandler,
};
use crate::config::{AppConfig, ValidationError};
use crate::domain::foundation::Currency;
use crate::domain::schedule::StudioCalendar;
use crate::ports::{
    AnnouncementRepository, BookingRepository, ClassSessionRepository, ClassTypeRepository,
    EventPublisher, MemberRepository, SessionValidator,
};

pub use admin::{admin_routes, AdminHandlers};
pub use announcements::{announcement_routes, AnnouncementHandlers};
pub use bookings::{booking_routes, BookingHandlers};
pub use error::{ErrorRenderer, ErrorResponse};
pub use middleware::{auth_middleware, OptionalAuth, RequireAuth};
pub use profile::{profile_routes, ProfileHandlers};
pub use schedule::{schedule_routes, ScheduleHandlers};

/// Everything the API talks to.
#[derive(Clone)]
pub struct ApiPorts {
    pub class_types: Arc<dyn ClassTypeRepository>,
    pub sessions: Arc<dyn ClassSessionRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub members: Arc<dyn MemberRepository>,
    pub announcements: Arc<dyn AnnouncementRepository>,
    pub events: Arc<dyn EventPublisher>,
    pub validator: Arc<dyn SessionValidator>,
}

/// Behaviour knobs taken from configuration.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub calendar: StudioCalendar,
    pub default_currency: Currency,
    pub announcement_limit: u32,
    pub auto_promote_waitlist: bool,
    pub verbose_errors: bool,
    pub request_timeout: Duration,
    /// Empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl ApiSettings {
    pub fn from_config(config: &AppConfig) -> Result<Self, ValidationError> {
        Ok(Self {
            calendar: config.studio.calendar()?,
            default_currency: config.studio.default_currency()?,
            announcement_limit: config.studio.announcement_limit,
            auto_promote_waitlist: config.features.auto_promote_waitlist,
            verbose_errors: config.features.verbose_errors,
            request_timeout: config.server.request_timeout(),
            cors_origins: config.server.cors_origins_list(),
        })
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            calendar: StudioCalendar::default(),
            default_currency: Currency::gbp(),
            announcement_limit: 3,
            auto_promote_waitlist: false,
            verbose_errors: false,
            request_timeout: Duration::from_secs(30),
            cors_origins: Vec::new(),
        }
    }
}

/// Builds the full application router.
pub fn build_router(ports: ApiPorts, settings: &ApiSettings) -> Router {
    let errors = ErrorRenderer::new(settings.verbose_errors);

    let schedule = ScheduleHandlers::new(
        Arc::new(ListDayScheduleHandler::new(
            ports.sessions.clone(),
            ports.class_types.clone(),
            ports.bookings.clone(),
            settings.calendar,
        )),
        Arc::new(GetSessionDetailHandler::new(
            ports.sessions.clone(),
            ports.class_types.clone(),
            ports.bookings.clone(),
        )),
        Arc::new(ListClassTypesHandler::new(ports.class_types.clone())),
        errors,
    );

    let bookings = BookingHandlers::new(
        Arc::new(CreateBookingHandler::new(
            ports.bookings.clone(),
            ports.events.clone(),
        )),
        Arc::new(
            CancelBookingHandler::new(ports.bookings.clone(), ports.events.clone())
                .with_waitlist_promotion(settings.auto_promote_waitlist),
        ),
        Arc::new(ListMyBookingsHandler::new(
            ports.bookings.clone(),
            ports.sessions.clone(),
            ports.class_types.clone(),
        )),
        errors,
    );

    let profile = ProfileHandlers::new(
        Arc::new(GetMyProfileHandler::new(ports.members.clone())),
        Arc::new(UpdateMyProfileHandler::new(ports.members.clone())),
        errors,
    );

    let announcements = AnnouncementHandlers::new(
        Arc::new(ListAnnouncementsHandler::new(
            ports.announcements.clone(),
            settings.announcement_limit,
        )),
        errors,
    );

    let admin = AdminHandlers {
        list_class_types: Arc::new(AdminListClassTypesHandler::new(
            ports.members.clone(),
            ports.class_types.clone(),
        )),
        create_class_type: Arc::new(CreateClassTypeHandler::new(
            ports.members.clone(),
            ports.class_types.clone(),
            settings.default_currency.clone(),
        )),
        update_class_type: Arc::new(UpdateClassTypeHandler::new(
            ports.members.clone(),
            ports.class_types.clone(),
            settings.default_currency.clone(),
        )),
        list_sessions: Arc::new(ListAdminSessionsHandler::new(
            ports.members.clone(),
            ports.sessions.clone(),
            ports.class_types.clone(),
            ports.bookings.clone(),
            settings.calendar,
        )),
        create_session: Arc::new(CreateClassSessionHandler::new(
            ports.members.clone(),
            ports.sessions.clone(),
            ports.class_types.clone(),
        )),
        update_session: Arc::new(UpdateClassSessionHandler::new(
            ports.members.clone(),
            ports.sessions.clone(),
            ports.class_types.clone(),
        )),
        toggle_cancellation: Arc::new(ToggleSessionCancellationHandler::new(
            ports.members.clone(),
            ports.sessions.clone(),
            ports.events.clone(),
        )),
        roster: Arc::new(SessionRosterHandler::new(
            ports.members.clone(),
            ports.sessions.clone(),
            ports.class_types.clone(),
            ports.bookings.clone(),
        )),
        list_members: Arc::new(ListMembersHandler::new(ports.members.clone())),
        export_members: Arc::new(ExportMembersHandler::new(ports.members.clone())),
        post_announcement: Arc::new(PostAnnouncementHandler::new(
            ports.members.clone(),
            ports.announcements.clone(),
            ports.events.clone(),
        )),
        errors,
    };

    Router::new()
        .route("/health", get(health))
        .merge(schedule_routes(schedule))
        .merge(booking_routes(bookings))
        .merge(profile_routes(profile))
        .merge(announcement_routes(announcements))
        .merge(admin_routes(admin))
        .layer(from_fn_with_state(ports.validator, auth_middleware))
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(cors_layer(&settings.cors_origins))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get(middleware::REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// GET /health - liveness
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .expose_headers([header::CONTENT_DISPOSITION]);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(allowed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionValidator;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::{
        InMemoryAnnouncementRepository, InMemoryBookingRepository, InMemoryClassSessionRepository,
        InMemoryClassTypeRepository, InMemoryMemberRepository, InMemoryStore,
    };
    use crate::domain::foundation::{ClassSessionId, ClassTypeId, Price, Timestamp, UserId};
    use crate::domain::member::MemberRole;
    use crate::domain::schedule::{ClassSession, ClassType, SessionDetails};
    use axum::http::StatusCode;
    use chrono::{TimeZone, Utc};
    use tower::ServiceExt;

    struct TestApp {
        router: Router,
        session_id: ClassSessionId,
    }

    async fn test_app() -> TestApp {
        let store = InMemoryStore::new();
        let class_types = Arc::new(InMemoryClassTypeRepository::new(store.clone()));
        let sessions = Arc::new(InMemoryClassSessionRepository::new(store.clone()));
        let members = Arc::new(InMemoryMemberRepository::new(store.clone()));

        let ct = ClassType::new(
            ClassTypeId::new(),
            "Mat Pilates",
            None,
            Price::new(1500, Currency::gbp()).unwrap(),
        )
        .unwrap();
        class_types.save(&ct).await.unwrap();

        let session = ClassSession::new(
            ClassSessionId::new(),
            *ct.id(),
            SessionDetails {
                title: "Morning Flow".to_string(),
                instructor_name: Some("Maya".to_string()),
                starts_at: Timestamp::from_datetime(
                    Utc.with_ymd_and_hms(2024, 5, 20, 9, 0, 0).unwrap(),
                ),
                duration_minutes: 50,
                capacity: 1,
                location: None,
                description: None,
                price_override: None,
            },
        )
        .unwrap();
        sessions.save(&session).await.unwrap();

        members
            .insert_with_role(&UserId::new("staff").unwrap(), None, MemberRole::Admin)
            .await;

        let validator = MockSessionValidator::new()
            .with_test_user("member-token", "member-1")
            .with_test_user("staff-token", "staff");

        let ports = ApiPorts {
            class_types,
            sessions,
            bookings: Arc::new(InMemoryBookingRepository::new(store.clone())),
            members,
            announcements: Arc::new(InMemoryAnnouncementRepository::new(store)),
            events: Arc::new(InMemoryEventBus::new()),
            validator: Arc::new(validator),
        };

        TestApp {
            router: build_router(ports, &ApiSettings::default()),
            session_id: *session.id(),
        }
    }

    async fn send(
        router: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    async fn json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_public_and_carries_request_id() {
        let app = test_app().await;
        let response = send(&app.router, Method::GET, "/health", None, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn anonymous_schedule_offers_log_in() {
        let app = test_app().await;
        let response = send(
            &app.router,
            Method::GET,
            "/api/schedule?date=2024-05-20",
            None,
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json(response).await;
        assert_eq!(body["date"], "2024-05-20");
        assert_eq!(body["sessions"][0]["title"], "Morning Flow");
        assert_eq!(body["sessions"][0]["action"]["kind"], "log-in-to-book");
        assert_eq!(body["sessions"][0]["price"]["label"], "£15.00");
    }

    #[tokio::test]
    async fn bad_schedule_date_is_json_400() {
        let app = test_app().await;
        let response = send(&app.router, Method::GET, "/api/schedule?date=monday", None, None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json(response).await["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn booking_requires_auth() {
        let app = test_app().await;
        let body = serde_json::json!({ "session_id": app.session_id.to_string() });
        let response = send(&app.router, Method::POST, "/api/bookings", None, Some(body)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn booking_then_duplicate_is_conflict() {
        let app = test_app().await;
        let body = serde_json::json!({ "session_id": app.session_id.to_string() });

        let first = send(
            &app.router,
            Method::POST,
            "/api/bookings",
            Some("member-token"),
            Some(body.clone()),
        )
        .await;
        assert_eq!(first.status(), StatusCode::CREATED);
        assert_eq!(json(first).await["booking"]["status"], "booked");

        let second = send(
            &app.router,
            Method::POST,
            "/api/bookings",
            Some("member-token"),
            Some(body),
        )
        .await;
        assert_eq!(second.status(), StatusCode::CONFLICT);
        assert_eq!(json(second).await["code"], "ALREADY_BOOKED");
    }

    #[tokio::test]
    async fn admin_routes_reject_members() {
        let app = test_app().await;
        let response = send(
            &app.router,
            Method::GET,
            "/api/admin/members",
            Some("member-token"),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn member_export_is_csv_attachment() {
        let app = test_app().await;
        let response = send(
            &app.router,
            Method::GET,
            "/api/admin/members/export",
            Some("staff-token"),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"bloom-members.csv\""
        );
    }

    #[tokio::test]
    async fn me_creates_profile_from_token_email() {
        let app = test_app().await;
        let response = send(&app.router, Method::GET, "/api/me", Some("member-token"), None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json(response).await;
        assert_eq!(body["user_id"], "member-1");
        assert_eq!(body["email"], "member-1@test.example.com");
        assert_eq!(body["role"], "member");
    }
}
