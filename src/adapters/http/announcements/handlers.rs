//! HTTP handlers for the public announcement feed.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::extract::QueryParams;
use crate::adapters::http::error::ErrorRenderer;
use crate::application::handlers::announcement::{
    ListAnnouncementsHandler, ListAnnouncementsQuery,
};

use super::dto::{AnnouncementParams, AnnouncementResponse};

#[derive(Clone)]
pub struct AnnouncementHandlers {
    list_handler: Arc<ListAnnouncementsHandler>,
    errors: ErrorRenderer,
}

impl AnnouncementHandlers {
    pub fn new(list_handler: Arc<ListAnnouncementsHandler>, errors: ErrorRenderer) -> Self {
        Self {
            list_handler,
            errors,
        }
    }
}

/// GET /api/announcements - Latest announcements, newest first
pub async fn list_announcements(
    State(handlers): State<AnnouncementHandlers>,
    QueryParams(params): QueryParams<AnnouncementParams>,
) -> Response {
    let query = ListAnnouncementsQuery {
        limit: params.limit,
    };

    match handlers.list_handler.handle(query).await {
        Ok(items) => {
            let body: Vec<AnnouncementResponse> = items.iter().map(Into::into).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => handlers.errors.render(e),
    }
}
