//! HTTP handlers for the caller's own profile.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::extract::JsonBody;
use crate::adapters::http::error::ErrorRenderer;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::member::{
    GetMyProfileHandler, GetMyProfileQuery, UpdateMyProfileCommand, UpdateMyProfileHandler,
};

use super::dto::{ProfileResponse, UpdateProfileRequest};

#[derive(Clone)]
pub struct ProfileHandlers {
    get_handler: Arc<GetMyProfileHandler>,
    update_handler: Arc<UpdateMyProfileHandler>,
    errors: ErrorRenderer,
}

impl ProfileHandlers {
    pub fn new(
        get_handler: Arc<GetMyProfileHandler>,
        update_handler: Arc<UpdateMyProfileHandler>,
        errors: ErrorRenderer,
    ) -> Self {
        Self {
            get_handler,
            update_handler,
            errors,
        }
    }
}

/// GET /api/me - The caller's profile, created on first sight
pub async fn get_profile(
    State(handlers): State<ProfileHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let query = GetMyProfileQuery {
        user_id: user.id,
        email: user.email,
    };

    match handlers.get_handler.handle(query).await {
        Ok(profile) => (StatusCode::OK, Json(ProfileResponse::from(&profile))).into_response(),
        Err(e) => handlers.errors.render(e),
    }
}

/// PATCH /api/me - Update name and phone
pub async fn update_profile(
    State(handlers): State<ProfileHandlers>,
    RequireAuth(user): RequireAuth,
    JsonBody(req): JsonBody<UpdateProfileRequest>,
) -> Response {
    let cmd = UpdateMyProfileCommand {
        user_id: user.id,
        full_name: req.full_name,
        phone: req.phone,
    };

    match handlers.update_handler.handle(cmd).await {
        Ok(profile) => (StatusCode::OK, Json(ProfileResponse::from(&profile))).into_response(),
        Err(e) => handlers.errors.render(e),
    }
}
