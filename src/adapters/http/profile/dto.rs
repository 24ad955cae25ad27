//! HTTP DTOs for the caller's own profile.

use serde::{Deserialize, Serialize};

use crate::domain::member::{MemberProfile, MemberRole};

/// `PATCH /api/me`; an absent field is left alone, a blank one is cleared.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub role: MemberRole,
    pub is_admin: bool,
    pub created_at: String,
}

impl From<&MemberProfile> for ProfileResponse {
    fn from(p: &MemberProfile) -> Self {
        Self {
            user_id: p.user_id().to_string(),
            full_name: p.full_name().map(str::to_string),
            phone: p.phone().map(str::to_string),
            email: p.email().map(str::to_string),
            role: p.role(),
            is_admin: p.is_admin(),
            created_at: p.created_at().to_rfc3339(),
        }
    }
}
