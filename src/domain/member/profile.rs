//! Member profile entity.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{normalize_optional, Timestamp, UserId};

/// Studio role stored on the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    #[default]
    Member,
    Admin,
}

impl MemberRole {
    /// Lenient parse of a stored role: anything other than `admin` is a member.
    pub fn from_stored(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("admin") {
            MemberRole::Admin
        } else {
            MemberRole::Member
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Member => "member",
            MemberRole::Admin => "admin",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile row keyed by the identity provider's user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    user_id: UserId,
    full_name: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    role: MemberRole,
    created_at: Timestamp,
}

impl MemberProfile {
    /// First-sign-in profile: a plain member with whatever email the token carried.
    pub fn new(user_id: UserId, email: Option<String>) -> Self {
        Self {
            user_id,
            full_name: None,
            phone: None,
            email: normalize_optional(email),
            role: MemberRole::Member,
            created_at: Timestamp::now(),
        }
    }

    /// Reconstitute from persistence (no validation).
    pub fn reconstitute(
        user_id: UserId,
        full_name: Option<String>,
        phone: Option<String>,
        email: Option<String>,
        role: MemberRole,
        created_at: Timestamp,
    ) -> Self {
        Self {
            user_id,
            full_name,
            phone,
            email,
            role,
            created_at,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn role(&self) -> MemberRole {
        self.role
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn is_admin(&self) -> bool {
        self.role == MemberRole::Admin
    }

    /// Members may edit only their name and phone. Blank input clears a field.
    pub fn update_contact(&mut self, full_name: Option<String>, phone: Option<String>) {
        self.full_name = normalize_optional(full_name);
        self.phone = normalize_optional(phone);
    }

    /// Case-insensitive substring match over name, email, phone and role.
    pub fn matches_search(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        [
            self.full_name.as_deref(),
            self.email.as_deref(),
            self.phone.as_deref(),
            Some(self.role.as_str()),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}
