//! HTTP DTOs for the staff console.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::adapters::http::profile::ProfileResponse;
use crate::adapters::http::schedule::{AvailabilityResponse, BookingResponse, SessionSummaryResponse};
use crate::application::handlers::admin::{
    AdminSessionRow, ClassTypeFields, RosterEntry, SessionFields, SessionRoster,
};
use crate::domain::foundation::{ClassTypeId, Timestamp};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// A money amount typed in major units, sent either as text or as a number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Text(String),
    Number(f64),
}

impl AmountInput {
    pub fn into_text(self) -> String {
        match self {
            AmountInput::Text(text) => text,
            AmountInput::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassTypeRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: AmountInput,
    #[serde(default)]
    pub currency: Option<String>,
}

impl From<ClassTypeRequest> for ClassTypeFields {
    fn from(req: ClassTypeRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            price: req.price.into_text(),
            currency: req.currency,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionRequest {
    pub class_type_id: String,
    pub title: String,
    #[serde(default)]
    pub instructor_name: Option<String>,
    /// RFC 3339 instant.
    pub starts_at: String,
    pub duration_minutes: u32,
    pub capacity: u32,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price_override: Option<AmountInput>,
}

impl SessionRequest {
    /// Converts to handler fields; the error names the offending field.
    pub fn into_fields(self) -> Result<SessionFields, String> {
        let class_type_id: ClassTypeId = self
            .class_type_id
            .trim()
            .parse()
            .map_err(|_| "Invalid class type id".to_string())?;
        let starts_at = DateTime::parse_from_rfc3339(self.starts_at.trim())
            .map_err(|_| "'starts_at' must be an RFC 3339 timestamp".to_string())?
            .with_timezone(&Utc);

        Ok(SessionFields {
            class_type_id,
            title: self.title,
            instructor_name: self.instructor_name,
            starts_at: Timestamp::from_datetime(starts_at),
            duration_minutes: self.duration_minutes,
            capacity: self.capacity,
            location: self.location,
            description: self.description,
            price_override: self.price_override.map(AmountInput::into_text),
        })
    }
}

/// `GET /api/admin/sessions`: either `date` or a `from`/`to` range.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminSessionsParams {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberSearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct AdminSessionResponse {
    #[serde(flatten)]
    pub session: SessionSummaryResponse,
    pub availability: AvailabilityResponse,
}

impl From<AdminSessionRow> for AdminSessionResponse {
    fn from(row: AdminSessionRow) -> Self {
        Self {
            session: SessionSummaryResponse::new(&row.session, row.class_type_name),
            availability: row.availability.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RosterEntryResponse {
    #[serde(flatten)]
    pub booking: BookingResponse,
    /// Missing when the member never opened their profile.
    pub member: Option<ProfileResponse>,
}

impl From<&RosterEntry> for RosterEntryResponse {
    fn from(entry: &RosterEntry) -> Self {
        Self {
            booking: (&entry.booking).into(),
            member: entry.member.as_ref().map(Into::into),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RosterResponse {
    pub session: SessionSummaryResponse,
    pub availability: AvailabilityResponse,
    pub entries: Vec<RosterEntryResponse>,
}

impl From<SessionRoster> for RosterResponse {
    fn from(roster: SessionRoster) -> Self {
        Self {
            session: SessionSummaryResponse::new(&roster.session, roster.class_type_name),
            availability: roster.availability.into(),
            entries: roster.entries.iter().map(Into::into).collect(),
        }
    }
}
