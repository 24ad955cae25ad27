//! HTTP DTOs for the public schedule.
//!
//! The session, price and booking shapes here are shared with the booking
//! and admin endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::schedule::{DaySchedule, SessionView};
use crate::domain::booking::{Availability, Booking, BookingAction, BookingStatus, SlotStatus};
use crate::domain::foundation::Price;
use crate::domain::schedule::{ClassSession, ClassType};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// `GET /api/schedule` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleParams {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub class_type_id: Option<String>,
    #[serde(default)]
    pub available_only: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct PriceResponse {
    pub minor_units: i64,
    pub currency: String,
    pub label: String,
}

impl From<&Price> for PriceResponse {
    fn from(price: &Price) -> Self {
        Self {
            minor_units: price.minor_units(),
            currency: price.currency().to_string(),
            label: price.label(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityResponse {
    pub capacity: u32,
    pub booked_count: u32,
    pub spots_left: u32,
    pub is_full: bool,
}

impl From<Availability> for AvailabilityResponse {
    fn from(a: Availability) -> Self {
        Self {
            capacity: a.capacity(),
            booked_count: a.booked_count(),
            spots_left: a.spots_left(),
            is_full: a.is_full(),
        }
    }
}

/// The booking button for one viewer.
#[derive(Debug, Clone, Serialize)]
pub struct ActionResponse {
    pub kind: BookingAction,
    pub label: &'static str,
    pub enabled: bool,
}

impl From<BookingAction> for ActionResponse {
    fn from(action: BookingAction) -> Self {
        Self {
            kind: action,
            label: action.label(),
            enabled: action.enabled(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingResponse {
    pub id: String,
    pub session_id: String,
    pub user_id: String,
    pub status: BookingStatus,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<String>,
}

impl From<&Booking> for BookingResponse {
    fn from(b: &Booking) -> Self {
        Self {
            id: b.id().to_string(),
            session_id: b.session_id().to_string(),
            user_id: b.user_id().to_string(),
            status: b.status(),
            created_at: b.created_at().to_rfc3339(),
            cancelled_at: b.cancelled_at().map(|t| t.to_rfc3339()),
        }
    }
}

/// Schedule fields of a session, without viewer-specific data.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummaryResponse {
    pub id: String,
    pub class_type_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_type_name: Option<String>,
    pub title: String,
    pub instructor_name: Option<String>,
    pub starts_at: String,
    pub ends_at: String,
    pub duration_minutes: u32,
    pub location: Option<String>,
    pub description: Option<String>,
    pub is_cancelled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_override_minor: Option<i64>,
}

impl SessionSummaryResponse {
    pub fn new(session: &ClassSession, class_type_name: Option<String>) -> Self {
        Self {
            id: session.id().to_string(),
            class_type_id: session.class_type_id().to_string(),
            class_type_name,
            title: session.title().to_string(),
            instructor_name: session.instructor_name().map(str::to_string),
            starts_at: session.starts_at().to_rfc3339(),
            ends_at: session.ends_at().to_rfc3339(),
            duration_minutes: session.duration_minutes(),
            location: session.location().map(str::to_string),
            description: session.description().map(str::to_string),
            is_cancelled: session.is_cancelled(),
            price_override_minor: session.price_override(),
        }
    }
}

/// A session as a member sees it on the schedule.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    #[serde(flatten)]
    pub session: SessionSummaryResponse,
    pub price: Option<PriceResponse>,
    pub availability: AvailabilityResponse,
    pub own_booking: Option<BookingResponse>,
    pub slot_status: SlotStatus,
    pub action: ActionResponse,
}

impl From<SessionView> for SessionResponse {
    fn from(view: SessionView) -> Self {
        Self {
            session: SessionSummaryResponse::new(&view.session, view.class_type_name),
            price: view.price.as_ref().map(PriceResponse::from),
            availability: view.availability.into(),
            own_booking: view.own_booking.as_ref().map(BookingResponse::from),
            slot_status: view.slot_status,
            action: view.action.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DayScheduleResponse {
    pub date: String,
    pub sessions: Vec<SessionResponse>,
}

impl From<DaySchedule> for DayScheduleResponse {
    fn from(day: DaySchedule) -> Self {
        Self {
            date: day.date.format("%Y-%m-%d").to_string(),
            sessions: day.sessions.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassTypeResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub default_price: PriceResponse,
    pub created_at: String,
}

impl From<&ClassType> for ClassTypeResponse {
    fn from(ct: &ClassType) -> Self {
        Self {
            id: ct.id().to_string(),
            name: ct.name().to_string(),
            description: ct.description().map(str::to_string),
            default_price: ct.default_price().into(),
            created_at: ct.created_at().to_rfc3339(),
        }
    }
}
