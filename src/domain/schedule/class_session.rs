//! Class session aggregate: one scheduled instance of a class type.

use serde::{Deserialize, Serialize};

use crate::domain::booking::Availability;
use crate::domain::foundation::{
    normalize_optional, ClassSessionId, ClassTypeId, DomainError, Price, Timestamp,
    ValidationError,
};

use super::ClassType;

/// Maximum length for a session title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Upper bound on a single class length (one day).
pub const MAX_DURATION_MINUTES: u32 = 24 * 60;

/// Editable schedule fields, shared by create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDetails {
    pub title: String,
    pub instructor_name: Option<String>,
    pub starts_at: Timestamp,
    pub duration_minutes: u32,
    pub capacity: u32,
    pub location: Option<String>,
    pub description: Option<String>,
    /// Minor units; replaces the class type's default price when set.
    pub price_override: Option<i64>,
}

impl SessionDetails {
    /// Validate and normalize the fields.
    pub fn validated(self) -> Result<Self, ValidationError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(ValidationError::out_of_range(
                "title",
                1,
                MAX_TITLE_LENGTH as i64,
                title.chars().count() as i64,
            ));
        }
        if self.duration_minutes == 0 || self.duration_minutes > MAX_DURATION_MINUTES {
            return Err(ValidationError::out_of_range(
                "duration_minutes",
                1,
                MAX_DURATION_MINUTES as i64,
                self.duration_minutes as i64,
            ));
        }
        if self.capacity == 0 {
            return Err(ValidationError::out_of_range(
                "capacity",
                1,
                u32::MAX as i64,
                0,
            ));
        }
        if let Some(pence) = self.price_override {
            if pence < 0 {
                return Err(ValidationError::out_of_range(
                    "price_override",
                    0,
                    i64::MAX,
                    pence,
                ));
            }
        }

        Ok(Self {
            title,
            instructor_name: normalize_optional(self.instructor_name),
            location: normalize_optional(self.location),
            description: normalize_optional(self.description),
            ..self
        })
    }
}

/// A scheduled class.
///
/// # Invariants
///
/// - `title` non-empty, `duration_minutes > 0`, `capacity > 0`
/// - cancelled sessions stay in the table and are hidden from members
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSession {
    id: ClassSessionId,
    class_type_id: ClassTypeId,
    title: String,
    instructor_name: Option<String>,
    starts_at: Timestamp,
    duration_minutes: u32,
    capacity: u32,
    location: Option<String>,
    description: Option<String>,
    is_cancelled: bool,
    price_override: Option<i64>,
    created_at: Timestamp,
}

impl ClassSession {
    /// Schedule a new session.
    ///
    /// The caller is responsible for checking that `class_type_id` exists.
    pub fn new(
        id: ClassSessionId,
        class_type_id: ClassTypeId,
        details: SessionDetails,
    ) -> Result<Self, DomainError> {
        let details = details.validated()?;
        Ok(Self {
            id,
            class_type_id,
            title: details.title,
            instructor_name: details.instructor_name,
            starts_at: details.starts_at,
            duration_minutes: details.duration_minutes,
            capacity: details.capacity,
            location: details.location,
            description: details.description,
            is_cancelled: false,
            price_override: details.price_override,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ClassSessionId,
        class_type_id: ClassTypeId,
        title: String,
        instructor_name: Option<String>,
        starts_at: Timestamp,
        duration_minutes: u32,
        capacity: u32,
        location: Option<String>,
        description: Option<String>,
        is_cancelled: bool,
        price_override: Option<i64>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            class_type_id,
            title,
            instructor_name,
            starts_at,
            duration_minutes,
            capacity,
            location,
            description,
            is_cancelled,
            price_override,
            created_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ClassSessionId {
        &self.id
    }

    pub fn class_type_id(&self) -> &ClassTypeId {
        &self.class_type_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn instructor_name(&self) -> Option<&str> {
        self.instructor_name.as_deref()
    }

    pub fn starts_at(&self) -> &Timestamp {
        &self.starts_at
    }

    pub fn ends_at(&self) -> Timestamp {
        self.starts_at.plus_minutes(self.duration_minutes as i64)
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_cancelled(&self) -> bool {
        self.is_cancelled
    }

    pub fn price_override(&self) -> Option<i64> {
        self.price_override
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Derived values
    // ─────────────────────────────────────────────────────────────────────────

    /// Session override in the class type's currency, else the class type default.
    pub fn effective_price(&self, class_type: &ClassType) -> Price {
        let default = class_type.default_price();
        match self.price_override {
            Some(pence) => Price::new(pence, default.currency().clone())
                .unwrap_or_else(|_| default.clone()),
            None => default.clone(),
        }
    }

    /// Capacity snapshot given the current number of booked rows.
    pub fn availability(&self, booked_count: u32) -> Availability {
        Availability::new(self.capacity, booked_count)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the schedule fields.
    ///
    /// Lowering capacity below the current booked count is allowed; the
    /// session then reports zero spots left.
    pub fn update(
        &mut self,
        class_type_id: ClassTypeId,
        details: SessionDetails,
    ) -> Result<(), DomainError> {
        let details = details.validated()?;
        self.class_type_id = class_type_id;
        self.title = details.title;
        self.instructor_name = details.instructor_name;
        self.starts_at = details.starts_at;
        self.duration_minutes = details.duration_minutes;
        self.capacity = details.capacity;
        self.location = details.location;
        self.description = details.description;
        self.price_override = details.price_override;
        Ok(())
    }

    /// Flip the cancelled flag; returns the new value.
    pub fn toggle_cancelled(&mut self) -> bool {
        self.is_cancelled = !self.is_cancelled;
        self.is_cancelled
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use chrono::{TimeZone, Utc};

    pub fn details(title: &str, capacity: u32) -> SessionDetails {
        SessionDetails {
            title: title.to_string(),
            instructor_name: Some("Maya".to_string()),
            starts_at: Timestamp::from_datetime(
                Utc.with_ymd_and_hms(2024, 5, 20, 9, 0, 0).unwrap(),
            ),
            duration_minutes: 50,
            capacity,
            location: Some("Studio A".to_string()),
            description: None,
            price_override: None,
        }
    }
}
