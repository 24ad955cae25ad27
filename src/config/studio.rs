//! Studio settings

use serde::Deserialize;

use crate::domain::announcement::MAX_LIST_LIMIT;
use crate::domain::foundation::Currency;
use crate::domain::schedule::StudioCalendar;

use super::error::ValidationError;

/// Studio-wide settings.
#[derive(Debug, Clone, Deserialize)]
pub struct StudioConfig {
    /// Studio time zone as minutes east of UTC; defines calendar days.
    #[serde(default)]
    pub utc_offset_minutes: i32,

    /// Announcements returned when a listing doesn't ask for a count.
    #[serde(default = "default_announcement_limit")]
    pub announcement_limit: u32,

    /// Currency for new class types when none is given.
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl StudioConfig {
    pub fn calendar(&self) -> Result<StudioCalendar, ValidationError> {
        StudioCalendar::new(self.utc_offset_minutes).map_err(|_| ValidationError::InvalidUtcOffset)
    }

    pub fn default_currency(&self) -> Result<Currency, ValidationError> {
        Currency::new(&self.currency).map_err(|_| ValidationError::InvalidCurrency)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.calendar()?;
        self.default_currency()?;
        if self.announcement_limit == 0 || self.announcement_limit > MAX_LIST_LIMIT {
            return Err(ValidationError::InvalidAnnouncementLimit(MAX_LIST_LIMIT));
        }
        Ok(())
    }
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            announcement_limit: default_announcement_limit(),
            currency: default_currency(),
        }
    }
}

fn default_announcement_limit() -> u32 {
    3
}

fn default_currency() -> String {
    "GBP".to_string()
}
