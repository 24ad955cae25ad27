//! Studio-local calendar days.
//!
//! The schedule is browsed by calendar day in the studio's time zone, stored
//! as a fixed UTC offset. A day is the half-open window
//! `[local midnight, next local midnight)` expressed in UTC.

use chrono::{DateTime, Days, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Utc};

use crate::domain::foundation::{Timestamp, ValidationError};

/// Largest offset chrono accepts, just under a day.
const MAX_OFFSET_MINUTES: i32 = 24 * 60 - 1;

/// Converts between studio-local dates and UTC instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudioCalendar {
    offset: FixedOffset,
}

impl StudioCalendar {
    /// Builds a calendar for a UTC offset in minutes (e.g. `60` for UTC+1).
    pub fn new(utc_offset_minutes: i32) -> Result<Self, ValidationError> {
        let offset = utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                ValidationError::out_of_range(
                    "utc_offset_minutes",
                    -(MAX_OFFSET_MINUTES as i64),
                    MAX_OFFSET_MINUTES as i64,
                    utc_offset_minutes as i64,
                )
            })?;
        Ok(Self { offset })
    }

    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Today's date at the studio.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.offset).date_naive()
    }

    /// The UTC window covering one local calendar day.
    pub fn day_window(&self, date: NaiveDate) -> (Timestamp, Timestamp) {
        let start = self.local_midnight(date);
        let end = date
            .checked_add_days(Days::new(1))
            .map(|next| self.local_midnight(next))
            .unwrap_or_else(|| start.plus_minutes(24 * 60));
        (start, end)
    }

    /// Window from the start of `from` to the end of `to`, both inclusive.
    /// Missing ends are left open.
    pub fn range_window(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> (Option<Timestamp>, Option<Timestamp>) {
        let start = from.map(|d| self.day_window(d).0);
        let end = to.map(|d| self.day_window(d).1);
        (start, end)
    }

    /// Local calendar date of an instant.
    pub fn local_date(&self, at: &Timestamp) -> NaiveDate {
        at.as_datetime().with_timezone(&self.offset).date_naive()
    }

    fn local_midnight(&self, date: NaiveDate) -> Timestamp {
        let naive = date.and_time(NaiveTime::MIN);
        let utc: DateTime<Utc> = match self.offset.from_local_datetime(&naive).single() {
            Some(local) => local.with_timezone(&Utc),
            None => Utc.from_utc_datetime(&naive),
        };
        Timestamp::from_datetime(utc)
    }
}

impl Default for StudioCalendar {
    fn default() -> Self {
        Self::utc()
    }
}
