//! ListDayScheduleHandler - Query handler for one calendar day of classes.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{ClassTypeId, UserId};
use crate::domain::schedule::{ScheduleError, StudioCalendar};
use crate::ports::{BookingRepository, ClassSessionRepository, ClassTypeRepository};

use super::{SessionView, SessionViewAssembler};

/// Query for the sessions starting on one studio-local day.
#[derive(Debug, Clone, Default)]
pub struct ListDayScheduleQuery {
    /// Defaults to today at the studio.
    pub date: Option<NaiveDate>,
    pub class_type_id: Option<ClassTypeId>,
    /// Drop sessions with no spots left.
    pub available_only: bool,
    /// Signed-in viewer, if any.
    pub viewer: Option<UserId>,
}

/// A day's schedule.
#[derive(Debug, Clone)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub sessions: Vec<SessionView>,
}

pub struct ListDayScheduleHandler {
    sessions: Arc<dyn ClassSessionRepository>,
    assembler: SessionViewAssembler,
    calendar: StudioCalendar,
}

impl ListDayScheduleHandler {
    pub fn new(
        sessions: Arc<dyn ClassSessionRepository>,
        class_types: Arc<dyn ClassTypeRepository>,
        bookings: Arc<dyn BookingRepository>,
        calendar: StudioCalendar,
    ) -> Self {
        Self {
            sessions,
            assembler: SessionViewAssembler::new(class_types, bookings),
            calendar,
        }
    }

    pub async fn handle(&self, query: ListDayScheduleQuery) -> Result<DaySchedule, ScheduleError> {
        let date = query.date.unwrap_or_else(|| self.calendar.today());
        let (from, to) = self.calendar.day_window(date);

        let mut sessions = self
            .sessions
            .list_starting_between(Some(from), Some(to), false)
            .await?;
        if let Some(class_type_id) = &query.class_type_id {
            sessions.retain(|s| s.class_type_id() == class_type_id);
        }

        let mut views = self
            .assembler
            .assemble(sessions, query.viewer.as_ref())
            .await?;
        if query.available_only {
            views.retain(|v| !v.availability.is_full());
        }

        tracing::debug!(%date, count = views.len(), "Listed day schedule");

        Ok(DaySchedule {
            date,
            sessions: views,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{user, Fixture};
    use crate::domain::booking::BookingAction;
    use crate::ports::ClassSessionRepository;

    fn may_20() -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 5, 20)
    }

    fn handler(fx: &Fixture, calendar: StudioCalendar) -> ListDayScheduleHandler {
        ListDayScheduleHandler::new(
            fx.sessions.clone(),
            fx.class_types.clone(),
            fx.bookings.clone(),
            calendar,
        )
    }

    #[tokio::test]
    async fn lists_sessions_of_the_day_in_start_order() {
        let fx = Fixture::new();
        let ct = fx.class_type("Mat", 1000).await;
        fx.session_at(&ct, "Evening", 18, 5).await;
        fx.session_at(&ct, "Morning", 7, 5).await;

        let schedule = handler(&fx, StudioCalendar::utc())
            .handle(ListDayScheduleQuery {
                date: may_20(),
                ..Default::default()
            })
            .await
            .unwrap();

        let titles: Vec<_> = schedule.sessions.iter().map(|v| v.session.title()).collect();
        assert_eq!(titles, vec!["Morning", "Evening"]);
    }

    #[tokio::test]
    async fn hides_cancelled_sessions() {
        let fx = Fixture::new();
        let ct = fx.class_type("Mat", 1000).await;
        let mut session = fx.session_at(&ct, "Cancelled", 9, 5).await;
        session.toggle_cancelled();
        fx.sessions.update(&session).await.unwrap();

        let schedule = handler(&fx, StudioCalendar::utc())
            .handle(ListDayScheduleQuery {
                date: may_20(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(schedule.sessions.is_empty());
    }

    #[tokio::test]
    async fn day_boundary_follows_studio_offset() {
        let fx = Fixture::new();
        let ct = fx.class_type("Mat", 1000).await;
        // 23:00 UTC on the 20th is already the 21st at UTC+2.
        fx.session_at(&ct, "Late", 23, 5).await;

        let plus_two = StudioCalendar::new(120).unwrap();
        let on_20th = handler(&fx, plus_two)
            .handle(ListDayScheduleQuery {
                date: may_20(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(on_20th.sessions.is_empty());

        let on_21st = handler(&fx, plus_two)
            .handle(ListDayScheduleQuery {
                date: NaiveDate::from_ymd_opt(2024, 5, 21),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(on_21st.sessions.len(), 1);
    }

    #[tokio::test]
    async fn filters_by_class_type_and_availability() {
        let fx = Fixture::new();
        let mat = fx.class_type("Mat", 1000).await;
        let barre = fx.class_type("Barre", 1200).await;
        let full = fx.session_at(&mat, "Full Mat", 9, 1).await;
        fx.session_at(&mat, "Open Mat", 10, 4).await;
        fx.session_at(&barre, "Barre", 11, 4).await;
        fx.bookings.place(full.id(), &user("alice")).await.unwrap();

        let schedule = handler(&fx, StudioCalendar::utc())
            .handle(ListDayScheduleQuery {
                date: may_20(),
                class_type_id: Some(*mat.id()),
                available_only: true,
                viewer: Some(user("bob")),
            })
            .await
            .unwrap();

        assert_eq!(schedule.sessions.len(), 1);
        assert_eq!(schedule.sessions[0].session.title(), "Open Mat");
        assert_eq!(schedule.sessions[0].action, BookingAction::Book);
    }
}
