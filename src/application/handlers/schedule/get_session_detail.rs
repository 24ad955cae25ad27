//! GetSessionDetailHandler - Query handler for a single class.

use std::sync::Arc;

use crate::domain::foundation::{ClassSessionId, UserId};
use crate::domain::schedule::ScheduleError;
use crate::ports::{BookingRepository, ClassSessionRepository, ClassTypeRepository};

use super::{SessionView, SessionViewAssembler};

#[derive(Debug, Clone)]
pub struct GetSessionDetailQuery {
    pub session_id: ClassSessionId,
    pub viewer: Option<UserId>,
}

pub struct GetSessionDetailHandler {
    sessions: Arc<dyn ClassSessionRepository>,
    assembler: SessionViewAssembler,
}

impl GetSessionDetailHandler {
    pub fn new(
        sessions: Arc<dyn ClassSessionRepository>,
        class_types: Arc<dyn ClassTypeRepository>,
        bookings: Arc<dyn BookingRepository>,
    ) -> Self {
        Self {
            sessions,
            assembler: SessionViewAssembler::new(class_types, bookings),
        }
    }

    /// Cancelled sessions are reported as not found.
    pub async fn handle(&self, query: GetSessionDetailQuery) -> Result<SessionView, ScheduleError> {
        let session = self
            .sessions
            .find_by_id(&query.session_id)
            .await?
            .filter(|s| !s.is_cancelled())
            .ok_or(ScheduleError::SessionNotFound(query.session_id))?;

        self.assembler
            .assemble(vec![session], query.viewer.as_ref())
            .await?
            .into_iter()
            .next()
            .ok_or(ScheduleError::SessionNotFound(query.session_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{user, Fixture};
    use crate::domain::booking::{BookingAction, BookingStatus};
    use crate::ports::{BookingRepository, ClassSessionRepository};

    fn handler(fx: &Fixture) -> GetSessionDetailHandler {
        GetSessionDetailHandler::new(fx.sessions.clone(), fx.class_types.clone(), fx.bookings.clone())
    }

    #[tokio::test]
    async fn returns_view_with_waitlist_status() {
        let fx = Fixture::new();
        let ct = fx.class_type("Reformer", 2000).await;
        let session = fx.session_at(&ct, "Reformer", 9, 1).await;
        let alice = user("alice");
        let bob = user("bob");
        fx.bookings.place(session.id(), &alice).await.unwrap();
        fx.bookings.place(session.id(), &bob).await.unwrap();

        let view = handler(&fx)
            .handle(GetSessionDetailQuery {
                session_id: *session.id(),
                viewer: Some(bob),
            })
            .await
            .unwrap();

        assert_eq!(view.own_status(), Some(BookingStatus::Waitlist));
        assert_eq!(view.action, BookingAction::OnWaitlist);
        assert!(view.availability.is_full());
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let fx = Fixture::new();
        let id = ClassSessionId::new();
        let result = handler(&fx)
            .handle(GetSessionDetailQuery {
                session_id: id,
                viewer: None,
            })
            .await;
        assert_eq!(result.unwrap_err(), ScheduleError::SessionNotFound(id));
    }

    #[tokio::test]
    async fn cancelled_session_is_hidden() {
        let fx = Fixture::new();
        let ct = fx.class_type("Reformer", 2000).await;
        let mut session = fx.session_at(&ct, "Reformer", 9, 4).await;
        session.toggle_cancelled();
        fx.sessions.update(&session).await.unwrap();

        let result = handler(&fx)
            .handle(GetSessionDetailQuery {
                session_id: *session.id(),
                viewer: None,
            })
            .await;
        assert!(matches!(result, Err(ScheduleError::SessionNotFound(_))));
    }
}
