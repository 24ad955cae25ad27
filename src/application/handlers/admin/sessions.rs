//! Admin session management: listing, scheduling, editing, cancelling.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::application::handlers::publish_committed;
use crate::domain::booking::Availability;
use crate::domain::foundation::{
    parse_major_to_minor, ClassSessionId, ClassTypeId, CommandMetadata, EventId, Timestamp,
    UserId,
};
use crate::domain::schedule::{
    ClassSession, ScheduleError, SessionCancellationChanged, SessionDetails, StudioCalendar,
};
use crate::ports::{
    BookingRepository, ClassSessionRepository, ClassTypeRepository, EventPublisher,
    MemberRepository,
};

use super::AdminGuard;

/// Which sessions to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRange {
    /// One studio-local day.
    Day(NaiveDate),
    /// Both ends inclusive; a missing end is open.
    Between {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
}

#[derive(Debug, Clone)]
pub struct ListAdminSessionsQuery {
    pub requested_by: UserId,
    pub range: SessionRange,
}

/// A session as staff see it, cancelled ones included.
#[derive(Debug, Clone)]
pub struct AdminSessionRow {
    pub session: ClassSession,
    pub class_type_name: Option<String>,
    pub availability: Availability,
}

pub struct ListAdminSessionsHandler {
    guard: AdminGuard,
    sessions: Arc<dyn ClassSessionRepository>,
    class_types: Arc<dyn ClassTypeRepository>,
    bookings: Arc<dyn BookingRepository>,
    calendar: StudioCalendar,
}

impl ListAdminSessionsHandler {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        sessions: Arc<dyn ClassSessionRepository>,
        class_types: Arc<dyn ClassTypeRepository>,
        bookings: Arc<dyn BookingRepository>,
        calendar: StudioCalendar,
    ) -> Self {
        Self {
            guard: AdminGuard::new(members),
            sessions,
            class_types,
            bookings,
            calendar,
        }
    }

    pub async fn handle(
        &self,
        query: ListAdminSessionsQuery,
    ) -> Result<Vec<AdminSessionRow>, ScheduleError> {
        self.guard.require_admin(&query.requested_by).await?;

        let (from, to) = match query.range {
            SessionRange::Day(date) => {
                let (from, to) = self.calendar.day_window(date);
                (Some(from), Some(to))
            }
            SessionRange::Between { from, to } => {
                if let (Some(from), Some(to)) = (from, to) {
                    if from > to {
                        return Err(ScheduleError::validation(
                            "from",
                            "start date must not be after end date",
                        ));
                    }
                }
                self.calendar.range_window(from, to)
            }
        };

        let sessions = self.sessions.list_starting_between(from, to, true).await?;
        let ids: Vec<ClassSessionId> = sessions.iter().map(|s| *s.id()).collect();
        let counts = self.bookings.count_booked(&ids).await?;
        let names: HashMap<ClassTypeId, String> = self
            .class_types
            .list_all()
            .await?
            .into_iter()
            .map(|ct| (*ct.id(), ct.name().to_string()))
            .collect();

        Ok(sessions
            .into_iter()
            .map(|session| AdminSessionRow {
                class_type_name: names.get(session.class_type_id()).cloned(),
                availability: session.availability(counts.get(session.id()).copied().unwrap_or(0)),
                session,
            })
            .collect())
    }
}

/// Schedule fields as staff enter them. `price_override` is in major
/// units; blank means "use the class type price".
#[derive(Debug, Clone)]
pub struct SessionFields {
    pub class_type_id: ClassTypeId,
    pub title: String,
    pub instructor_name: Option<String>,
    pub starts_at: Timestamp,
    pub duration_minutes: u32,
    pub capacity: u32,
    pub location: Option<String>,
    pub description: Option<String>,
    pub price_override: Option<String>,
}

impl SessionFields {
    fn into_details(self) -> Result<(ClassTypeId, SessionDetails), ScheduleError> {
        let price_override = match self.price_override.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => Some(
                parse_major_to_minor(text)
                    .map_err(|e| ScheduleError::validation("price_override", e.to_string()))?,
            ),
            _ => None,
        };
        Ok((
            self.class_type_id,
            SessionDetails {
                title: self.title,
                instructor_name: self.instructor_name,
                starts_at: self.starts_at,
                duration_minutes: self.duration_minutes,
                capacity: self.capacity,
                location: self.location,
                description: self.description,
                price_override,
            },
        ))
    }
}

/// Shared by create and update: the class type must exist.
async fn require_class_type(
    class_types: &dyn ClassTypeRepository,
    id: &ClassTypeId,
) -> Result<(), ScheduleError> {
    match class_types.find_by_id(id).await? {
        Some(_) => Ok(()),
        None => Err(ScheduleError::ClassTypeNotFound(*id)),
    }
}

#[derive(Debug, Clone)]
pub struct CreateClassSessionCommand {
    pub requested_by: UserId,
    pub fields: SessionFields,
}

pub struct CreateClassSessionHandler {
    guard: AdminGuard,
    sessions: Arc<dyn ClassSessionRepository>,
    class_types: Arc<dyn ClassTypeRepository>,
}

impl CreateClassSessionHandler {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        sessions: Arc<dyn ClassSessionRepository>,
        class_types: Arc<dyn ClassTypeRepository>,
    ) -> Self {
        Self {
            guard: AdminGuard::new(members),
            sessions,
            class_types,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateClassSessionCommand,
    ) -> Result<ClassSession, ScheduleError> {
        self.guard.require_admin(&cmd.requested_by).await?;

        let (class_type_id, details) = cmd.fields.into_details()?;
        require_class_type(self.class_types.as_ref(), &class_type_id).await?;

        let session = ClassSession::new(ClassSessionId::new(), class_type_id, details)?;
        self.sessions.save(&session).await?;

        tracing::info!(
            session_id = %session.id(),
            starts_at = %session.starts_at(),
            capacity = session.capacity(),
            "Class session scheduled"
        );
        Ok(session)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateClassSessionCommand {
    pub requested_by: UserId,
    pub session_id: ClassSessionId,
    pub fields: SessionFields,
}

pub struct UpdateClassSessionHandler {
    guard: AdminGuard,
    sessions: Arc<dyn ClassSessionRepository>,
    class_types: Arc<dyn ClassTypeRepository>,
}

impl UpdateClassSessionHandler {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        sessions: Arc<dyn ClassSessionRepository>,
        class_types: Arc<dyn ClassTypeRepository>,
    ) -> Self {
        Self {
            guard: AdminGuard::new(members),
            sessions,
            class_types,
        }
    }

    /// Capacity may drop below the booked count; nobody is bumped.
    pub async fn handle(
        &self,
        cmd: UpdateClassSessionCommand,
    ) -> Result<ClassSession, ScheduleError> {
        self.guard.require_admin(&cmd.requested_by).await?;

        let mut session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(ScheduleError::SessionNotFound(cmd.session_id))?;

        let (class_type_id, details) = cmd.fields.into_details()?;
        require_class_type(self.class_types.as_ref(), &class_type_id).await?;

        session.update(class_type_id, details)?;
        self.sessions.update(&session).await?;
        Ok(session)
    }
}

#[derive(Debug, Clone)]
pub struct ToggleSessionCancellationCommand {
    pub session_id: ClassSessionId,
}

pub struct ToggleSessionCancellationHandler {
    guard: AdminGuard,
    sessions: Arc<dyn ClassSessionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ToggleSessionCancellationHandler {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        sessions: Arc<dyn ClassSessionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            guard: AdminGuard::new(members),
            sessions,
            event_publisher,
        }
    }

    /// Existing bookings are left untouched either way.
    pub async fn handle(
        &self,
        cmd: ToggleSessionCancellationCommand,
        metadata: CommandMetadata,
    ) -> Result<ClassSession, ScheduleError> {
        self.guard.require_admin(&metadata.user_id).await?;

        let mut session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(ScheduleError::SessionNotFound(cmd.session_id))?;

        let is_cancelled = session.toggle_cancelled();
        self.sessions.update(&session).await?;

        tracing::info!(session_id = %cmd.session_id, is_cancelled, "Session cancellation toggled");

        let event = SessionCancellationChanged {
            event_id: EventId::new(),
            session_id: cmd.session_id,
            is_cancelled,
            changed_by: metadata.user_id.clone(),
            changed_at: Timestamp::now(),
        };
        publish_committed(self.event_publisher.as_ref(), &event, &metadata).await;

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{at, metadata, user, Fixture};
    use crate::domain::schedule::ClassType;

    fn fields(class_type: &ClassType, title: &str, capacity: u32) -> SessionFields {
        SessionFields {
            class_type_id: *class_type.id(),
            title: title.to_string(),
            instructor_name: Some("Maya".to_string()),
            starts_at: at(2024, 6, 3, 9),
            duration_minutes: 55,
            capacity,
            location: None,
            description: None,
            price_override: None,
        }
    }

    fn create_handler(fx: &Fixture) -> CreateClassSessionHandler {
        CreateClassSessionHandler::new(fx.members.clone(), fx.sessions.clone(), fx.class_types.clone())
    }

    #[tokio::test]
    async fn creates_session_with_price_override() {
        let fx = Fixture::new();
        let admin = fx.admin("staff").await;
        let ct = fx.class_type("Reformer", 2000).await;
        let mut f = fields(&ct, "Reformer Intro", 8);
        f.price_override = Some("12,5".to_string());

        let session = create_handler(&fx)
            .handle(CreateClassSessionCommand {
                requested_by: admin,
                fields: f,
            })
            .await
            .unwrap();

        assert_eq!(session.price_override(), Some(1250));
        assert_eq!(session.effective_price(&ct).label(), "£12.50");
        assert!(fx.sessions.find_by_id(session.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn rejects_unknown_class_type_and_bad_fields() {
        let fx = Fixture::new();
        let admin = fx.admin("staff").await;
        let ct = fx.class_type("Reformer", 2000).await;
        let handler = create_handler(&fx);

        let mut unknown = fields(&ct, "Ghost", 8);
        unknown.class_type_id = ClassTypeId::new();
        let result = handler
            .handle(CreateClassSessionCommand {
                requested_by: admin.clone(),
                fields: unknown.clone(),
            })
            .await;
        assert_eq!(
            result.unwrap_err(),
            ScheduleError::ClassTypeNotFound(unknown.class_type_id)
        );

        let zero = handler
            .handle(CreateClassSessionCommand {
                requested_by: admin.clone(),
                fields: fields(&ct, "Zero", 0),
            })
            .await;
        assert!(matches!(zero, Err(ScheduleError::ValidationFailed { ref field, .. }) if field == "capacity"));

        let mut bad_price = fields(&ct, "Bad price", 5);
        bad_price.price_override = Some("free".to_string());
        let result = handler
            .handle(CreateClassSessionCommand {
                requested_by: admin,
                fields: bad_price,
            })
            .await;
        assert!(matches!(result, Err(ScheduleError::ValidationFailed { ref field, .. }) if field == "price_override"));
    }

    #[tokio::test]
    async fn update_replaces_fields() {
        let fx = Fixture::new();
        let admin = fx.admin("staff").await;
        let ct = fx.class_type("Barre", 1200).await;
        let session = fx.session_at(&ct, "Barre", 9, 10).await;

        let updated = UpdateClassSessionHandler::new(fx.members.clone(), fx.sessions.clone(), fx.class_types.clone())
            .handle(UpdateClassSessionCommand {
                requested_by: admin,
                session_id: *session.id(),
                fields: fields(&ct, "Barre Burn", 6),
            })
            .await
            .unwrap();

        assert_eq!(updated.title(), "Barre Burn");
        assert_eq!(updated.capacity(), 6);
        let stored = fx.sessions.find_by_id(session.id()).await.unwrap().unwrap();
        assert_eq!(stored.duration_minutes(), 55);
    }

    #[tokio::test]
    async fn toggle_cancellation_flips_and_publishes() {
        let fx = Fixture::new();
        let admin = fx.admin("staff").await;
        let ct = fx.class_type("Barre", 1200).await;
        let session = fx.session_at(&ct, "Barre", 9, 10).await;
        let handler = ToggleSessionCancellationHandler::new(
            fx.members.clone(),
            fx.sessions.clone(),
            fx.events.clone(),
        );
        let cmd = ToggleSessionCancellationCommand {
            session_id: *session.id(),
        };

        let cancelled = handler.handle(cmd.clone(), metadata(&admin)).await.unwrap();
        assert!(cancelled.is_cancelled());
        let restored = handler.handle(cmd, metadata(&admin)).await.unwrap();
        assert!(!restored.is_cancelled());

        assert_eq!(
            fx.events
                .events_of_type("class_session.cancellation_changed.v1")
                .len(),
            2
        );
    }

    #[tokio::test]
    async fn toggle_requires_admin() {
        let fx = Fixture::new();
        let ct = fx.class_type("Barre", 1200).await;
        let session = fx.session_at(&ct, "Barre", 9, 10).await;
        let handler = ToggleSessionCancellationHandler::new(
            fx.members.clone(),
            fx.sessions.clone(),
            fx.events.clone(),
        );

        let result = handler
            .handle(
                ToggleSessionCancellationCommand {
                    session_id: *session.id(),
                },
                metadata(&user("member")),
            )
            .await;
        assert_eq!(result.unwrap_err(), ScheduleError::Forbidden);
    }

    #[tokio::test]
    async fn admin_day_list_includes_cancelled_with_counts() {
        let fx = Fixture::new();
        let admin = fx.admin("staff").await;
        let ct = fx.class_type("Barre", 1200).await;
        let open = fx.session_at(&ct, "Open", 9, 2).await;
        let mut cancelled = fx.session_at(&ct, "Cancelled", 10, 2).await;
        cancelled.toggle_cancelled();
        fx.sessions.update(&cancelled).await.unwrap();
        fx.bookings.place(open.id(), &user("alice")).await.unwrap();

        let rows = ListAdminSessionsHandler::new(
            fx.members.clone(),
            fx.sessions.clone(),
            fx.class_types.clone(),
            fx.bookings.clone(),
            StudioCalendar::utc(),
        )
        .handle(ListAdminSessionsQuery {
            requested_by: admin,
            range: SessionRange::Day(NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()),
        })
        .await
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].availability.booked_count(), 1);
        assert_eq!(rows[0].availability.spots_left(), 1);
        assert!(rows[1].session.is_cancelled());
        assert_eq!(rows[1].class_type_name.as_deref(), Some("Barre"));
    }

    #[tokio::test]
    async fn admin_range_list_is_inclusive_and_validated() {
        let fx = Fixture::new();
        let admin = fx.admin("staff").await;
        let ct = fx.class_type("Barre", 1200).await;
        fx.session_at(&ct, "Late", 23, 2).await;
        let handler = ListAdminSessionsHandler::new(
            fx.members.clone(),
            fx.sessions.clone(),
            fx.class_types.clone(),
            fx.bookings.clone(),
            StudioCalendar::utc(),
        );
        let may_20 = NaiveDate::from_ymd_opt(2024, 5, 20);
        let may_19 = NaiveDate::from_ymd_opt(2024, 5, 19);

        let rows = handler
            .handle(ListAdminSessionsQuery {
                requested_by: admin.clone(),
                range: SessionRange::Between {
                    from: may_19,
                    to: may_20,
                },
            })
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);

        let open_ended = handler
            .handle(ListAdminSessionsQuery {
                requested_by: admin.clone(),
                range: SessionRange::Between {
                    from: None,
                    to: None,
                },
            })
            .await
            .unwrap();
        assert_eq!(open_ended.len(), 1);

        let inverted = handler
            .handle(ListAdminSessionsQuery {
                requested_by: admin,
                range: SessionRange::Between {
                    from: may_20,
                    to: may_19,
                },
            })
            .await;
        assert!(matches!(inverted, Err(ScheduleError::ValidationFailed { .. })));
    }
}
