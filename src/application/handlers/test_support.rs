//! Shared wiring for handler tests: in-memory repositories over one store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::adapters::events::InMemoryEventBus;
use crate::adapters::memory::{
    InMemoryAnnouncementRepository, InMemoryBookingRepository, InMemoryClassSessionRepository,
    InMemoryClassTypeRepository, InMemoryMemberRepository, InMemoryStore,
};
use crate::domain::foundation::{
    ClassSessionId, ClassTypeId, CommandMetadata, Currency, DomainError, ErrorCode,
    EventEnvelope, Price, Timestamp, UserId,
};
use crate::domain::member::MemberRole;
use crate::domain::schedule::{ClassSession, ClassType, SessionDetails};
use crate::ports::{ClassSessionRepository, ClassTypeRepository, EventPublisher};

pub struct Fixture {
    pub class_types: Arc<InMemoryClassTypeRepository>,
    pub sessions: Arc<InMemoryClassSessionRepository>,
    pub bookings: Arc<InMemoryBookingRepository>,
    pub members: Arc<InMemoryMemberRepository>,
    pub announcements: Arc<InMemoryAnnouncementRepository>,
    pub events: Arc<InMemoryEventBus>,
}

impl Fixture {
    pub fn new() -> Self {
        let store = InMemoryStore::new();
        Self {
            class_types: Arc::new(InMemoryClassTypeRepository::new(store.clone())),
            sessions: Arc::new(InMemoryClassSessionRepository::new(store.clone())),
            bookings: Arc::new(InMemoryBookingRepository::new(store.clone())),
            members: Arc::new(InMemoryMemberRepository::new(store.clone())),
            announcements: Arc::new(InMemoryAnnouncementRepository::new(store)),
            events: Arc::new(InMemoryEventBus::new()),
        }
    }

    pub async fn class_type(&self, name: &str, pence: i64) -> ClassType {
        let class_type = ClassType::new(
            ClassTypeId::new(),
            name,
            None,
            Price::new(pence, Currency::gbp()).unwrap(),
        )
        .unwrap();
        self.class_types.save(&class_type).await.unwrap();
        class_type
    }

    /// Schedules a session on 2024-05-20 at `hour`:00 UTC.
    pub async fn session_at(
        &self,
        class_type: &ClassType,
        title: &str,
        hour: u32,
        capacity: u32,
    ) -> ClassSession {
        let details = SessionDetails {
            title: title.to_string(),
            instructor_name: Some("Maya".to_string()),
            starts_at: at(2024, 5, 20, hour),
            duration_minutes: 50,
            capacity,
            location: Some("Studio A".to_string()),
            description: None,
            price_override: None,
        };
        let session = ClassSession::new(ClassSessionId::new(), *class_type.id(), details).unwrap();
        self.sessions.save(&session).await.unwrap();
        session
    }

    pub async fn admin(&self, id: &str) -> UserId {
        let user = user(id);
        self.members
            .insert_with_role(&user, Some("staff@bloom.example"), MemberRole::Admin)
            .await;
        user
    }
}

/// Publisher whose every call fails.
pub struct FailingPublisher;

#[async_trait]
impl EventPublisher for FailingPublisher {
    async fn publish(&self, _event: EventEnvelope) -> Result<(), DomainError> {
        Err(DomainError::new(ErrorCode::InternalError, "down"))
    }
}

pub fn user(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

pub fn metadata(user_id: &UserId) -> CommandMetadata {
    CommandMetadata::new(user_id.clone()).with_correlation_id("test-correlation")
}

pub fn at(year: i32, month: u32, day: u32, hour: u32) -> Timestamp {
    Timestamp::from_datetime(Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap())
}
