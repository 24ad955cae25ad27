//! SessionRosterHandler - who is booked, waiting or cancelled on a class.
//!
//! Two-step fetch: the session's bookings, then the profiles of everyone
//! on them. Bookings whose member has no profile keep `member: None`.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::domain::booking::{Availability, Booking};
use crate::domain::foundation::{ClassSessionId, UserId};
use crate::domain::member::MemberProfile;
use crate::domain::schedule::{ClassSession, ScheduleError};
use crate::ports::{BookingRepository, ClassSessionRepository, ClassTypeRepository, MemberRepository};

use super::AdminGuard;

#[derive(Debug, Clone)]
pub struct SessionRosterQuery {
    pub requested_by: UserId,
    pub session_id: ClassSessionId,
}

#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub booking: Booking,
    pub member: Option<MemberProfile>,
}

#[derive(Debug, Clone)]
pub struct SessionRoster {
    pub session: ClassSession,
    pub class_type_name: Option<String>,
    pub availability: Availability,
    /// Oldest first.
    pub entries: Vec<RosterEntry>,
}

pub struct SessionRosterHandler {
    guard: AdminGuard,
    members: Arc<dyn MemberRepository>,
    sessions: Arc<dyn ClassSessionRepository>,
    class_types: Arc<dyn ClassTypeRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl SessionRosterHandler {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        sessions: Arc<dyn ClassSessionRepository>,
        class_types: Arc<dyn ClassTypeRepository>,
        bookings: Arc<dyn BookingRepository>,
    ) -> Self {
        Self {
            guard: AdminGuard::new(members.clone()),
            members,
            sessions,
            class_types,
            bookings,
        }
    }

    pub async fn handle(&self, query: SessionRosterQuery) -> Result<SessionRoster, ScheduleError> {
        self.guard.require_admin(&query.requested_by).await?;

        let session = self
            .sessions
            .find_by_id(&query.session_id)
            .await?
            .ok_or(ScheduleError::SessionNotFound(query.session_id))?;

        let bookings = self.bookings.list_for_session(&query.session_id).await?;

        let user_ids: Vec<UserId> = bookings
            .iter()
            .map(|b| b.user_id().clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let profiles: HashMap<UserId, MemberProfile> = self
            .members
            .find_many(&user_ids)
            .await?
            .into_iter()
            .map(|p| (p.user_id().clone(), p))
            .collect();

        let booked = bookings.iter().filter(|b| b.status().holds_spot()).count() as u32;
        let class_type_name = self
            .class_types
            .find_by_id(session.class_type_id())
            .await?
            .map(|ct| ct.name().to_string());

        let entries = bookings
            .into_iter()
            .map(|booking| RosterEntry {
                member: profiles.get(booking.user_id()).cloned(),
                booking,
            })
            .collect();

        Ok(SessionRoster {
            availability: session.availability(booked),
            class_type_name,
            session,
            entries,
        })
    }
}
