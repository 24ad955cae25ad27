//! Schedule entries as members see them.
//!
//! Every listing of sessions (day schedule, session detail) goes through
//! `SessionViewAssembler`, which batches the lookups for class types,
//! booked counts and the viewer's own bookings, then runs the availability
//! calculator per session.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::booking::{Availability, Booking, BookingAction, BookingStatus, SlotStatus, Viewer};
use crate::domain::foundation::{ClassSessionId, ClassTypeId, DomainError, Price, UserId};
use crate::domain::schedule::{ClassSession, ClassType};
use crate::ports::{BookingRepository, ClassTypeRepository};

/// One session with everything a member needs to decide and act.
#[derive(Debug, Clone)]
pub struct SessionView {
    pub session: ClassSession,
    pub class_type_name: Option<String>,
    /// Effective price; `None` only if the class type row is missing.
    pub price: Option<Price>,
    pub availability: Availability,
    /// The viewer's booked or waitlisted row, if any.
    pub own_booking: Option<Booking>,
    pub slot_status: SlotStatus,
    pub action: BookingAction,
}

impl SessionView {
    pub fn own_status(&self) -> Option<BookingStatus> {
        self.own_booking.as_ref().map(Booking::status)
    }
}

/// Joins sessions with class types, counts and the viewer's bookings.
#[derive(Clone)]
pub struct SessionViewAssembler {
    class_types: Arc<dyn ClassTypeRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl SessionViewAssembler {
    pub fn new(
        class_types: Arc<dyn ClassTypeRepository>,
        bookings: Arc<dyn BookingRepository>,
    ) -> Self {
        Self {
            class_types,
            bookings,
        }
    }

    pub async fn assemble(
        &self,
        sessions: Vec<ClassSession>,
        viewer: Option<&UserId>,
    ) -> Result<Vec<SessionView>, DomainError> {
        if sessions.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<ClassSessionId> = sessions.iter().map(|s| *s.id()).collect();
        let counts = self.bookings.count_booked(&ids).await?;

        let own: HashMap<ClassSessionId, Booking> = match viewer {
            Some(user_id) => self
                .bookings
                .find_active_for_member(&ids, user_id)
                .await?
                .into_iter()
                .map(|b| (*b.session_id(), b))
                .collect(),
            None => HashMap::new(),
        };

        let class_types: HashMap<ClassTypeId, ClassType> = self
            .class_types
            .list_all()
            .await?
            .into_iter()
            .map(|ct| (*ct.id(), ct))
            .collect();

        Ok(sessions
            .into_iter()
            .map(|session| {
                let availability =
                    session.availability(counts.get(session.id()).copied().unwrap_or(0));
                let own_booking = own.get(session.id()).cloned();
                let own_status = own_booking.as_ref().map(Booking::status);
                let viewer = match viewer {
                    Some(_) => Viewer::Member(own_status),
                    None => Viewer::Anonymous,
                };
                let class_type = class_types.get(session.class_type_id());

                SessionView {
                    class_type_name: class_type.map(|ct| ct.name().to_string()),
                    price: class_type.map(|ct| session.effective_price(ct)),
                    availability,
                    slot_status: availability.slot_status(own_status),
                    action: availability.action_for(viewer),
                    own_booking,
                    session,
                }
            })
            .collect())
    }
}
