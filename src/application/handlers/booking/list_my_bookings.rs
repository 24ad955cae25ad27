//! ListMyBookingsHandler - the caller's bookings with their class details.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError, BookingStatus};
use crate::domain::foundation::{ClassSessionId, ClassTypeId, UserId};
use crate::domain::schedule::ClassSession;
use crate::ports::{BookingRepository, ClassSessionRepository, ClassTypeRepository};

#[derive(Debug, Clone)]
pub struct ListMyBookingsQuery {
    pub user_id: UserId,
    /// Keep only `booked` rows.
    pub upcoming_only: bool,
}

/// A booking joined with its session and class type name.
#[derive(Debug, Clone)]
pub struct MyBooking {
    pub booking: Booking,
    /// `None` if the session row has gone.
    pub session: Option<ClassSession>,
    pub class_type_name: Option<String>,
}

pub struct ListMyBookingsHandler {
    bookings: Arc<dyn BookingRepository>,
    sessions: Arc<dyn ClassSessionRepository>,
    class_types: Arc<dyn ClassTypeRepository>,
}

impl ListMyBookingsHandler {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        sessions: Arc<dyn ClassSessionRepository>,
        class_types: Arc<dyn ClassTypeRepository>,
    ) -> Self {
        Self {
            bookings,
            sessions,
            class_types,
        }
    }

    /// Newest first.
    pub async fn handle(&self, query: ListMyBookingsQuery) -> Result<Vec<MyBooking>, BookingError> {
        let mut bookings = self.bookings.list_for_member(&query.user_id).await?;
        if query.upcoming_only {
            bookings.retain(|b| b.status() == BookingStatus::Booked);
        }
        if bookings.is_empty() {
            return Ok(Vec::new());
        }

        let session_ids: Vec<ClassSessionId> = bookings
            .iter()
            .map(|b| *b.session_id())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let sessions: HashMap<ClassSessionId, ClassSession> = self
            .sessions
            .find_by_ids(&session_ids)
            .await?
            .into_iter()
            .map(|s| (*s.id(), s))
            .collect();
        let names: HashMap<ClassTypeId, String> = self
            .class_types
            .list_all()
            .await?
            .into_iter()
            .map(|ct| (*ct.id(), ct.name().to_string()))
            .collect();

        Ok(bookings
            .into_iter()
            .map(|booking| {
                let session = sessions.get(booking.session_id()).cloned();
                let class_type_name = session
                    .as_ref()
                    .and_then(|s| names.get(s.class_type_id()).cloned());
                MyBooking {
                    booking,
                    session,
                    class_type_name,
                }
            })
            .collect())
    }
}
