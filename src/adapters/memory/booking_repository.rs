//! In-memory implementation of BookingRepository.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{
    BookingId, ClassSessionId, DomainError, ErrorCode, UserId,
};
use crate::ports::{BookingRepository, Cancellation};

use super::store::Tables;
use super::InMemoryStore;

/// Booking repository over the shared in-memory tables.
///
/// Capacity-sensitive writes hold the store lock for their whole
/// read-check-write sequence.
#[derive(Debug, Clone)]
pub struct InMemoryBookingRepository {
    store: InMemoryStore,
}

impl InMemoryBookingRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

fn booked_count(tables: &Tables, session_id: &ClassSessionId) -> u32 {
    tables
        .bookings
        .iter()
        .filter(|b| b.session_id() == session_id && b.status().holds_spot())
        .count() as u32
}

/// The oldest waitlisted booking on `cancelled`'s session, promoted, with
/// its row index. `None` while the session stays full without `cancelled`.
fn next_promotion(
    tables: &Tables,
    cancelled: &Booking,
) -> Result<Option<(usize, Booking)>, DomainError> {
    let session_id = cancelled.session_id();
    let Some(session) = tables.sessions.iter().find(|s| s.id() == session_id) else {
        return Ok(None);
    };
    // The cancelled row is still `booked` in the tables.
    let booked = booked_count(tables, session_id).saturating_sub(1);
    if session.availability(booked).is_full() {
        return Ok(None);
    }

    let Some(index) = tables
        .bookings
        .iter()
        .position(|b| b.session_id() == session_id && b.status() == BookingStatus::Waitlist)
    else {
        return Ok(None);
    };
    let mut next = tables.bookings[index].clone();
    next.promote()?;
    Ok(Some((index, next)))
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn place(
        &self,
        session_id: &ClassSessionId,
        user_id: &UserId,
    ) -> Result<Booking, DomainError> {
        let mut tables = self.store.lock().await;

        let session = tables
            .sessions
            .iter()
            .find(|s| s.id() == session_id)
            .cloned()
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::ClassSessionNotFound,
                    format!("Class session not found: {}", session_id),
                )
                .with_detail("session_id", session_id.to_string())
            })?;

        if session.is_cancelled() {
            return Err(DomainError::new(
                ErrorCode::SessionCancelled,
                "This class has been cancelled",
            ));
        }

        let duplicate = tables.bookings.iter().any(|b| {
            b.session_id() == session_id && b.user_id() == user_id && b.status().is_active()
        });
        if duplicate {
            return Err(DomainError::new(
                ErrorCode::AlreadyBooked,
                "You already have a booking for this class",
            ));
        }

        let status = session
            .availability(booked_count(&tables, session_id))
            .status_for_new_booking();
        let booking = Booking::new(BookingId::new(), *session_id, user_id.clone(), status)?;
        tables.bookings.push(booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError> {
        let tables = self.store.lock().await;
        Ok(tables.bookings.iter().find(|b| b.id() == id).cloned())
    }

    async fn cancel(
        &self,
        id: &BookingId,
        promote_waitlist: bool,
    ) -> Result<Cancellation, DomainError> {
        let mut tables = self.store.lock().await;

        let index = tables
            .bookings
            .iter()
            .position(|b| b.id() == id)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::BookingNotFound, format!("Booking not found: {}", id))
                    .with_detail("booking_id", id.to_string())
            })?;
        let mut booking = tables.bookings[index].clone();
        let previous_status = booking.cancel()?;

        let promotion = if promote_waitlist && previous_status.holds_spot() {
            next_promotion(&tables, &booking)?
        } else {
            None
        };

        tables.bookings[index] = booking.clone();
        let promoted = promotion.map(|(at, promoted)| {
            tables.bookings[at] = promoted.clone();
            promoted
        });

        Ok(Cancellation {
            booking,
            previous_status,
            promoted,
        })
    }

    async fn count_booked(
        &self,
        session_ids: &[ClassSessionId],
    ) -> Result<HashMap<ClassSessionId, u32>, DomainError> {
        let tables = self.store.lock().await;
        let mut counts = HashMap::new();
        for booking in tables
            .bookings
            .iter()
            .filter(|b| b.status().holds_spot() && session_ids.contains(b.session_id()))
        {
            *counts.entry(*booking.session_id()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn find_active_for_member(
        &self,
        session_ids: &[ClassSessionId],
        user_id: &UserId,
    ) -> Result<Vec<Booking>, DomainError> {
        let tables = self.store.lock().await;
        Ok(tables
            .bookings
            .iter()
            .filter(|b| {
                b.user_id() == user_id
                    && b.status().is_active()
                    && session_ids.contains(b.session_id())
            })
            .cloned()
            .collect())
    }

    async fn list_for_member(&self, user_id: &UserId) -> Result<Vec<Booking>, DomainError> {
        let tables = self.store.lock().await;
        Ok(tables
            .bookings
            .iter()
            .rev()
            .filter(|b| b.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn list_for_session(
        &self,
        session_id: &ClassSessionId,
    ) -> Result<Vec<Booking>, DomainError> {
        let tables = self.store.lock().await;
        Ok(tables
            .bookings
            .iter()
            .filter(|b| b.session_id() == session_id)
            .cloned()
            .collect())
    }
}
