//! PostgreSQL implementation of BookingRepository.
//!
//! `place` and `cancel` run in a transaction that first
//! takes a row lock on the session (`SELECT ... FOR UPDATE`). Every
//! capacity-sensitive write on a session is therefore serialized, and the
//! partial unique index `bookings_one_active_per_member` backs up the
//! duplicate check.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::booking::{Availability, Booking, BookingStatus};
use crate::domain::foundation::{
    BookingId, ClassSessionId, DomainError, ErrorCode, Timestamp, UserId,
};
use crate::ports::{BookingRepository, Cancellation};

const ACTIVE_BOOKING_INDEX: &str = "bookings_one_active_per_member";

pub struct PostgresBookingRepository {
    pool: PgPool,
}

impl PostgresBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    session_id: Uuid,
    user_id: String,
    status: String,
    created_at: DateTime<Utc>,
    cancelled_at: Option<DateTime<Utc>>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = DomainError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let status: BookingStatus = row
            .status
            .parse()
            .map_err(|e| DomainError::database("Invalid stored booking status", e))?;
        let user_id =
            UserId::new(row.user_id).map_err(|e| DomainError::database("Invalid user_id", e))?;

        Ok(Booking::reconstitute(
            BookingId::from_uuid(row.id),
            ClassSessionId::from_uuid(row.session_id),
            user_id,
            status,
            Timestamp::from_datetime(row.created_at),
            row.cancelled_at.map(Timestamp::from_datetime),
        ))
    }
}

const BOOKING_COLUMNS: &str = "id, session_id, user_id, status, created_at, cancelled_at";

#[derive(Debug, sqlx::FromRow)]
struct LockedSession {
    capacity: i32,
    is_cancelled: bool,
}

async fn lock_session(
    tx: &mut Transaction<'_, Postgres>,
    session_id: &ClassSessionId,
) -> Result<Option<LockedSession>, DomainError> {
    sqlx::query_as("SELECT capacity, is_cancelled FROM class_sessions WHERE id = $1 FOR UPDATE")
        .bind(session_id.as_uuid())
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| DomainError::database("Failed to lock class session", e))
}

async fn booked_count(
    tx: &mut Transaction<'_, Postgres>,
    session_id: &ClassSessionId,
) -> Result<u32, DomainError> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM bookings WHERE session_id = $1 AND status = 'booked'",
    )
    .bind(session_id.as_uuid())
    .fetch_one(&mut **tx)
    .await
    .map_err(|e| DomainError::database("Failed to count bookings", e))?;

    Ok(count.max(0) as u32)
}

async fn set_status(
    tx: &mut Transaction<'_, Postgres>,
    booking: &Booking,
) -> Result<(), DomainError> {
    sqlx::query("UPDATE bookings SET status = $2, cancelled_at = $3 WHERE id = $1")
        .bind(booking.id().as_uuid())
        .bind(booking.status().as_str())
        .bind(booking.cancelled_at().map(|t| *t.as_datetime()))
        .execute(&mut **tx)
        .await
        .map_err(|e| DomainError::database("Failed to update booking", e))?;
    Ok(())
}

fn booking_not_found(id: &BookingId) -> DomainError {
    DomainError::new(ErrorCode::BookingNotFound, format!("Booking not found: {}", id))
        .with_detail("booking_id", id.to_string())
}

fn already_booked() -> DomainError {
    DomainError::new(
        ErrorCode::AlreadyBooked,
        "You already have a booking for this class",
    )
}

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn place(
        &self,
        session_id: &ClassSessionId,
        user_id: &UserId,
    ) -> Result<Booking, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        let session = lock_session(&mut tx, session_id).await?.ok_or_else(|| {
            DomainError::new(
                ErrorCode::ClassSessionNotFound,
                format!("Class session not found: {}", session_id),
            )
            .with_detail("session_id", session_id.to_string())
        })?;

        if session.is_cancelled {
            return Err(DomainError::new(
                ErrorCode::SessionCancelled,
                "This class has been cancelled",
            ));
        }

        let duplicate: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM bookings
                WHERE session_id = $1 AND user_id = $2 AND status IN ('booked', 'waitlist')
            )
            "#,
        )
        .bind(session_id.as_uuid())
        .bind(user_id.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to check existing booking", e))?;
        if duplicate {
            return Err(already_booked());
        }

        let booked = booked_count(&mut tx, session_id).await?;
        let status = Availability::new(session.capacity.max(0) as u32, booked)
            .status_for_new_booking();
        let booking = Booking::new(BookingId::new(), *session_id, user_id.clone(), status)?;

        sqlx::query(
            r#"
            INSERT INTO bookings (id, session_id, user_id, status, created_at, cancelled_at)
            VALUES ($1, $2, $3, $4, $5, NULL)
            "#,
        )
        .bind(booking.id().as_uuid())
        .bind(booking.session_id().as_uuid())
        .bind(booking.user_id().as_str())
        .bind(booking.status().as_str())
        .bind(booking.created_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some(ACTIVE_BOOKING_INDEX) {
                    return already_booked();
                }
            }
            DomainError::database("Failed to save booking", e)
        })?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit booking", e))?;

        Ok(booking)
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError> {
        let row: Option<BookingRow> = sqlx::query_as(&format!(
            "SELECT {} FROM bookings WHERE id = $1",
            BOOKING_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to find booking", e))?;

        row.map(Booking::try_from).transpose()
    }

    async fn cancel(
        &self,
        id: &BookingId,
        promote_waitlist: bool,
    ) -> Result<Cancellation, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        let session_id: Option<Uuid> =
            sqlx::query_scalar("SELECT session_id FROM bookings WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| DomainError::database("Failed to find booking", e))?;
        let session_id = ClassSessionId::from_uuid(session_id.ok_or_else(|| booking_not_found(id))?);

        // Same lock order as `place`: session first, then its bookings.
        let session = lock_session(&mut tx, &session_id).await?;

        let row: Option<BookingRow> = sqlx::query_as(&format!(
            "SELECT {} FROM bookings WHERE id = $1 FOR UPDATE",
            BOOKING_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to lock booking", e))?;
        let mut booking = Booking::try_from(row.ok_or_else(|| booking_not_found(id))?)?;

        let previous_status = booking.cancel()?;
        set_status(&mut tx, &booking).await?;

        let mut promoted = None;
        if let Some(session) = session.filter(|_| promote_waitlist && previous_status.holds_spot()) {
            let booked = booked_count(&mut tx, &session_id).await?;
            if !Availability::new(session.capacity.max(0) as u32, booked).is_full() {
                let next: Option<BookingRow> = sqlx::query_as(&format!(
                    r#"
                    SELECT {} FROM bookings
                    WHERE session_id = $1 AND status = 'waitlist'
                    ORDER BY created_at ASC, id ASC
                    LIMIT 1
                    FOR UPDATE
                    "#,
                    BOOKING_COLUMNS
                ))
                .bind(session_id.as_uuid())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| DomainError::database("Failed to find waitlisted booking", e))?;

                if let Some(row) = next {
                    let mut next = Booking::try_from(row)?;
                    next.promote()?;
                    set_status(&mut tx, &next).await?;
                    promoted = Some(next);
                }
            }
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit cancellation", e))?;

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
        if session_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let uuids: Vec<Uuid> = session_ids.iter().map(|id| *id.as_uuid()).collect();

        let rows: Vec<(Uuid, i64)> = sqlx::query_as(
            r#"
            SELECT session_id, COUNT(*)
            FROM bookings
            WHERE session_id = ANY($1) AND status = 'booked'
            GROUP BY session_id
            "#,
        )
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to count bookings", e))?;

        Ok(rows
            .into_iter()
            .map(|(id, count)| (ClassSessionId::from_uuid(id), count.max(0) as u32))
            .collect())
    }

    async fn find_active_for_member(
        &self,
        session_ids: &[ClassSessionId],
        user_id: &UserId,
    ) -> Result<Vec<Booking>, DomainError> {
        if session_ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = session_ids.iter().map(|id| *id.as_uuid()).collect();

        let rows: Vec<BookingRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM bookings
            WHERE session_id = ANY($1) AND user_id = $2 AND status IN ('booked', 'waitlist')
            "#,
            BOOKING_COLUMNS
        ))
        .bind(&uuids)
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to load member bookings", e))?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn list_for_member(&self, user_id: &UserId) -> Result<Vec<Booking>, DomainError> {
        let rows: Vec<BookingRow> = sqlx::query_as(&format!(
            "SELECT {} FROM bookings WHERE user_id = $1 ORDER BY created_at DESC",
            BOOKING_COLUMNS
        ))
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list member bookings", e))?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn list_for_session(
        &self,
        session_id: &ClassSessionId,
    ) -> Result<Vec<Booking>, DomainError> {
        let rows: Vec<BookingRow> = sqlx::query_as(&format!(
            "SELECT {} FROM bookings WHERE session_id = $1 ORDER BY created_at ASC",
            BOOKING_COLUMNS
        ))
        .bind(session_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list session bookings", e))?;

        rows.into_iter().map(Booking::try_from).collect()
    }
}
