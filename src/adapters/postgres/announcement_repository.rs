//! PostgreSQL implementation of AnnouncementRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::announcement::Announcement;
use crate::domain::foundation::{AnnouncementId, DomainError, Timestamp, UserId};
use crate::ports::AnnouncementRepository;

pub struct PostgresAnnouncementRepository {
    pool: PgPool,
}

impl PostgresAnnouncementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AnnouncementRow {
    id: Uuid,
    title: String,
    message: String,
    created_by: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AnnouncementRow> for Announcement {
    type Error = DomainError;

    fn try_from(row: AnnouncementRow) -> Result<Self, Self::Error> {
        let created_by = UserId::new(row.created_by)
            .map_err(|e| DomainError::database("Invalid created_by", e))?;
        Ok(Announcement::reconstitute(
            AnnouncementId::from_uuid(row.id),
            row.title,
            row.message,
            created_by,
            Timestamp::from_datetime(row.created_at),
        ))
    }
}

#[async_trait]
impl AnnouncementRepository for PostgresAnnouncementRepository {
    async fn save(&self, announcement: &Announcement) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO announcements (id, title, message, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(announcement.id().as_uuid())
        .bind(announcement.title())
        .bind(announcement.message())
        .bind(announcement.created_by().as_str())
        .bind(announcement.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to save announcement", e))?;

        Ok(())
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<Announcement>, DomainError> {
        let rows: Vec<AnnouncementRow> = sqlx::query_as(
            r#"
            SELECT id, title, message, created_by, created_at
            FROM announcements
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list announcements", e))?;

        rows.into_iter().map(Announcement::try_from).collect()
    }
}
