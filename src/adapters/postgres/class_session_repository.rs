//! PostgreSQL implementation of ClassSessionRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::foundation::{
    ClassSessionId, ClassTypeId, DomainError, ErrorCode, Timestamp,
};
use crate::domain::schedule::ClassSession;
use crate::ports::ClassSessionRepository;

pub struct PostgresClassSessionRepository {
    pool: PgPool,
}

impl PostgresClassSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ClassSessionRow {
    id: Uuid,
    class_type_id: Uuid,
    title: String,
    instructor_name: Option<String>,
    starts_at: DateTime<Utc>,
    duration_minutes: i32,
    capacity: i32,
    location: Option<String>,
    description: Option<String>,
    is_cancelled: bool,
    price_override: Option<i64>,
    created_at: DateTime<Utc>,
}

impl From<ClassSessionRow> for ClassSession {
    fn from(row: ClassSessionRow) -> Self {
        ClassSession::reconstitute(
            ClassSessionId::from_uuid(row.id),
            ClassTypeId::from_uuid(row.class_type_id),
            row.title,
            row.instructor_name,
            Timestamp::from_datetime(row.starts_at),
            row.duration_minutes.max(0) as u32,
            row.capacity.max(0) as u32,
            row.location,
            row.description,
            row.is_cancelled,
            row.price_override,
            Timestamp::from_datetime(row.created_at),
        )
    }
}

const SESSION_COLUMNS: &str = "id, class_type_id, title, instructor_name, starts_at, \
     duration_minutes, capacity, location, description, is_cancelled, price_override, created_at";

fn as_i32(field: &str, value: u32) -> Result<i32, DomainError> {
    i32::try_from(value)
        .map_err(|_| DomainError::validation(field, format!("{} is too large", field)))
}

#[async_trait]
impl ClassSessionRepository for PostgresClassSessionRepository {
    async fn save(&self, session: &ClassSession) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO class_sessions (
                id, class_type_id, title, instructor_name, starts_at, duration_minutes,
                capacity, location, description, is_cancelled, price_override, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.class_type_id().as_uuid())
        .bind(session.title())
        .bind(session.instructor_name())
        .bind(session.starts_at().as_datetime())
        .bind(as_i32("duration_minutes", session.duration_minutes())?)
        .bind(as_i32("capacity", session.capacity())?)
        .bind(session.location())
        .bind(session.description())
        .bind(session.is_cancelled())
        .bind(session.price_override())
        .bind(session.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to save class session", e))?;

        Ok(())
    }

    async fn update(&self, session: &ClassSession) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE class_sessions SET
                class_type_id = $2,
                title = $3,
                instructor_name = $4,
                starts_at = $5,
                duration_minutes = $6,
                capacity = $7,
                location = $8,
                description = $9,
                is_cancelled = $10,
                price_override = $11
            WHERE id = $1
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.class_type_id().as_uuid())
        .bind(session.title())
        .bind(session.instructor_name())
        .bind(session.starts_at().as_datetime())
        .bind(as_i32("duration_minutes", session.duration_minutes())?)
        .bind(as_i32("capacity", session.capacity())?)
        .bind(session.location())
        .bind(session.description())
        .bind(session.is_cancelled())
        .bind(session.price_override())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update class session", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ClassSessionNotFound,
                format!("Class session not found: {}", session.id()),
            )
            .with_detail("session_id", session.id().to_string()));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &ClassSessionId) -> Result<Option<ClassSession>, DomainError> {
        let row: Option<ClassSessionRow> = sqlx::query_as(&format!(
            "SELECT {} FROM class_sessions WHERE id = $1",
            SESSION_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to find class session", e))?;

        Ok(row.map(ClassSession::from))
    }

    async fn find_by_ids(&self, ids: &[ClassSessionId]) -> Result<Vec<ClassSession>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        let rows: Vec<ClassSessionRow> = sqlx::query_as(&format!(
            "SELECT {} FROM class_sessions WHERE id = ANY($1) ORDER BY starts_at ASC",
            SESSION_COLUMNS
        ))
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to load class sessions", e))?;

        Ok(rows.into_iter().map(ClassSession::from).collect())
    }

    async fn list_starting_between(
        &self,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
        include_cancelled: bool,
    ) -> Result<Vec<ClassSession>, DomainError> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {} FROM class_sessions WHERE TRUE",
            SESSION_COLUMNS
        ));
        if let Some(from) = from {
            query.push(" AND starts_at >= ").push_bind(*from.as_datetime());
        }
        if let Some(to) = to {
            query.push(" AND starts_at < ").push_bind(*to.as_datetime());
        }
        if !include_cancelled {
            query.push(" AND is_cancelled = FALSE");
        }
        query.push(" ORDER BY starts_at ASC");

        let rows: Vec<ClassSessionRow> = query
            .build_query_as::<ClassSessionRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to list class sessions", e))?;

        Ok(rows.into_iter().map(ClassSession::from).collect())
    }
}
