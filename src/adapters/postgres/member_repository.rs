//! PostgreSQL implementation of MemberRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::member::{MemberProfile, MemberRole};
use crate::ports::MemberRepository;

pub struct PostgresMemberRepository {
    pool: PgPool,
}

impl PostgresMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MemberRow {
    user_id: String,
    full_name: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<MemberRow> for MemberProfile {
    type Error = DomainError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        let user_id =
            UserId::new(row.user_id).map_err(|e| DomainError::database("Invalid user_id", e))?;
        Ok(MemberProfile::reconstitute(
            user_id,
            row.full_name,
            row.phone,
            row.email,
            MemberRole::from_stored(&row.role),
            Timestamp::from_datetime(row.created_at),
        ))
    }
}

const MEMBER_COLUMNS: &str = "user_id, full_name, phone, email, role, created_at";

#[async_trait]
impl MemberRepository for PostgresMemberRepository {
    async fn ensure(
        &self,
        user_id: &UserId,
        email: Option<&str>,
    ) -> Result<MemberProfile, DomainError> {
        let email = email.map(str::trim).filter(|e| !e.is_empty());

        // Insert-or-refresh in one statement; existing name, phone and role stay.
        let row: MemberRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO member_profiles (user_id, email, role, created_at)
            VALUES ($1, $2, 'member', now())
            ON CONFLICT (user_id) DO UPDATE
                SET email = COALESCE(EXCLUDED.email, member_profiles.email)
            RETURNING {}
            "#,
            MEMBER_COLUMNS
        ))
        .bind(user_id.as_str())
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to ensure member profile", e))?;

        MemberProfile::try_from(row)
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<MemberProfile>, DomainError> {
        let row: Option<MemberRow> = sqlx::query_as(&format!(
            "SELECT {} FROM member_profiles WHERE user_id = $1",
            MEMBER_COLUMNS
        ))
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to find member profile", e))?;

        row.map(MemberProfile::try_from).transpose()
    }

    async fn update(&self, profile: &MemberProfile) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE member_profiles SET full_name = $2, phone = $3 WHERE user_id = $1",
        )
        .bind(profile.user_id().as_str())
        .bind(profile.full_name())
        .bind(profile.phone())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update member profile", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::MemberNotFound,
                format!("Member not found: {}", profile.user_id()),
            ));
        }

        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<MemberProfile>, DomainError> {
        let rows: Vec<MemberRow> = sqlx::query_as(&format!(
            "SELECT {} FROM member_profiles ORDER BY created_at DESC",
            MEMBER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to list members", e))?;

        rows.into_iter().map(MemberProfile::try_from).collect()
    }

    async fn find_many(&self, user_ids: &[UserId]) -> Result<Vec<MemberProfile>, DomainError> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<String> = user_ids.iter().map(|id| id.as_str().to_string()).collect();

        let rows: Vec<MemberRow> = sqlx::query_as(&format!(
            "SELECT {} FROM member_profiles WHERE user_id = ANY($1)",
            MEMBER_COLUMNS
        ))
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to load members", e))?;

        rows.into_iter().map(MemberProfile::try_from).collect()
    }
}
