//! Class session repository port.

use async_trait::async_trait;

use crate::domain::foundation::{ClassSessionId, DomainError, Timestamp};
use crate::domain::schedule::ClassSession;

/// Repository port for scheduled class sessions.
#[async_trait]
pub trait ClassSessionRepository: Send + Sync {
    /// Save a new session.
    async fn save(&self, session: &ClassSession) -> Result<(), DomainError>;

    /// Update an existing session.
    ///
    /// # Errors
    ///
    /// - `ClassSessionNotFound` if it doesn't exist
    async fn update(&self, session: &ClassSession) -> Result<(), DomainError>;

    /// Find a session by ID.
    async fn find_by_id(&self, id: &ClassSessionId) -> Result<Option<ClassSession>, DomainError>;

    /// Find several sessions; unknown IDs are skipped.
    async fn find_by_ids(&self, ids: &[ClassSessionId]) -> Result<Vec<ClassSession>, DomainError>;

    /// Sessions with `from <= starts_at < to`, ordered by start time.
    ///
    /// A missing bound is open. Cancelled sessions are skipped unless
    /// `include_cancelled` is set.
    async fn list_starting_between(
        &self,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
        include_cancelled: bool,
    ) -> Result<Vec<ClassSession>, DomainError>;
}
