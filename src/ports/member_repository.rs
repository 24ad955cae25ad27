//! Member profile repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::member::MemberProfile;

/// Repository port for member profiles.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Idempotent upsert run on every authenticated profile read.
    ///
    /// Creates a member profile if none exists. An existing row keeps its
    /// name, phone and role; its email is refreshed when one is supplied.
    async fn ensure(
        &self,
        user_id: &UserId,
        email: Option<&str>,
    ) -> Result<MemberProfile, DomainError>;

    /// Find a profile by user ID.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<MemberProfile>, DomainError>;

    /// Persist name and phone changes.
    ///
    /// # Errors
    ///
    /// - `MemberNotFound` if no profile exists
    async fn update(&self, profile: &MemberProfile) -> Result<(), DomainError>;

    /// All profiles, newest first.
    async fn list_all(&self) -> Result<Vec<MemberProfile>, DomainError>;

    /// Profiles for the given users; unknown users are skipped.
    async fn find_many(&self, user_ids: &[UserId]) -> Result<Vec<MemberProfile>, DomainError>;
}
