//! In-memory implementation of MemberRepository.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::member::{MemberProfile, MemberRole};
use crate::ports::MemberRepository;

use super::InMemoryStore;

#[derive(Debug, Clone)]
pub struct InMemoryMemberRepository {
    store: InMemoryStore,
}

impl InMemoryMemberRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }

    /// Seeds a profile with an explicit role. Staff accounts are promoted
    /// outside the API, so tests and local runs need this.
    pub async fn insert_with_role(&self, user_id: &UserId, email: Option<&str>, role: MemberRole) {
        let seeded = MemberProfile::reconstitute(
            user_id.clone(),
            None,
            None,
            email.map(String::from),
            role,
            Timestamp::now(),
        );
        let mut tables = self.store.lock().await;
        tables.members.retain(|m| m.user_id() != user_id);
        tables.members.push(seeded);
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn ensure(
        &self,
        user_id: &UserId,
        email: Option<&str>,
    ) -> Result<MemberProfile, DomainError> {
        let mut tables = self.store.lock().await;

        if let Some(existing) = tables.members.iter_mut().find(|m| m.user_id() == user_id) {
            if let Some(email) = email.filter(|e| !e.trim().is_empty()) {
                *existing = MemberProfile::reconstitute(
                    existing.user_id().clone(),
                    existing.full_name().map(String::from),
                    existing.phone().map(String::from),
                    Some(email.trim().to_string()),
                    existing.role(),
                    *existing.created_at(),
                );
            }
            return Ok(existing.clone());
        }

        let profile = MemberProfile::new(user_id.clone(), email.map(String::from));
        tables.members.push(profile.clone());
        Ok(profile)
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<MemberProfile>, DomainError> {
        let tables = self.store.lock().await;
        Ok(tables.members.iter().find(|m| m.user_id() == user_id).cloned())
    }

    async fn update(&self, profile: &MemberProfile) -> Result<(), DomainError> {
        let mut tables = self.store.lock().await;
        match tables
            .members
            .iter_mut()
            .find(|m| m.user_id() == profile.user_id())
        {
            Some(existing) => {
                existing.update_contact(
                    profile.full_name().map(String::from),
                    profile.phone().map(String::from),
                );
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::MemberNotFound,
                format!("Member not found: {}", profile.user_id()),
            )),
        }
    }

    async fn list_all(&self) -> Result<Vec<MemberProfile>, DomainError> {
        let tables = self.store.lock().await;
        let mut all: Vec<MemberProfile> = tables.members.iter().rev().cloned().collect();
        // Stable sort keeps insertion order among equal timestamps.
        all.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        Ok(all)
    }

    async fn find_many(&self, user_ids: &[UserId]) -> Result<Vec<MemberProfile>, DomainError> {
        let tables = self.store.lock().await;
        Ok(tables
            .members
            .iter()
            .filter(|m| user_ids.contains(m.user_id()))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn ensure_is_idempotent_and_keeps_contact_details() {
        let repo = InMemoryMemberRepository::new(InMemoryStore::new());
        let mut profile = repo.ensure(&user("u1"), Some("a@example.com")).await.unwrap();
        profile.update_contact(Some("Ana".to_string()), None);
        repo.update(&profile).await.unwrap();

        let again = repo.ensure(&user("u1"), Some("new@example.com")).await.unwrap();
        assert_eq!(again.full_name(), Some("Ana"));
        assert_eq!(again.email(), Some("new@example.com"));
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn ensure_without_email_keeps_existing_email() {
        let repo = InMemoryMemberRepository::new(InMemoryStore::new());
        repo.ensure(&user("u1"), Some("a@example.com")).await.unwrap();
        let again = repo.ensure(&user("u1"), None).await.unwrap();
        assert_eq!(again.email(), Some("a@example.com"));
    }

    #[tokio::test]
    async fn update_cannot_change_role() {
        let repo = InMemoryMemberRepository::new(InMemoryStore::new());
        repo.insert_with_role(&user("boss"), None, MemberRole::Admin).await;

        let mut profile = repo.find_by_user(&user("boss")).await.unwrap().unwrap();
        profile.update_contact(Some("Boss".to_string()), None);
        repo.update(&profile).await.unwrap();

        let stored = repo.find_by_user(&user("boss")).await.unwrap().unwrap();
        assert!(stored.is_admin());
        assert_eq!(stored.full_name(), Some("Boss"));
    }

    #[tokio::test]
    async fn update_unknown_member_fails() {
        let repo = InMemoryMemberRepository::new(InMemoryStore::new());
        let err = repo
            .update(&MemberProfile::new(user("ghost"), None))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::MemberNotFound);
    }
}
