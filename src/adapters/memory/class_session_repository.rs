//! In-memory implementation of ClassSessionRepository.

use async_trait::async_trait;

use crate::domain::foundation::{ClassSessionId, DomainError, ErrorCode, Timestamp};
use crate::domain::schedule::ClassSession;
use crate::ports::ClassSessionRepository;

use super::InMemoryStore;

#[derive(Debug, Clone)]
pub struct InMemoryClassSessionRepository {
    store: InMemoryStore,
}

impl InMemoryClassSessionRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ClassSessionRepository for InMemoryClassSessionRepository {
    async fn save(&self, session: &ClassSession) -> Result<(), DomainError> {
        self.store.lock().await.sessions.push(session.clone());
        Ok(())
    }

    async fn update(&self, session: &ClassSession) -> Result<(), DomainError> {
        let mut tables = self.store.lock().await;
        match tables.sessions.iter_mut().find(|s| s.id() == session.id()) {
            Some(existing) => {
                *existing = session.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::ClassSessionNotFound,
                format!("Class session not found: {}", session.id()),
            )
            .with_detail("session_id", session.id().to_string())),
        }
    }

    async fn find_by_id(&self, id: &ClassSessionId) -> Result<Option<ClassSession>, DomainError> {
        let tables = self.store.lock().await;
        Ok(tables.sessions.iter().find(|s| s.id() == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[ClassSessionId]) -> Result<Vec<ClassSession>, DomainError> {
        let tables = self.store.lock().await;
        Ok(tables
            .sessions
            .iter()
            .filter(|s| ids.contains(s.id()))
            .cloned()
            .collect())
    }

    async fn list_starting_between(
        &self,
        from: Option<Timestamp>,
        to: Option<Timestamp>,
        include_cancelled: bool,
    ) -> Result<Vec<ClassSession>, DomainError> {
        let tables = self.store.lock().await;
        let mut sessions: Vec<ClassSession> = tables
            .sessions
            .iter()
            .filter(|s| include_cancelled || !s.is_cancelled())
            .filter(|s| from.map_or(true, |from| !s.starts_at().is_before(&from)))
            .filter(|s| to.map_or(true, |to| s.starts_at().is_before(&to)))
            .cloned()
            .collect();
        sessions.sort_by_key(|s| *s.starts_at());
        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ClassTypeId;
    use crate::domain::schedule::test_support::details;

    fn session_at(offset_minutes: i64) -> ClassSession {
        let mut d = details("Flow", 10);
        d.starts_at = d.starts_at.plus_minutes(offset_minutes);
        ClassSession::new(ClassSessionId::new(), ClassTypeId::new(), d).unwrap()
    }

    #[tokio::test]
    async fn window_is_half_open_and_sorted() {
        let repo = InMemoryClassSessionRepository::new(InMemoryStore::new());
        let late = session_at(120);
        let early = session_at(0);
        let outside = session_at(240);
        for s in [&late, &early, &outside] {
            repo.save(s).await.unwrap();
        }

        let found = repo
            .list_starting_between(Some(*early.starts_at()), Some(*outside.starts_at()), false)
            .await
            .unwrap();

        let ids: Vec<_> = found.iter().map(|s| *s.id()).collect();
        assert_eq!(ids, vec![*early.id(), *late.id()]);
    }

    #[tokio::test]
    async fn cancelled_sessions_are_optional() {
        let repo = InMemoryClassSessionRepository::new(InMemoryStore::new());
        let mut cancelled = session_at(0);
        cancelled.toggle_cancelled();
        repo.save(&cancelled).await.unwrap();

        assert!(repo
            .list_starting_between(None, None, false)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            repo.list_starting_between(None, None, true)
                .await
                .unwrap()
                .len(),
            1
        );
    }
}
