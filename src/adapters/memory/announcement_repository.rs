//! In-memory implementation of AnnouncementRepository.

use async_trait::async_trait;

use crate::domain::announcement::Announcement;
use crate::domain::foundation::DomainError;
use crate::ports::AnnouncementRepository;

use super::InMemoryStore;

#[derive(Debug, Clone)]
pub struct InMemoryAnnouncementRepository {
    store: InMemoryStore,
}

impl InMemoryAnnouncementRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AnnouncementRepository for InMemoryAnnouncementRepository {
    async fn save(&self, announcement: &Announcement) -> Result<(), DomainError> {
        self.store.lock().await.announcements.push(announcement.clone());
        Ok(())
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<Announcement>, DomainError> {
        let tables = self.store.lock().await;
        Ok(tables
            .announcements
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{AnnouncementId, UserId};

    #[tokio::test]
    async fn list_recent_is_newest_first_and_limited() {
        let repo = InMemoryAnnouncementRepository::new(InMemoryStore::new());
        for title in ["one", "two", "three"] {
            let a = Announcement::new(
                AnnouncementId::new(),
                title,
                "body",
                UserId::new("admin").unwrap(),
            )
            .unwrap();
            repo.save(&a).await.unwrap();
        }

        let titles: Vec<String> = repo
            .list_recent(2)
            .await
            .unwrap()
            .iter()
            .map(|a| a.title().to_string())
            .collect();
        assert_eq!(titles, vec!["three", "two"]);
    }
}
