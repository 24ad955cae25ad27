//! In-memory implementation of ClassTypeRepository.

use async_trait::async_trait;

use crate::domain::foundation::{ClassTypeId, DomainError, ErrorCode};
use crate::domain::schedule::ClassType;
use crate::ports::ClassTypeRepository;

use super::InMemoryStore;

#[derive(Debug, Clone)]
pub struct InMemoryClassTypeRepository {
    store: InMemoryStore,
}

impl InMemoryClassTypeRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ClassTypeRepository for InMemoryClassTypeRepository {
    async fn save(&self, class_type: &ClassType) -> Result<(), DomainError> {
        self.store.lock().await.class_types.push(class_type.clone());
        Ok(())
    }

    async fn update(&self, class_type: &ClassType) -> Result<(), DomainError> {
        let mut tables = self.store.lock().await;
        match tables
            .class_types
            .iter_mut()
            .find(|ct| ct.id() == class_type.id())
        {
            Some(existing) => {
                *existing = class_type.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::ClassTypeNotFound,
                format!("Class type not found: {}", class_type.id()),
            )),
        }
    }

    async fn find_by_id(&self, id: &ClassTypeId) -> Result<Option<ClassType>, DomainError> {
        let tables = self.store.lock().await;
        Ok(tables.class_types.iter().find(|ct| ct.id() == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<ClassType>, DomainError> {
        let mut all = self.store.lock().await.class_types.clone();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(all)
    }
}
