//! Class type repository port.

use async_trait::async_trait;

use crate::domain::foundation::{ClassTypeId, DomainError};
use crate::domain::schedule::ClassType;

/// Repository port for the class type catalogue.
#[async_trait]
pub trait ClassTypeRepository: Send + Sync {
    /// Save a new class type.
    async fn save(&self, class_type: &ClassType) -> Result<(), DomainError>;

    /// Update an existing class type.
    ///
    /// # Errors
    ///
    /// - `ClassTypeNotFound` if it doesn't exist
    async fn update(&self, class_type: &ClassType) -> Result<(), DomainError>;

    /// Find a class type by ID.
    async fn find_by_id(&self, id: &ClassTypeId) -> Result<Option<ClassType>, DomainError>;

    /// All class types ordered by name.
    async fn list_all(&self) -> Result<Vec<ClassType>, DomainError>;
}
