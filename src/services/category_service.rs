use serde::Serialize;

use crate::db::{SeedOutcome, Stored};
use crate::domain::{DocumentId, DomainError};
use crate::models::EventCategory;

#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

#[async_trait::async_trait]
pub trait CategoryService: Send + Sync {
    async fn list(&self) -> Result<Vec<Stored<EventCategory>>, DomainError>;

    async fn get(&self, id: DocumentId) -> Result<Stored<EventCategory>, DomainError>;

    async fn create(&self, category: EventCategory) -> Result<Stored<EventCategory>, DomainError>;

    async fn update(
        &self,
        id: DocumentId,
        changes: CategoryChanges,
    ) -> Result<Stored<EventCategory>, DomainError>;

    /// Events pointing at the category keep their reference.
    async fn delete(&self, id: DocumentId) -> Result<(), DomainError>;

    /// Inserts the default taxonomy if no category exists yet.
    async fn seed_defaults(&self) -> Result<SeedOutcome, DomainError>;
}
