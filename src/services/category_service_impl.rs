//! `SeaORM` implementation of the `CategoryService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::db::{Collection, Filter, SeedOutcome, Store, Stored, seed_if_empty};
use crate::domain::{DocumentId, DomainError, Patch};
use crate::models::{EventCategory, default_categories};
use crate::services::category_service::{CategoryChanges, CategoryService};

pub struct SeaOrmCategoryService {
    categories: Collection<EventCategory>,
}

impl SeaOrmCategoryService {
    #[must_use]
    pub fn new(store: &Store) -> Self {
        Self {
            categories: store.categories(),
        }
    }
}

#[async_trait]
impl CategoryService for SeaOrmCategoryService {
    async fn list(&self) -> Result<Vec<Stored<EventCategory>>, DomainError> {
        Ok(self.categories.find_all(&Filter::new()).await?)
    }

    async fn get(&self, id: DocumentId) -> Result<Stored<EventCategory>, DomainError> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Category", id))
    }

    async fn create(&self, category: EventCategory) -> Result<Stored<EventCategory>, DomainError> {
        let id = self.categories.insert(&category).await?;
        info!(category_id = %id, name = %category.name, "Category created");
        Ok(Stored { id, doc: category })
    }

    async fn update(
        &self,
        id: DocumentId,
        changes: CategoryChanges,
    ) -> Result<Stored<EventCategory>, DomainError> {
        let patch =
            Patch::from_payload(&changes).map_err(|e| DomainError::StoreFailure(e.to_string()))?;

        if self.categories.update_by_id(id, &patch).await? == 0 {
            return Err(DomainError::not_found("Category", id));
        }

        self.get(id).await
    }

    async fn delete(&self, id: DocumentId) -> Result<(), DomainError> {
        if self.categories.delete_by_id(id).await? == 0 {
            return Err(DomainError::not_found("Category", id));
        }
        info!(category_id = %id, "Category deleted");
        Ok(())
    }

    async fn seed_defaults(&self) -> Result<SeedOutcome, DomainError> {
        Ok(seed_if_empty(&self.categories, &Filter::new(), &default_categories()).await?)
    }
}
