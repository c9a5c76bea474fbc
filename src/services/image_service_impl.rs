//! `SeaORM` implementation of the `ImageService` trait.

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};

use crate::db::{Collection, Filter, Store, Stored};
use crate::domain::{DocumentId, DomainError, Patch, Ref};
use crate::models::{Event, EventImage};
use crate::services::image_service::{ImageChanges, ImageService, NewImage};

pub struct SeaOrmImageService {
    images: Collection<EventImage>,
    events: Collection<Event>,
}

impl SeaOrmImageService {
    #[must_use]
    pub fn new(store: &Store) -> Self {
        Self {
            images: store.images(),
            events: store.events(),
        }
    }

    fn by_event(event_id: Ref<Event>) -> Filter {
        Filter::new().eq("event_id", event_id.to_string())
    }
}

#[async_trait]
impl ImageService for SeaOrmImageService {
    async fn upload(&self, image: NewImage) -> Result<Stored<EventImage>, DomainError> {
        if self.events.resolve(&image.event_id).await?.is_none() {
            warn!(event_id = %image.event_id, "Storing image for an event that does not exist");
        }

        let doc = EventImage {
            event_id: image.event_id,
            url: image.url,
            upload_date: Utc::now(),
            is_header: image.is_header,
            alt_text: image.alt_text,
        };

        let id = self.images.insert(&doc).await?;
        info!(image_id = %id, event_id = %doc.event_id, is_header = doc.is_header, "Image stored");
        Ok(Stored { id, doc })
    }

    async fn list_for_event(
        &self,
        event_id: Ref<Event>,
    ) -> Result<Vec<Stored<EventImage>>, DomainError> {
        Ok(self.images.find_all(&Self::by_event(event_id)).await?)
    }

    async fn header_for_event(
        &self,
        event_id: Ref<Event>,
    ) -> Result<Option<Stored<EventImage>>, DomainError> {
        let filter = Self::by_event(event_id).eq("is_header", true);
        Ok(self.images.find_one(&filter).await?)
    }

    async fn update(
        &self,
        id: DocumentId,
        changes: ImageChanges,
    ) -> Result<Stored<EventImage>, DomainError> {
        let patch =
            Patch::from_payload(&changes).map_err(|e| DomainError::StoreFailure(e.to_string()))?;

        if self.images.update_by_id(id, &patch).await? == 0 {
            return Err(DomainError::not_found("Image", id));
        }

        self.images
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Image", id))
    }

    async fn delete(&self, id: DocumentId) -> Result<(), DomainError> {
        if self.images.delete_by_id(id).await? == 0 {
            return Err(DomainError::not_found("Image", id));
        }
        info!(image_id = %id, "Image deleted");
        Ok(())
    }
}
