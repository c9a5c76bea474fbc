use serde::Serialize;

use crate::db::Stored;
use crate::domain::{DocumentId, DomainError, Ref};
use crate::models::{Event, EventImage};

#[derive(Debug, Clone)]
pub struct NewImage {
    pub event_id: Ref<Event>,
    pub url: String,
    pub is_header: bool,
    pub alt_text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ImageChanges {
    pub event_id: Option<Ref<Event>>,
    pub url: Option<String>,
    pub is_header: Option<bool>,
    pub alt_text: Option<String>,
}

#[async_trait::async_trait]
pub trait ImageService: Send + Sync {
    /// Stores an image for an event. The event is not required to exist.
    async fn upload(&self, image: NewImage) -> Result<Stored<EventImage>, DomainError>;

    async fn list_for_event(
        &self,
        event_id: Ref<Event>,
    ) -> Result<Vec<Stored<EventImage>>, DomainError>;

    /// The first image flagged as header, if any.
    async fn header_for_event(
        &self,
        event_id: Ref<Event>,
    ) -> Result<Option<Stored<EventImage>>, DomainError>;

    async fn update(
        &self,
        id: DocumentId,
        changes: ImageChanges,
    ) -> Result<Stored<EventImage>, DomainError>;

    async fn delete(&self, id: DocumentId) -> Result<(), DomainError>;
}
