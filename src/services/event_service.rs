//! Domain service for events.
//!
//! Anyone may create and read events; changing or removing one takes the
//! admin role.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::db::Stored;
use crate::domain::{DocumentId, DomainError, Ref, timestamp};
use crate::models::{Event, EventCategory, User};
use crate::services::UserInfo;

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub description: Option<String>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub location: Option<String>,
    pub category_id: Option<Ref<EventCategory>>,
    pub created_by: Option<Ref<User>>,
}

/// Fields an update may replace. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EventChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(with = "timestamp::option")]
    pub start_time: Option<NaiveDateTime>,
    #[serde(with = "timestamp::option")]
    pub end_time: Option<NaiveDateTime>,
    pub location: Option<String>,
    pub category_id: Option<Ref<EventCategory>>,
    pub created_by: Option<Ref<User>>,
}

#[async_trait::async_trait]
pub trait EventService: Send + Sync {
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] if the event ends before it starts.
    async fn create(&self, event: NewEvent) -> Result<Stored<Event>, DomainError>;

    async fn get(&self, id: DocumentId) -> Result<Stored<Event>, DomainError>;

    async fn list(&self) -> Result<Vec<Stored<Event>>, DomainError>;

    /// Applies `changes` and returns the stored result.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Unauthorized`] unless `caller` is an admin, and
    /// [`DomainError::NotFound`] if no event has this id.
    async fn update(
        &self,
        caller: &UserInfo,
        id: DocumentId,
        changes: EventChanges,
    ) -> Result<Stored<Event>, DomainError>;

    async fn delete(&self, caller: &UserInfo, id: DocumentId) -> Result<(), DomainError>;
}
