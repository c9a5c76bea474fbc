//! `SeaORM` implementation of the `EventService` trait.

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};

use crate::db::{Collection, Filter, Store, Stored};
use crate::domain::{DocumentId, DomainError, Patch};
use crate::models::Event;
use crate::services::UserInfo;
use crate::services::event_service::{EventChanges, EventService, NewEvent};

pub struct SeaOrmEventService {
    events: Collection<Event>,
}

impl SeaOrmEventService {
    #[must_use]
    pub fn new(store: &Store) -> Self {
        Self {
            events: store.events(),
        }
    }

    fn require_admin(caller: &UserInfo, action: &str) -> Result<(), DomainError> {
        if caller.is_admin() {
            return Ok(());
        }
        warn!(user = %caller.username, action, "Non-admin attempted a privileged event operation");
        Err(DomainError::Unauthorized(format!(
            "only administrators can {action} events"
        )))
    }
}

#[async_trait]
impl EventService for SeaOrmEventService {
    async fn create(&self, event: NewEvent) -> Result<Stored<Event>, DomainError> {
        let now = Utc::now();
        let doc = Event {
            name: event.name,
            description: event.description,
            start_time: event.start_time,
            end_time: event.end_time,
            location: event.location,
            category_id: event.category_id,
            created_by: event.created_by,
            created_at: now,
            updated_at: now,
        };

        if !doc.has_valid_window() {
            return Err(DomainError::validation("end_time must not be before start_time"));
        }

        let id = self.events.insert(&doc).await?;
        info!(event_id = %id, name = %doc.name, "Event created");
        Ok(Stored { id, doc })
    }

    async fn get(&self, id: DocumentId) -> Result<Stored<Event>, DomainError> {
        self.events
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Event", id))
    }

    async fn list(&self) -> Result<Vec<Stored<Event>>, DomainError> {
        Ok(self.events.find_all(&Filter::new()).await?)
    }

    async fn update(
        &self,
        caller: &UserInfo,
        id: DocumentId,
        changes: EventChanges,
    ) -> Result<Stored<Event>, DomainError> {
        Self::require_admin(caller, "update")?;

        if changes.start_time.is_some() || changes.end_time.is_some() {
            let current = self.get(id).await?;
            let start = changes.start_time.unwrap_or(current.doc.start_time);
            let end = changes.end_time.unwrap_or(current.doc.end_time);
            if end < start {
                return Err(DomainError::validation(
                    "end_time must not be before start_time",
                ));
            }
        }

        let patch = Patch::from_payload(&changes)
            .and_then(|patch| patch.with("updated_at", Utc::now()))
            .map_err(|e| DomainError::StoreFailure(e.to_string()))?;

        let matched = self.events.update_by_id(id, &patch).await?;
        if matched == 0 {
            return Err(DomainError::not_found("Event", id));
        }

        info!(event_id = %id, fields = patch.len(), by = %caller.username, "Event updated");
        self.get(id).await
    }

    async fn delete(&self, caller: &UserInfo, id: DocumentId) -> Result<(), DomainError> {
        Self::require_admin(caller, "delete")?;

        let deleted = self.events.delete_by_id(id).await?;
        if deleted == 0 {
            return Err(DomainError::not_found("Event", id));
        }

        // images keep their event_id and are left in place
        info!(event_id = %id, by = %caller.username, "Event deleted");
        Ok(())
    }
}
