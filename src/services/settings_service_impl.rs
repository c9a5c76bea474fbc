//! `SeaORM` implementation of the `SettingsService` trait.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::SettingsDefaults;
use crate::db::{Collection, Filter, SeedOutcome, Store, StoreError, Stored, seed_if_empty};
use crate::domain::{DomainError, Patch, Ref};
use crate::models::{EventCategory, User, UserSettings};
use crate::services::settings_service::{SettingsChanges, SettingsService};

pub struct SeaOrmSettingsService {
    settings: Collection<UserSettings>,
    defaults: SettingsDefaults,
}

impl SeaOrmSettingsService {
    #[must_use]
    pub fn new(store: &Store, defaults: SettingsDefaults) -> Self {
        Self {
            settings: store.user_settings(),
            defaults,
        }
    }

    fn scope(user_id: Ref<User>) -> Filter {
        Filter::new().eq("user_id", user_id.to_string())
    }

    fn defaults_for(&self, user_id: Ref<User>) -> UserSettings {
        UserSettings {
            user_id,
            notification_preferences: self.defaults.notifications,
            theme: self.defaults.theme,
            preferred_categories: Vec::new(),
            language: self.defaults.language.clone(),
            timezone: self.defaults.timezone.clone(),
        }
    }

    async fn find(&self, user_id: Ref<User>) -> Result<Option<Stored<UserSettings>>, DomainError> {
        Ok(self.settings.find_one(&Self::scope(user_id)).await?)
    }

    async fn apply(
        &self,
        user_id: Ref<User>,
        patch: &Patch,
    ) -> Result<Stored<UserSettings>, DomainError> {
        let current = self.initialize(user_id).await?;

        if self.settings.update_by_id(current.id, patch).await? == 0 {
            return Err(DomainError::not_found("Settings for user", user_id));
        }

        self.settings
            .find_by_id(current.id)
            .await?
            .ok_or_else(|| DomainError::not_found("Settings for user", user_id))
    }
}

#[async_trait]
impl SettingsService for SeaOrmSettingsService {
    async fn get_or_initialize(
        &self,
        user_id: Ref<User>,
    ) -> Result<Stored<UserSettings>, DomainError> {
        match self.find(user_id).await? {
            Some(existing) => Ok(existing),
            None => self.initialize(user_id).await,
        }
    }

    async fn initialize(&self, user_id: Ref<User>) -> Result<Stored<UserSettings>, DomainError> {
        let scope = Self::scope(user_id);
        let defaults = [self.defaults_for(user_id)];

        match seed_if_empty(&self.settings, &scope, &defaults).await {
            Ok(SeedOutcome::Seeded(_)) => info!(user_id = %user_id, "Initialized user settings"),
            Ok(SeedOutcome::Skipped) => {}
            // another request created them between our count and insert
            Err(StoreError::UniqueViolation(_)) => {
                debug!(user_id = %user_id, "Settings initialized concurrently");
            }
            Err(e) => return Err(e.into()),
        }

        self.find(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Settings for user", user_id))
    }

    async fn update(
        &self,
        user_id: Ref<User>,
        changes: SettingsChanges,
    ) -> Result<Stored<UserSettings>, DomainError> {
        let patch =
            Patch::from_payload(&changes).map_err(|e| DomainError::StoreFailure(e.to_string()))?;
        self.apply(user_id, &patch).await
    }

    async fn set_preferred_categories(
        &self,
        user_id: Ref<User>,
        categories: Vec<Ref<EventCategory>>,
    ) -> Result<Stored<UserSettings>, DomainError> {
        let patch = Patch::new()
            .with("preferred_categories", &categories)
            .map_err(|e| DomainError::StoreFailure(e.to_string()))?;
        self.apply(user_id, &patch).await
    }
}
