//! Domain service for per-user preference settings.
//!
//! Every user has at most one settings document. It is created with the
//! configured defaults the first time anything asks for it.

use serde::Serialize;

use crate::db::Stored;
use crate::domain::{DomainError, Ref};
use crate::models::{EventCategory, NotificationPreferences, Theme, User, UserSettings};

#[derive(Debug, Clone, Default, Serialize)]
pub struct SettingsChanges {
    /// Replaces all three channels at once.
    pub notification_preferences: Option<NotificationPreferences>,
    pub theme: Option<Theme>,
    pub preferred_categories: Option<Vec<Ref<EventCategory>>>,
    pub language: Option<String>,
    pub timezone: Option<String>,
}

#[async_trait::async_trait]
pub trait SettingsService: Send + Sync {
    /// Returns the user's settings, initializing them on first access.
    async fn get_or_initialize(
        &self,
        user_id: Ref<User>,
    ) -> Result<Stored<UserSettings>, DomainError>;

    /// Creates the default settings unless they already exist. Safe to call
    /// concurrently; every caller observes the same document.
    async fn initialize(&self, user_id: Ref<User>) -> Result<Stored<UserSettings>, DomainError>;

    async fn update(
        &self,
        user_id: Ref<User>,
        changes: SettingsChanges,
    ) -> Result<Stored<UserSettings>, DomainError>;

    /// Replaces the preferred category list. Ids are not checked against
    /// the category collection.
    async fn set_preferred_categories(
        &self,
        user_id: Ref<User>,
        categories: Vec<Ref<EventCategory>>,
    ) -> Result<Stored<UserSettings>, DomainError>;
}
