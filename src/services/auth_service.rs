//! Domain service for user accounts and credential checks.
//!
//! Credentials are checked per request; there are no sessions or tokens.

use serde::Serialize;

use crate::db::Stored;
use crate::domain::{DocumentId, DomainError};
use crate::models::User;

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInfo {
    pub id: DocumentId,
    pub username: String,
    pub email: String,
    pub role: String,
}

impl UserInfo {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == crate::models::ADMIN_ROLE
    }
}

impl From<Stored<User>> for UserInfo {
    fn from(stored: Stored<User>) -> Self {
        Self {
            id: stored.id,
            username: stored.doc.username,
            email: stored.doc.email,
            role: stored.doc.role,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub current_password: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub new_password: Option<String>,
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates a user.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DuplicateValue`] if the username or the email
    /// is taken.
    async fn register(&self, registration: Registration) -> Result<UserInfo, DomainError>;

    /// Verifies credentials.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Unauthorized`] for an unknown user or a wrong
    /// password, without saying which.
    async fn login(&self, username: &str, password: &str) -> Result<UserInfo, DomainError>;

    async fn get_user(&self, id: DocumentId) -> Result<UserInfo, DomainError>;

    /// Changes the caller's own account after re-checking their password.
    async fn update_profile(
        &self,
        caller: &UserInfo,
        update: ProfileUpdate,
    ) -> Result<UserInfo, DomainError>;
}
