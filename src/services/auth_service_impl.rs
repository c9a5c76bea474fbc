//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::SecurityConfig;
use crate::db::{Collection, Filter, Store};
use crate::domain::{DocumentId, DomainError, Patch};
use crate::models::User;
use crate::services::auth_service::{AuthService, ProfileUpdate, Registration, UserInfo};
use crate::services::{password, uniqueness::check_unique};

const INVALID_CREDENTIALS: &str = "invalid username or password";

pub struct SeaOrmAuthService {
    users: Collection<User>,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub fn new(store: &Store, security: SecurityConfig) -> Self {
        Self {
            users: store.users(),
            security,
        }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, registration: Registration) -> Result<UserInfo, DomainError> {
        check_unique(&self.users, "username", &registration.username, None).await?;
        check_unique(&self.users, "email", &registration.email, None).await?;

        let password_hash = password::hash(&registration.password, &self.security).await?;
        let user = User {
            username: registration.username,
            email: registration.email,
            password_hash,
            role: registration.role,
        };

        // the unique indexes turn a lost race into DuplicateValue here
        let id = self.users.insert(&user).await?;
        info!(user_id = %id, username = %user.username, role = %user.role, "User registered");

        Ok(UserInfo {
            id,
            username: user.username,
            email: user.email,
            role: user.role,
        })
    }

    async fn login(&self, username: &str, password: &str) -> Result<UserInfo, DomainError> {
        let user = self
            .users
            .find_one(&Filter::new().eq("username", username))
            .await?;

        let Some(user) = user else {
            warn!(username, "Login for unknown user");
            return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        if !password::verify(password, &user.doc.password_hash).await? {
            warn!(username, "Login with wrong password");
            return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        Ok(user.into())
    }

    async fn get_user(&self, id: DocumentId) -> Result<UserInfo, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .map(UserInfo::from)
            .ok_or_else(|| DomainError::not_found("User", id))
    }

    async fn update_profile(
        &self,
        caller: &UserInfo,
        update: ProfileUpdate,
    ) -> Result<UserInfo, DomainError> {
        let stored = self
            .users
            .find_by_id(caller.id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", caller.id))?;

        if !password::verify(&update.current_password, &stored.doc.password_hash).await? {
            return Err(DomainError::Unauthorized(
                "current password is incorrect".to_string(),
            ));
        }

        let username = update.username.filter(|u| *u != stored.doc.username);
        let email = update.email.filter(|e| *e != stored.doc.email);

        if let Some(username) = &username {
            check_unique(&self.users, "username", username, Some(caller.id)).await?;
        }
        if let Some(email) = &email {
            check_unique(&self.users, "email", email, Some(caller.id)).await?;
        }

        let password_hash = match &update.new_password {
            Some(new_password) => Some(password::hash(new_password, &self.security).await?),
            None => None,
        };

        let patch = Patch::new()
            .with("username", &username)
            .and_then(|p| p.with("email", &email))
            .and_then(|p| p.with("password_hash", &password_hash))
            .map_err(|e| DomainError::StoreFailure(e.to_string()))?;

        if self.users.update_by_id(caller.id, &patch).await? == 0 {
            return Err(DomainError::not_found("User", caller.id));
        }

        info!(user_id = %caller.id, fields = patch.len(), "Profile updated");
        self.get_user(caller.id).await
    }
}
