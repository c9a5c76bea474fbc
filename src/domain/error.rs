use thiserror::Error;

use crate::db::StoreError;
use crate::db::migrator::unique_index_for;

/// Failure taxonomy shared by every resource facade.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid identifier: '{0}'")]
    InvalidIdentifier(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    DuplicateValue(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Store failure: {0}")]
    StoreFailure(String),
}

impl DomainError {
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{resource} {id}"))
    }

    /// Same wording whether the guard or the unique index caught it.
    pub fn duplicate(field: &str) -> Self {
        Self::DuplicateValue(format!("{field} already exists"))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation(message) => {
                Self::duplicate(unique_index_for(&message).map_or("value", |idx| idx.field))
            }
            other => Self::StoreFailure(other.to_string()),
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(err: sea_orm::DbErr) -> Self {
        StoreError::from_db(err).into()
    }
}

impl From<anyhow::Error> for DomainError {
    fn from(err: anyhow::Error) -> Self {
        Self::StoreFailure(err.to_string())
    }
}
