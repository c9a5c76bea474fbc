//! Domain primitives shared by every resource type.
//!
//! Documents are keyed by a [`DocumentId`]; cross-document links are weak
//! [`Ref`]s that carry the target type but no ownership.

pub mod error;
pub mod patch;
pub mod timestamp;

pub use error::DomainError;
pub use patch::Patch;

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Identifier of a stored document.
///
/// Internally a 12-byte object id; at the API boundary it is always the
/// 24-character lowercase hex string.
///
/// # Examples
///
/// ```rust
/// use evently::domain::DocumentId;
///
/// let id = DocumentId::new();
/// let parsed = DocumentId::parse(&id.to_string()).unwrap();
/// assert_eq!(parsed, id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(ObjectId);

impl DocumentId {
    /// Generates a fresh, time-ordered identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    /// Converts the external string form into an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidIdentifier`] unless `raw` is exactly 24
    /// hex characters.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        ObjectId::parse_str(raw)
            .map(Self)
            .map_err(|_| DomainError::InvalidIdentifier(raw.to_string()))
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl Serialize for DocumentId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Weak reference to a document of type `T`.
///
/// Nothing guarantees the target exists; resolve it through the target's
/// collection when that matters.
pub struct Ref<T> {
    id: DocumentId,
    _target: PhantomData<fn() -> T>,
}

impl<T> Ref<T> {
    #[must_use]
    pub const fn new(id: DocumentId) -> Self {
        Self {
            id,
            _target: PhantomData,
        }
    }

    /// # Errors
    ///
    /// Returns [`DomainError::InvalidIdentifier`] for a malformed id.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        DocumentId::parse(raw).map(Self::new)
    }

    #[must_use]
    pub const fn id(&self) -> DocumentId {
        self.id
    }
}

impl<T> Clone for Ref<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Ref<T> {}

impl<T> PartialEq for Ref<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Ref<T> {}

impl<T> fmt::Debug for Ref<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Ref").field(&self.id).finish()
    }
}

impl<T> fmt::Display for Ref<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.id.fmt(f)
    }
}

impl<T> From<DocumentId> for Ref<T> {
    fn from(id: DocumentId) -> Self {
        Self::new(id)
    }
}

impl<T> Serialize for Ref<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.id.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Ref<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        DocumentId::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Target;

    #[test]
    fn document_id_round_trip() {
        let id = DocumentId::new();
        let external = id.to_string();
        assert_eq!(external.len(), 24);
        assert_eq!(DocumentId::parse(&external).unwrap(), id);
    }

    #[test]
    fn document_id_rejects_malformed_input() {
        assert!(DocumentId::parse("").is_err());
        assert!(DocumentId::parse("not-an-id").is_err());
        assert!(DocumentId::parse("65a1f0c2e4b0a1b2c3d4e5f").is_err());
        assert!(DocumentId::parse("65a1f0c2e4b0a1b2c3d4e5f67").is_err());
        assert!(DocumentId::parse("zza1f0c2e4b0a1b2c3d4e5f6").is_err());

        let err = DocumentId::parse("abc").unwrap_err();
        assert!(matches!(err, DomainError::InvalidIdentifier(raw) if raw == "abc"));
    }

    #[test]
    fn document_id_serializes_as_hex_string() {
        let id = DocumentId::parse("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"65a1f0c2e4b0a1b2c3d4e5f6\"");

        let back: DocumentId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<DocumentId>("\"nope\"").is_err());
    }

    #[test]
    fn refs_compare_by_target_id() {
        let id = DocumentId::new();
        let a: Ref<Target> = Ref::new(id);
        let b: Ref<Target> = Ref::parse(&id.to_string()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), id.to_string());
    }
}
