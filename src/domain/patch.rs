//! Field-level partial updates.
//!
//! A [`Patch`] is the set of top-level fields an update writes. Fields that
//! are absent or `null` in the payload never make it into the patch, so an
//! update can replace a stored value but never clear it. Nested objects are
//! carried as a single value and replace the stored object wholesale.

use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    fields: Map<String, Value>,
}

impl Patch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a patch from a payload whose fields map one-to-one onto the
    /// stored document.
    ///
    /// # Errors
    ///
    /// Fails if the payload does not serialize to a JSON object.
    pub fn from_payload<P: Serialize>(payload: &P) -> Result<Self, serde_json::Error> {
        match serde_json::to_value(payload)? {
            Value::Object(map) => Ok(map
                .into_iter()
                .fold(Self::new(), |patch, (field, value)| patch.with_value(&field, value))),
            other => Err(serde::ser::Error::custom(format!(
                "update payload must be an object, got {other}"
            ))),
        }
    }

    /// Adds `field` unless `value` serializes to `null`.
    ///
    /// # Errors
    ///
    /// Fails if `value` cannot be serialized.
    pub fn with<V: Serialize>(self, field: &str, value: V) -> Result<Self, serde_json::Error> {
        Ok(self.with_value(field, serde_json::to_value(value)?))
    }

    #[must_use]
    pub fn with_value(mut self, field: &str, value: Value) -> Self {
        if !value.is_null() {
            self.fields.insert(field.to_string(), value);
        }
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Changes {
        name: Option<String>,
        location: Option<String>,
        prefs: Option<Value>,
    }

    #[test]
    fn absent_and_null_fields_are_dropped() {
        let patch = Patch::from_payload(&Changes {
            name: Some("Launch".into()),
            location: None,
            prefs: Some(Value::Null),
        })
        .unwrap();

        assert_eq!(patch.len(), 1);
        assert_eq!(patch.get("name"), Some(&json!("Launch")));
        assert!(patch.get("location").is_none());
        assert!(patch.get("prefs").is_none());
    }

    #[test]
    fn with_skips_none_and_carries_nested_values_whole() {
        let patch = Patch::new()
            .with("name", "New")
            .unwrap()
            .with("prefs", json!({"sms": true}))
            .unwrap()
            .with("location", Option::<String>::None)
            .unwrap();

        assert_eq!(patch.len(), 2);
        assert!(patch.get("location").is_none());
        assert_eq!(patch.get("prefs"), Some(&json!({"sms": true})));
    }

    #[test]
    fn non_object_payload_is_rejected() {
        assert!(Patch::from_payload(&vec![1, 2, 3]).is_err());
    }
}
