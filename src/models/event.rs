use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EventCategory, User};
use crate::db::Document;
use crate::domain::{Ref, timestamp};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(with = "timestamp")]
    pub start_time: NaiveDateTime,

    #[serde(with = "timestamp")]
    pub end_time: NaiveDateTime,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub category_id: Option<Ref<EventCategory>>,

    #[serde(default)]
    pub created_by: Option<Ref<User>>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Document for Event {
    const COLLECTION: &'static str = "events";
}

impl Event {
    /// An event may not end before it starts; zero-length events are fine.
    #[must_use]
    pub fn has_valid_window(&self) -> bool {
        self.end_time >= self.start_time
    }
}
