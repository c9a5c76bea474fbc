use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Event;
use crate::db::Document;
use crate::domain::Ref;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventImage {
    pub event_id: Ref<Event>,

    pub url: String,

    pub upload_date: DateTime<Utc>,

    /// Several images of one event may carry the flag at once.
    #[serde(default = "default_is_header")]
    pub is_header: bool,

    #[serde(default)]
    pub alt_text: Option<String>,
}

impl Document for EventImage {
    const COLLECTION: &'static str = "event_images";
}

pub(crate) const fn default_is_header() -> bool {
    true
}
