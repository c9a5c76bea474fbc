use serde::{Deserialize, Serialize};

use crate::db::Document;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventCategory {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub icon: Option<String>,

    #[serde(default)]
    pub color: Option<String>,
}

impl Document for EventCategory {
    const COLLECTION: &'static str = "event_categories";
}

impl EventCategory {
    fn preset(name: &str, description: &str, icon: &str, color: &str) -> Self {
        Self {
            name: name.to_string(),
            description: Some(description.to_string()),
            icon: Some(icon.to_string()),
            color: Some(color.to_string()),
        }
    }
}

/// The taxonomy a fresh installation starts with.
#[must_use]
pub fn default_categories() -> Vec<EventCategory> {
    vec![
        EventCategory::preset("Conciertos", "Eventos musicales en vivo", "music", "#FF5733"),
        EventCategory::preset(
            "Conferencias",
            "Charlas y presentaciones educativas",
            "microphone",
            "#3498DB",
        ),
        EventCategory::preset(
            "Deportes",
            "Eventos deportivos y competiciones",
            "football",
            "#2ECC71",
        ),
        EventCategory::preset(
            "Arte y cultura",
            "Exposiciones, teatro y eventos culturales",
            "palette",
            "#9B59B6",
        ),
        EventCategory::preset(
            "Gastronomía",
            "Ferias de comida y experiencias culinarias",
            "utensils",
            "#F1C40F",
        ),
        EventCategory::preset(
            "Tecnología",
            "Hackathons, meetups y eventos de tecnología",
            "laptop",
            "#1ABC9C",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn six_distinct_defaults() {
        let defaults = default_categories();
        assert_eq!(defaults.len(), 6);

        let names: HashSet<_> = defaults.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names.len(), 6);
        assert!(defaults.iter().all(|c| c.color.as_deref().is_some_and(|c| c.starts_with('#'))));
    }
}
