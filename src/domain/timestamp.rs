//! Lenient timestamp parsing for event times.
//!
//! Clients send wall-clock times with or without seconds and sometimes with
//! an offset (`2025-01-01T10:00`, `2025-01-01T10:00:00`,
//! `2025-01-01T10:00:00Z`). Offsets are normalized to UTC; values are always
//! written back as `YYYY-MM-DDTHH:MM:SS`.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer};

const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[must_use]
pub fn parse(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

#[must_use]
pub fn format(value: &NaiveDateTime) -> String {
    value.format(OUTPUT_FORMAT).to_string()
}

pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
}

pub mod option {
    use super::{NaiveDateTime, parse};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => super::serialize(value, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| {
                parse(&raw)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_minutes_precision() {
        let parsed = parse("2025-01-01T10:00").unwrap();
        assert_eq!(format(&parsed), "2025-01-01T10:00:00");
    }

    #[test]
    fn accepts_seconds_and_fractions() {
        assert!(parse("2025-01-01T10:00:30").is_some());
        assert!(parse("2025-01-01T10:00:30.250").is_some());
        assert!(parse("2025-01-01 10:00").is_some());
    }

    #[test]
    fn offsets_are_normalized_to_utc() {
        let parsed = parse("2025-01-01T10:00:00-05:00").unwrap();
        assert_eq!(format(&parsed), "2025-01-01T15:00:00");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse("tomorrow").is_none());
        assert!(parse("2025-13-01T10:00").is_none());
        assert!(parse("").is_none());
    }
}
