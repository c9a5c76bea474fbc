use chrono::NaiveDateTime;

use super::ApiError;
use crate::domain::{DocumentId, Ref, timestamp};
use crate::models::Theme;

pub fn validate_id(raw: &str) -> Result<DocumentId, ApiError> {
    Ok(DocumentId::parse(raw.trim())?)
}

pub fn validate_ref<T>(raw: &str) -> Result<Ref<T>, ApiError> {
    Ok(Ref::parse(raw.trim())?)
}

pub fn validate_optional_ref<T>(raw: Option<&str>) -> Result<Option<Ref<T>>, ApiError> {
    raw.filter(|r| !r.trim().is_empty())
        .map(validate_ref)
        .transpose()
}

pub fn validate_required<'a>(field: &str, value: &'a str) -> Result<&'a str, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation(format!("{} cannot be empty", field)));
    }
    Ok(trimmed)
}

pub fn validate_email(email: &str) -> Result<&str, ApiError> {
    let email = validate_required("email", email)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(ApiError::validation(format!("Invalid email address: {}", email))),
    }
}

pub fn validate_timestamp(field: &str, raw: &str) -> Result<NaiveDateTime, ApiError> {
    timestamp::parse(raw).ok_or_else(|| {
        ApiError::validation(format!(
            "Invalid {}: '{}'. Expected YYYY-MM-DDTHH:MM[:SS]",
            field, raw
        ))
    })
}

pub fn validate_theme(raw: &str) -> Result<Theme, ApiError> {
    raw.parse::<Theme>().map_err(ApiError::validation)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Anything;

    #[test]
    fn test_validate_id() {
        assert!(validate_id("65a1f0c2e4b0a1b2c3d4e5f6").is_ok());
        assert!(validate_id(" 65a1f0c2e4b0a1b2c3d4e5f6 ").is_ok());
        assert!(validate_id("123").is_err());
        assert!(validate_id("").is_err());
    }

    #[test]
    fn test_validate_optional_ref() {
        assert!(validate_optional_ref::<Anything>(None).unwrap().is_none());
        assert!(validate_optional_ref::<Anything>(Some("")).unwrap().is_none());
        assert!(validate_optional_ref::<Anything>(Some("65a1f0c2e4b0a1b2c3d4e5f6")).unwrap().is_some());
        assert!(validate_optional_ref::<Anything>(Some("music")).is_err());
    }

    #[test]
    fn test_validate_required() {
        assert_eq!(validate_required("name", "  Launch ").unwrap(), "Launch");
        assert!(validate_required("name", "   ").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("ana").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ana@localhost").is_err());
    }

    #[test]
    fn test_validate_timestamp() {
        assert!(validate_timestamp("start_time", "2025-01-01T10:00").is_ok());
        assert!(validate_timestamp("start_time", "soon").is_err());
    }

    #[test]
    fn test_validate_theme() {
        assert_eq!(validate_theme("dark").unwrap(), Theme::Dark);
        assert!(validate_theme("neon").is_err());
    }
}
