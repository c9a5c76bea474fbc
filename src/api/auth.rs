use axum::{
    Json,
    extract::{FromRequestParts, State},
    http::{StatusCode, header, request::Parts},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::{validate_email, validate_required};
use super::{ApiError, ApiResponse, AppState};
use crate::models::DEFAULT_ROLE;
use crate::services::{ProfileUpdate, Registration, UserInfo};

// ============================================================================
// Request Types
// ============================================================================

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ProfileUpdateRequest {
    #[serde(alias = "currentPassword")]
    pub current_password: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "newPassword")]
    pub new_password: Option<String>,
}

// ============================================================================
// Extractor
// ============================================================================

/// The caller, identified by HTTP Basic credentials on every request.
pub struct CurrentUser(pub UserInfo);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Missing credentials"))?;

        let (username, password) = decode_basic(header_value)
            .ok_or_else(|| ApiError::unauthorized("Authorization must be Basic"))?;

        let user = state
            .shared
            .auth_service
            .login(&username, &password)
            .await?;

        tracing::Span::current().record("user_id", tracing::field::display(&user.id));
        Ok(Self(user))
    }
}

/// Splits `Basic <base64(user:pass)>` into its two halves.
fn decode_basic(value: &str) -> Option<(String, String)> {
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserInfo>>), ApiError> {
    let username = validate_required("username", &payload.username)?;
    let email = validate_email(&payload.email)?;
    if payload.password.is_empty() {
        return Err(ApiError::validation("password cannot be empty"));
    }

    let role = payload
        .role
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or(DEFAULT_ROLE);

    let user = state
        .shared
        .auth_service
        .register(Registration {
            username: username.to_string(),
            email: email.to_string(),
            password: payload.password,
            role: role.to_string(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(user))))
}

/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    if payload.username.is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let user = state
        .shared
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(ApiResponse::success(user)))
}

/// GET /auth/me
pub async fn me(CurrentUser(user): CurrentUser) -> Json<ApiResponse<UserInfo>> {
    Json(ApiResponse::success(user))
}

/// PUT /auth/profile
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<ProfileUpdateRequest>,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    if payload.current_password.is_empty() {
        return Err(ApiError::validation("current_password is required"));
    }

    let username = payload
        .username
        .as_deref()
        .filter(|u| !u.trim().is_empty())
        .map(|u| validate_required("username", u).map(str::to_string))
        .transpose()?;

    let email = payload
        .email
        .as_deref()
        .filter(|e| !e.trim().is_empty())
        .map(|e| validate_email(e).map(str::to_string))
        .transpose()?;

    let new_password = payload.new_password.filter(|p| !p.is_empty());

    let updated = state
        .shared
        .auth_service
        .update_profile(
            &user,
            ProfileUpdate {
                current_password: payload.current_password,
                username,
                email,
                new_password,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(updated)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_basic_credentials() {
        let header = format!("Basic {}", STANDARD.encode("ana:s3cret:with-colon"));
        let (user, pass) = decode_basic(&header).unwrap();
        assert_eq!(user, "ana");
        assert_eq!(pass, "s3cret:with-colon");
    }

    #[test]
    fn rejects_other_schemes() {
        assert!(decode_basic("Bearer abc").is_none());
        assert!(decode_basic("Basic !!!").is_none());
        assert!(decode_basic("Basic").is_none());
    }
}
