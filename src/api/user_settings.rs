use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::{validate_ref, validate_required, validate_theme};
use super::{ApiError, ApiResponse, AppState};
use crate::db::Stored;
use crate::models::{NotificationPreferences, User, UserSettings};
use crate::services::SettingsChanges;

#[derive(Deserialize)]
pub struct NotificationPreferencesRequest {
    #[serde(default = "enabled")]
    pub email: bool,
    #[serde(default = "enabled")]
    pub push: bool,
    #[serde(default)]
    pub sms: bool,
}

const fn enabled() -> bool {
    true
}

#[derive(Deserialize)]
pub struct UpdateSettingsRequest {
    #[serde(default)]
    pub notification_preferences: Option<NotificationPreferencesRequest>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub preferred_categories: Option<Vec<String>>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
}

fn optional_text(field: &str, value: Option<&str>) -> Result<Option<String>, ApiError> {
    value
        .map(|v| validate_required(field, v).map(str::to_string))
        .transpose()
}

/// GET /user-settings/{user_id}
pub async fn get_settings(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<Stored<UserSettings>>>, ApiError> {
    let user_id = validate_ref::<User>(&user_id)?;
    let settings = state
        .shared
        .settings_service
        .get_or_initialize(user_id)
        .await?;
    Ok(Json(ApiResponse::success(settings)))
}

/// PUT /user-settings/{user_id}
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(payload): Json<UpdateSettingsRequest>,
) -> Result<Json<ApiResponse<Stored<UserSettings>>>, ApiError> {
    let user_id = validate_ref::<User>(&user_id)?;

    let changes = SettingsChanges {
        notification_preferences: payload.notification_preferences.map(|p| {
            NotificationPreferences {
                email: p.email,
                push: p.push,
                sms: p.sms,
            }
        }),
        theme: payload.theme.as_deref().map(validate_theme).transpose()?,
        preferred_categories: payload
            .preferred_categories
            .map(|ids| {
                ids.iter()
                    .map(|id| validate_ref(id))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?,
        language: optional_text("language", payload.language.as_deref())?,
        timezone: optional_text("timezone", payload.timezone.as_deref())?,
    };

    let settings = state
        .shared
        .settings_service
        .update(user_id, changes)
        .await?;
    Ok(Json(ApiResponse::success(settings)))
}

/// POST /user-settings/{user_id}/initialize
pub async fn initialize_settings(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<Stored<UserSettings>>>, ApiError> {
    let user_id = validate_ref::<User>(&user_id)?;
    let settings = state.shared.settings_service.initialize(user_id).await?;
    Ok(Json(ApiResponse::success(settings)))
}

/// PUT /user-settings/{user_id}/categories
pub async fn update_preferred_categories(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(category_ids): Json<Vec<String>>,
) -> Result<Json<ApiResponse<Stored<UserSettings>>>, ApiError> {
    let user_id = validate_ref::<User>(&user_id)?;
    let categories = category_ids
        .iter()
        .map(|id| validate_ref(id))
        .collect::<Result<Vec<_>, _>>()?;

    let settings = state
        .shared
        .settings_service
        .set_preferred_categories(user_id, categories)
        .await?;
    Ok(Json(ApiResponse::success(settings)))
}
