use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::{validate_id, validate_ref, validate_required};
use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::db::Stored;
use crate::models::{Event, EventImage};
use crate::services::{ImageChanges, NewImage};

#[derive(Deserialize)]
pub struct UploadImageRequest {
    pub event_id: String,
    pub url: String,
    #[serde(default = "crate::models::image::default_is_header")]
    pub is_header: bool,
    #[serde(default)]
    pub alt_text: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateImageRequest {
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub is_header: Option<bool>,
    #[serde(default)]
    pub alt_text: Option<String>,
}

/// POST /images
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UploadImageRequest>,
) -> Result<Json<ApiResponse<Stored<EventImage>>>, ApiError> {
    let image = NewImage {
        event_id: validate_ref(&payload.event_id)?,
        url: validate_required("url", &payload.url)?.to_string(),
        is_header: payload.is_header,
        alt_text: payload.alt_text,
    };

    let stored = state.shared.image_service.upload(image).await?;
    Ok(Json(ApiResponse::success(stored)))
}

/// GET /images/event/{event_id}
pub async fn list_event_images(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Stored<EventImage>>>>, ApiError> {
    let event_id = validate_ref::<Event>(&event_id)?;
    let images = state.shared.image_service.list_for_event(event_id).await?;
    Ok(Json(ApiResponse::success(images)))
}

/// GET /images/event/{event_id}/header
///
/// `data` is `null` when the event has no header image.
pub async fn get_header_image(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<Json<ApiResponse<Option<Stored<EventImage>>>>, ApiError> {
    let event_id = validate_ref::<Event>(&event_id)?;
    let header = state.shared.image_service.header_for_event(event_id).await?;
    Ok(Json(ApiResponse::success(header)))
}

/// PUT /images/{id}
pub async fn update_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateImageRequest>,
) -> Result<Json<ApiResponse<Stored<EventImage>>>, ApiError> {
    let id = validate_id(&id)?;
    let url = payload
        .url
        .as_deref()
        .map(|u| validate_required("url", u).map(str::to_string))
        .transpose()?;

    let changes = ImageChanges {
        event_id: payload.event_id.as_deref().map(validate_ref).transpose()?,
        url,
        is_header: payload.is_header,
        alt_text: payload.alt_text,
    };

    let updated = state.shared.image_service.update(id, changes).await?;
    Ok(Json(ApiResponse::success(updated)))
}

/// DELETE /images/{id}
pub async fn delete_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = validate_id(&id)?;
    state.shared.image_service.delete(id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(format!(
        "Image {id} deleted"
    )))))
}
