use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::auth::CurrentUser;
use super::validation::{
    validate_id, validate_optional_ref, validate_required, validate_timestamp,
};
use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::db::Stored;
use crate::models::Event;
use crate::services::{EventChanges, NewEvent};

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct UpdateEventRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
}

impl TryFrom<CreateEventRequest> for NewEvent {
    type Error = ApiError;

    fn try_from(req: CreateEventRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: validate_required("name", &req.name)?.to_string(),
            description: req.description,
            start_time: validate_timestamp("start_time", &req.start_time)?,
            end_time: validate_timestamp("end_time", &req.end_time)?,
            location: req.location,
            category_id: validate_optional_ref(req.category_id.as_deref())?,
            created_by: validate_optional_ref(req.created_by.as_deref())?,
        })
    }
}

impl TryFrom<UpdateEventRequest> for EventChanges {
    type Error = ApiError;

    fn try_from(req: UpdateEventRequest) -> Result<Self, Self::Error> {
        let name = req
            .name
            .as_deref()
            .map(|n| validate_required("name", n).map(str::to_string))
            .transpose()?;

        Ok(Self {
            name,
            description: req.description,
            start_time: req
                .start_time
                .as_deref()
                .map(|t| validate_timestamp("start_time", t))
                .transpose()?,
            end_time: req
                .end_time
                .as_deref()
                .map(|t| validate_timestamp("end_time", t))
                .transpose()?,
            location: req.location,
            category_id: validate_optional_ref(req.category_id.as_deref())?,
            created_by: validate_optional_ref(req.created_by.as_deref())?,
        })
    }
}

/// POST /events
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<Json<ApiResponse<Stored<Event>>>, ApiError> {
    let event = state
        .shared
        .event_service
        .create(payload.try_into()?)
        .await?;
    Ok(Json(ApiResponse::success(event)))
}

/// GET /events
pub async fn list_events(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Stored<Event>>>>, ApiError> {
    let events = state.shared.event_service.list().await?;
    Ok(Json(ApiResponse::success(events)))
}

/// GET /events/{id}
pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Stored<Event>>>, ApiError> {
    let event = state.shared.event_service.get(validate_id(&id)?).await?;
    Ok(Json(ApiResponse::success(event)))
}

/// PUT /events/{id}
pub async fn update_event(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<Json<ApiResponse<Stored<Event>>>, ApiError> {
    let id = validate_id(&id)?;
    let event = state
        .shared
        .event_service
        .update(&user, id, payload.try_into()?)
        .await?;
    Ok(Json(ApiResponse::success(event)))
}

/// DELETE /events/{id}
pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = validate_id(&id)?;
    state.shared.event_service.delete(&user, id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(format!(
        "Event {id} deleted"
    )))))
}
