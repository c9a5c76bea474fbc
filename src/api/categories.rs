use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::{validate_id, validate_required};
use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::db::Stored;
use crate::models::EventCategory;
use crate::services::CategoryChanges;

#[derive(Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateCategoryRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// GET /categories
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Stored<EventCategory>>>>, ApiError> {
    let categories = state.shared.category_service.list().await?;
    Ok(Json(ApiResponse::success(categories)))
}

/// GET /categories/{id}
pub async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Stored<EventCategory>>>, ApiError> {
    let category = state.shared.category_service.get(validate_id(&id)?).await?;
    Ok(Json(ApiResponse::success(category)))
}

/// POST /categories
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<Json<ApiResponse<Stored<EventCategory>>>, ApiError> {
    let category = EventCategory {
        name: validate_required("name", &payload.name)?.to_string(),
        description: payload.description,
        icon: payload.icon,
        color: payload.color,
    };

    let created = state.shared.category_service.create(category).await?;
    Ok(Json(ApiResponse::success(created)))
}

/// PUT /categories/{id}
pub async fn update_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> Result<Json<ApiResponse<Stored<EventCategory>>>, ApiError> {
    let id = validate_id(&id)?;
    let name = payload
        .name
        .as_deref()
        .map(|n| validate_required("name", n).map(str::to_string))
        .transpose()?;

    let changes = CategoryChanges {
        name,
        description: payload.description,
        icon: payload.icon,
        color: payload.color,
    };

    let updated = state.shared.category_service.update(id, changes).await?;
    Ok(Json(ApiResponse::success(updated)))
}

/// DELETE /categories/{id}
pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = validate_id(&id)?;
    state.shared.category_service.delete(id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(format!(
        "Category {id} deleted"
    )))))
}
