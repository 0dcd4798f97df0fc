//! Object API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::application::dto::{CreateObjectRequestDto, ObjectResponseDto};
use crate::application::ports::outbound::StoreError;
use crate::application::services::{CreateObjectRequest, ObjectService};
use crate::domain::value_objects::ObjectId;
use crate::infrastructure::state::AppState;

/// Create a new object
pub async fn create_object(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateObjectRequestDto>,
) -> Result<(StatusCode, Json<ObjectResponseDto>), (StatusCode, String)> {
    let object = state
        .object_service
        .create_object(CreateObjectRequest {
            parent_id: req.parent_id.map(ObjectId::from),
            model: req.model,
        })
        .await
        .map_err(|e| {
            let status = if e.downcast_ref::<StoreError>().is_some() {
                StatusCode::INTERNAL_SERVER_ERROR
            } else {
                StatusCode::BAD_REQUEST
            };
            (status, e.to_string())
        })?;

    Ok((StatusCode::CREATED, Json(ObjectResponseDto::from(object))))
}

/// Get an object by ID
pub async fn get_object(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ObjectResponseDto>, (StatusCode, String)> {
    let object = state
        .object_service
        .get_object(&ObjectId::from(id))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Object not found".to_string()))?;

    Ok(Json(ObjectResponseDto::from(object)))
}

/// List the composition of an object
pub async fn list_children(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ObjectResponseDto>>, (StatusCode, String)> {
    let children = state
        .object_service
        .list_children(&ObjectId::from(id))
        .await
        .map_err(|e| match e.downcast_ref::<StoreError>() {
            Some(StoreError::NotFound(_)) => (StatusCode::NOT_FOUND, e.to_string()),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        })?;

    Ok(Json(children.into_iter().map(ObjectResponseDto::from).collect()))
}
