//! Export API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use crate::application::services::ExportError;
use crate::domain::value_objects::ObjectId;
use crate::infrastructure::state::AppState;

fn export_error_response(err: ExportError) -> (StatusCode, String) {
    match err {
        ExportError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    }
}

/// Export an object and its subtree as an export document
pub async fn export_object(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let tree = state
        .export_service
        .export_tree(&ObjectId::from(id))
        .await
        .map_err(export_error_response)?;

    let document = tree
        .to_export_value()
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(document))
}

/// Export as a pretty-printed JSON string (for download)
pub async fn export_object_raw(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<String, (StatusCode, String)> {
    state
        .export_service
        .export_to_json(&ObjectId::from(id))
        .await
        .map_err(export_error_response)
}
