//! Import API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::application::dto::ImportSummary;
use crate::application::services::{ImportError, ImportService};
use crate::domain::value_objects::ObjectId;
use crate::infrastructure::state::AppState;

#[derive(Debug, Serialize)]
pub struct ImportableResponse {
    pub importable: bool,
}

fn import_error_response(err: ImportError) -> (StatusCode, String) {
    let status = match &err {
        ImportError::Syntax(_) | ImportError::Format(_) => StatusCode::BAD_REQUEST,
        ImportError::ParentNotFound(_) => StatusCode::NOT_FOUND,
        ImportError::NotComposable(_) => StatusCode::CONFLICT,
        ImportError::Store(_) => {
            tracing::error!("Import aborted, destination may be partially populated: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, err.user_message())
}

/// Import an export file (raw JSON body) under an object
pub async fn import_into(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: String,
) -> Result<(StatusCode, Json<ImportSummary>), (StatusCode, String)> {
    let summary = state
        .import_service
        .import_json(&ObjectId::from(id), &body)
        .await
        .map_err(import_error_response)?;

    Ok((StatusCode::CREATED, Json(summary)))
}

/// Whether an object can receive an import
pub async fn check_importable(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ImportableResponse>, (StatusCode, String)> {
    let importable = state
        .import_service
        .applies_to(&ObjectId::from(id))
        .await
        .map_err(import_error_response)?;

    Ok(Json(ImportableResponse { importable }))
}
