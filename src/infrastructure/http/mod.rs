//! HTTP REST API routes

mod export_routes;
mod import_routes;
mod object_routes;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

pub use export_routes::*;
pub use import_routes::*;
pub use object_routes::*;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Object routes
        .route("/api/objects", post(object_routes::create_object))
        .route("/api/objects/{id}", get(object_routes::get_object))
        .route(
            "/api/objects/{id}/children",
            get(object_routes::list_children),
        )
        // Import routes
        .route("/api/objects/{id}/import", post(import_routes::import_into))
        .route(
            "/api/objects/{id}/importable",
            get(import_routes::check_importable),
        )
        // Export routes
        .route("/api/objects/{id}/export", get(export_routes::export_object))
        .route(
            "/api/objects/{id}/export/raw",
            get(export_routes::export_object_raw),
        )
}
