use std::sync::Arc;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::features::folders::handlers;
use crate::features::folders::services::FolderService;

/// Read-only tree routes (session required)
pub fn routes(service: Arc<FolderService>) -> Router {
    Router::new()
        .route("/api/folders", get(handlers::list_folders))
        .route("/api/folders/tree", get(handlers::get_folder_tree))
        .route("/api/folders/tree/rows", get(handlers::get_folder_rows))
        .with_state(service)
}

/// Folder mutations (admin only)
pub fn admin_routes(service: Arc<FolderService>) -> Router {
    Router::new()
        .route("/api/admin/folders", post(handlers::create_folder))
        .route(
            "/api/admin/folders/{id}",
            patch(handlers::rename_folder).delete(handlers::delete_folder),
        )
        .route("/api/admin/folders/{id}/parent", put(handlers::move_folder))
        .route(
            "/api/admin/resources/{id}/folder",
            put(handlers::move_resource),
        )
        .with_state(service)
}
