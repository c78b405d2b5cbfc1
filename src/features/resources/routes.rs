use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch},
    Router,
};

use crate::features::resources::dtos::MAX_FILE_SIZE;
use crate::features::resources::handlers;
use crate::features::resources::services::ResourceService;

/// Catalog routes (session required)
pub fn routes(service: Arc<ResourceService>) -> Router {
    Router::new()
        .route("/api/resources", get(handlers::list_resources))
        .route("/api/resources/{id}", get(handlers::get_resource))
        .with_state(service)
}

/// Resource management routes (admin only)
pub fn admin_routes(service: Arc<ResourceService>) -> Router {
    Router::new()
        .route(
            "/api/admin/resources",
            get(handlers::list_admin_resources)
                .post(handlers::upload_resource)
                // multipart framing on top of the largest allowed file
                .layer(DefaultBodyLimit::max(MAX_FILE_SIZE + 1024 * 1024)),
        )
        .route(
            "/api/admin/resources/{id}",
            patch(handlers::update_resource).delete(handlers::delete_resource),
        )
        .with_state(service)
}
