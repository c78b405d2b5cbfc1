use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::features::branches::handlers;
use crate::features::branches::services::BranchService;

/// Public branch list
pub fn routes(service: Arc<BranchService>) -> Router {
    Router::new()
        .route("/api/branches", get(handlers::list_branches))
        .with_state(service)
}

pub fn admin_routes(service: Arc<BranchService>) -> Router {
    Router::new()
        .route("/api/admin/branches", post(handlers::create_branch))
        .route("/api/admin/branches/{id}", delete(handlers::delete_branch))
        .with_state(service)
}
