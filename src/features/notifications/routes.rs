use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::features::notifications::handlers;
use crate::features::notifications::services::NotificationService;

/// Public notification feed
pub fn routes(service: Arc<NotificationService>) -> Router {
    Router::new()
        .route("/api/notifications", get(handlers::list_notifications))
        .with_state(service)
}

pub fn admin_routes(service: Arc<NotificationService>) -> Router {
    Router::new()
        .route("/api/admin/notifications", post(handlers::create_notification))
        .route(
            "/api/admin/notifications/{id}",
            delete(handlers::delete_notification),
        )
        .with_state(service)
}
