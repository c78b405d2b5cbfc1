use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::notifications::dtos::{CreateNotificationDto, NotificationResponseDto};
use crate::features::notifications::services::NotificationService;
use crate::shared::types::ApiResponse;

#[utoipa::path(
    get,
    path = "/api/notifications",
    responses(
        (status = 200, description = "All notifications, newest first", body = ApiResponse<Vec<NotificationResponseDto>>),
    ),
    tag = "notifications"
)]
pub async fn list_notifications(
    State(service): State<Arc<NotificationService>>,
) -> Result<Json<ApiResponse<Vec<NotificationResponseDto>>>> {
    let notifications = service.list().await?;
    Ok(Json(ApiResponse::success(Some(notifications), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/admin/notifications",
    request_body = CreateNotificationDto,
    responses(
        (status = 201, description = "Notification posted", body = ApiResponse<NotificationResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_notification(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<NotificationService>>,
    AppJson(dto): AppJson<CreateNotificationDto>,
) -> Result<(StatusCode, Json<ApiResponse<NotificationResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let notification = service.create(dto, &admin).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(notification),
            Some("Notification posted".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/admin/notifications/{id}",
    params(
        ("id" = Uuid, Path, description = "Notification ID")
    ),
    responses(
        (status = 200, description = "Notification deleted"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Notification not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_notification(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<NotificationService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Notification deleted".to_string()),
        None,
    )))
}
