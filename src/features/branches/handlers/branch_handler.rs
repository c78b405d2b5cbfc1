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
use crate::features::branches::dtos::{BranchResponseDto, CreateBranchDto};
use crate::features::branches::services::BranchService;
use crate::shared::types::ApiResponse;

#[utoipa::path(
    get,
    path = "/api/branches",
    responses(
        (status = 200, description = "All branches", body = ApiResponse<Vec<BranchResponseDto>>),
    ),
    tag = "branches"
)]
pub async fn list_branches(
    State(service): State<Arc<BranchService>>,
) -> Result<Json<ApiResponse<Vec<BranchResponseDto>>>> {
    let branches = service.list().await?;
    Ok(Json(ApiResponse::success(Some(branches), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/admin/branches",
    request_body = CreateBranchDto,
    responses(
        (status = 201, description = "Branch created", body = ApiResponse<BranchResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin access required"),
        (status = 409, description = "Branch already exists")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_branch(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<BranchService>>,
    AppJson(dto): AppJson<CreateBranchDto>,
) -> Result<(StatusCode, Json<ApiResponse<BranchResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let branch = service.create(&dto.name).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(branch),
            Some("Branch created successfully".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/admin/branches/{id}",
    params(
        ("id" = Uuid, Path, description = "Branch ID")
    ),
    responses(
        (status = 200, description = "Branch deleted"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Branch not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_branch(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<BranchService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Branch deleted successfully".to_string()),
        None,
    )))
}
