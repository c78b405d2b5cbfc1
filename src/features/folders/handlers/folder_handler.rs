use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::folders::dtos::{
    CreateFolderDto, DeleteFolderQuery, FolderDeletedDto, FolderNodeDto, FolderResponseDto,
    FolderRowDto, FolderRowsQuery, MoveFolderDto, MoveResourceDto, RenameFolderDto,
};
use crate::features::folders::services::FolderService;
use crate::features::resources::dtos::ResourceResponseDto;
use crate::shared::types::{ApiResponse, Meta};

#[utoipa::path(
    get,
    path = "/api/folders",
    responses(
        (status = 200, description = "All folders", body = ApiResponse<Vec<FolderResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "folders",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_folders(
    State(service): State<Arc<FolderService>>,
) -> Result<Json<ApiResponse<Vec<FolderResponseDto>>>> {
    let folders = service.list().await?;
    let total = folders.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(folders),
        None,
        Some(Meta::total(total)),
    )))
}

/// Folder tree, roots first
#[utoipa::path(
    get,
    path = "/api/folders/tree",
    responses(
        (status = 200, description = "Nested folder tree", body = ApiResponse<Vec<FolderNodeDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "folders",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_folder_tree(
    State(service): State<Arc<FolderService>>,
) -> Result<Json<ApiResponse<Vec<FolderNodeDto>>>> {
    let tree = service.tree().await?;
    Ok(Json(ApiResponse::success(Some(tree), None, None)))
}

/// Visible rows for the caller's expansion state
#[utoipa::path(
    get,
    path = "/api/folders/tree/rows",
    params(FolderRowsQuery),
    responses(
        (status = 200, description = "Rows in display order", body = ApiResponse<Vec<FolderRowDto>>),
        (status = 400, description = "Invalid folder id"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "folders",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_folder_rows(
    State(service): State<Arc<FolderService>>,
    Query(query): Query<FolderRowsQuery>,
) -> Result<Json<ApiResponse<Vec<FolderRowDto>>>> {
    let expanded = query.expanded_ids()?;
    let rows = service.rows(&expanded).await?;
    Ok(Json(ApiResponse::success(Some(rows), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/admin/folders",
    request_body = CreateFolderDto,
    responses(
        (status = 201, description = "Folder created", body = ApiResponse<FolderResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Parent folder not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_folder(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<FolderService>>,
    AppJson(dto): AppJson<CreateFolderDto>,
) -> Result<(StatusCode, Json<ApiResponse<FolderResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let folder = service.create(dto, &admin).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(folder),
            Some("Folder created successfully".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/admin/folders/{id}",
    params(
        ("id" = Uuid, Path, description = "Folder ID")
    ),
    request_body = RenameFolderDto,
    responses(
        (status = 200, description = "Folder renamed", body = ApiResponse<FolderResponseDto>),
        (status = 400, description = "Empty name"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Folder not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn rename_folder(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<FolderService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<RenameFolderDto>,
) -> Result<Json<ApiResponse<FolderResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let folder = service.rename(id, &dto.name).await?;
    Ok(Json(ApiResponse::success(
        Some(folder),
        Some("Folder renamed successfully".to_string()),
        None,
    )))
}

/// Delete a folder
///
/// Pass the caller's current selection as `selected`; the response says
/// what it should be afterwards.
#[utoipa::path(
    delete,
    path = "/api/admin/folders/{id}",
    params(
        ("id" = Uuid, Path, description = "Folder ID"),
        DeleteFolderQuery
    ),
    responses(
        (status = 200, description = "Folder deleted", body = ApiResponse<FolderDeletedDto>),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Folder not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_folder(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<FolderService>>,
    Path(id): Path<Uuid>,
    Query(query): Query<DeleteFolderQuery>,
) -> Result<Json<ApiResponse<FolderDeletedDto>>> {
    let result = service.delete(id, query.selected).await?;
    Ok(Json(ApiResponse::success(
        Some(result),
        Some("Folder deleted successfully".to_string()),
        None,
    )))
}

#[utoipa::path(
    put,
    path = "/api/admin/folders/{id}/parent",
    params(
        ("id" = Uuid, Path, description = "Folder ID")
    ),
    request_body = MoveFolderDto,
    responses(
        (status = 200, description = "Folder moved", body = ApiResponse<FolderResponseDto>),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Folder not found"),
        (status = 409, description = "Move would create a cycle")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn move_folder(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<FolderService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<MoveFolderDto>,
) -> Result<Json<ApiResponse<FolderResponseDto>>> {
    let folder = service.move_folder(id, dto.parent_id).await?;
    Ok(Json(ApiResponse::success(
        Some(folder),
        Some("Folder moved successfully".to_string()),
        None,
    )))
}

#[utoipa::path(
    put,
    path = "/api/admin/resources/{id}/folder",
    params(
        ("id" = Uuid, Path, description = "Resource ID")
    ),
    request_body = MoveResourceDto,
    responses(
        (status = 200, description = "Resource moved", body = ApiResponse<ResourceResponseDto>),
        (status = 400, description = "Resource already in that folder"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Resource or folder not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn move_resource(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<FolderService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<MoveResourceDto>,
) -> Result<Json<ApiResponse<ResourceResponseDto>>> {
    let resource = service.move_resource(id, dto.folder_id).await?;
    Ok(Json(ApiResponse::success(
        Some(resource),
        Some("Resource moved successfully".to_string()),
        None,
    )))
}
