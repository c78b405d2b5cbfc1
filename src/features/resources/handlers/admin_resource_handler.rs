use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::resources::dtos::{
    parse_resource_type, parse_semester, AdminResourceListQuery, NewUpload, ResourceResponseDto,
    UpdateResourceDto, UploadResourceForm,
};
use crate::features::resources::services::ResourceService;
use crate::shared::types::ApiResponse;

/// Paged management list
#[utoipa::path(
    get,
    path = "/api/admin/resources",
    params(AdminResourceListQuery),
    responses(
        (status = 200, description = "One page of resources", body = ApiResponse<Vec<ResourceResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_admin_resources(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ResourceService>>,
    Query(query): Query<AdminResourceListQuery>,
) -> Result<Json<ApiResponse<Vec<ResourceResponseDto>>>> {
    let (page, filter) = query.into_parts()?;
    let (resources, meta) = service.admin_page(&filter, page).await?;
    Ok(Json(ApiResponse::success(Some(resources), None, Some(meta))))
}

/// Upload a resource
///
/// Accepts multipart/form-data with `file`, `title`, `branch`, `semester`,
/// `subject_code`, `type` and an optional `folder_id`.
#[utoipa::path(
    post,
    path = "/api/admin/resources",
    request_body(
        content = UploadResourceForm,
        content_type = "multipart/form-data",
    ),
    responses(
        (status = 201, description = "Resource uploaded", body = ApiResponse<ResourceResponseDto>),
        (status = 400, description = "Invalid file or form field"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Folder not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_resource(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<ResourceService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ResourceResponseDto>>)> {
    let mut file: Option<(Vec<u8>, String, String)> = None;
    let mut title = None;
    let mut branch = None;
    let mut semester = None;
    let mut subject_code = None;
    let mut resource_type = None;
    let mut folder_id = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        if field_name == "file" {
            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());
            let file_name = field
                .file_name()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "unnamed".to_string());
            let data = field.bytes().await.map_err(|e| {
                AppError::BadRequest(format!("Failed to read file data: {}", e))
            })?;
            file = Some((data.to_vec(), file_name, content_type));
            continue;
        }

        let text = field.text().await.map_err(|e| {
            AppError::BadRequest(format!("Failed to read field '{}': {}", field_name, e))
        })?;

        match field_name.as_str() {
            "title" => title = Some(text),
            "branch" => branch = Some(text),
            "semester" => semester = Some(parse_semester(&text)?),
            "subject_code" => subject_code = Some(text),
            "type" => resource_type = Some(parse_resource_type(&text)?),
            "folder_id" if !text.trim().is_empty() => {
                folder_id = Some(Uuid::parse_str(text.trim()).map_err(|_| {
                    AppError::BadRequest(format!("Invalid folder_id: {}", text))
                })?)
            }
            _ => debug!("Ignoring field: {}", field_name),
        }
    }

    let (data, file_name, content_type) =
        file.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;
    let missing = |name: &str| AppError::Validation(format!("{} is required", name));

    let upload = NewUpload {
        data,
        file_name,
        content_type,
        title: title.ok_or_else(|| missing("title"))?,
        branch: branch.ok_or_else(|| missing("branch"))?,
        semester: semester.ok_or_else(|| missing("semester"))?,
        subject_code: subject_code.ok_or_else(|| missing("subject_code"))?,
        resource_type: resource_type.ok_or_else(|| missing("type"))?,
        folder_id,
    };

    let resource = service.upload(upload, &admin).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(resource),
            Some("Resource uploaded successfully".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/admin/resources/{id}",
    params(
        ("id" = Uuid, Path, description = "Resource ID")
    ),
    request_body = UpdateResourceDto,
    responses(
        (status = 200, description = "Resource updated", body = ApiResponse<ResourceResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Resource not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_resource(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ResourceService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateResourceDto>,
) -> Result<Json<ApiResponse<ResourceResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let resource = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(resource),
        Some("Resource updated successfully".to_string()),
        None,
    )))
}

/// Delete a resource and its stored file
#[utoipa::path(
    delete,
    path = "/api/admin/resources/{id}",
    params(
        ("id" = Uuid, Path, description = "Resource ID")
    ),
    responses(
        (status = 200, description = "Resource deleted"),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Resource not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_resource(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ResourceService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Resource deleted successfully".to_string()),
        None,
    )))
}
