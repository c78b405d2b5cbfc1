use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::resources::dtos::{ResourceListQuery, ResourceResponseDto};
use crate::features::resources::services::ResourceService;
use crate::shared::types::{ApiResponse, Meta};

/// Browse the catalog
///
/// All given filters must match. `q` searches title and subject code.
#[utoipa::path(
    get,
    path = "/api/resources",
    params(ResourceListQuery),
    responses(
        (status = 200, description = "Matching resources, newest first", body = ApiResponse<Vec<ResourceResponseDto>>),
        (status = 400, description = "Invalid filter value"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "resources",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_resources(
    State(service): State<Arc<ResourceService>>,
    Query(query): Query<ResourceListQuery>,
) -> Result<Json<ApiResponse<Vec<ResourceResponseDto>>>> {
    let filter = query.into_filter()?;
    let resources = service.catalog(&filter).await?;
    let total = resources.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(resources),
        None,
        Some(Meta::total(total)),
    )))
}

#[utoipa::path(
    get,
    path = "/api/resources/{id}",
    params(
        ("id" = Uuid, Path, description = "Resource ID")
    ),
    responses(
        (status = 200, description = "Resource found", body = ApiResponse<ResourceResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Resource not found")
    ),
    tag = "resources",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_resource(
    State(service): State<Arc<ResourceService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ResourceResponseDto>>> {
    let resource = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(resource), None, None)))
}
