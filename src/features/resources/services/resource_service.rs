use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::folders::repositories::FolderRepository;
use crate::features::resources::dtos::{
    resolve_content_type, NewUpload, ResourceResponseDto, UpdateResourceDto, ALLOWED_MIME_TYPES,
    MAX_FILE_SIZE,
};
use crate::features::resources::models::ResourceFilter;
use crate::features::resources::repositories::{NewResource, ResourceRepository};
use crate::modules::storage::{generate_object_key, key_from_url, ObjectStore};
use crate::shared::constants::{ADMIN_PAGE_SIZE, MAX_SEMESTER, MAX_SUBJECT_CODE_LEN, MIN_SEMESTER};
use crate::shared::types::{Meta, PaginationQuery};
use crate::shared::validation::non_blank;

/// Service for the resource catalog and its admin lifecycle
pub struct ResourceService {
    resources: Arc<dyn ResourceRepository>,
    folders: Arc<dyn FolderRepository>,
    storage: Arc<dyn ObjectStore>,
}

impl ResourceService {
    pub fn new(
        resources: Arc<dyn ResourceRepository>,
        folders: Arc<dyn FolderRepository>,
        storage: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            resources,
            folders,
            storage,
        }
    }

    /// Filtered catalog, newest first
    pub async fn catalog(&self, filter: &ResourceFilter) -> Result<Vec<ResourceResponseDto>> {
        let resources = self.resources.list(filter).await?;
        debug!("Catalog query {:?} matched {} resources", filter, resources.len());
        Ok(resources.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<ResourceResponseDto> {
        self.resources
            .find(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("Resource {} not found", id)))
    }

    /// Fixed-size page for the admin management view
    pub async fn admin_page(
        &self,
        filter: &ResourceFilter,
        page: Option<i64>,
    ) -> Result<(Vec<ResourceResponseDto>, Meta)> {
        let paging = PaginationQuery::admin(page);

        let total = self.resources.count(filter).await?;
        let rows = self
            .resources
            .page(filter, paging.limit(), paging.offset())
            .await?;

        let meta = Meta::paged(total, paging.page, ADMIN_PAGE_SIZE);
        Ok((rows.into_iter().map(Into::into).collect(), meta))
    }

    /// Store the file, then insert the row.
    ///
    /// The row is only written once storage succeeded. If the insert fails
    /// the stored object is removed again, best effort.
    pub async fn upload(
        &self,
        upload: NewUpload,
        user: &AuthenticatedUser,
    ) -> Result<ResourceResponseDto> {
        if upload.data.is_empty() {
            return Err(AppError::BadRequest("File is empty".to_string()));
        }
        if upload.data.len() > MAX_FILE_SIZE {
            return Err(AppError::BadRequest(format!(
                "File too large. Maximum size is {} MB",
                MAX_FILE_SIZE / 1024 / 1024
            )));
        }
        let content_type = resolve_content_type(&upload.file_name, &upload.content_type)
            .ok_or_else(|| {
                AppError::BadRequest(format!(
                    "File type '{}' is not allowed. Allowed types: {}",
                    upload.content_type,
                    ALLOWED_MIME_TYPES.join(", ")
                ))
            })?;

        let title = required(&upload.title, "Title")?;
        let branch = required(&upload.branch, "Branch")?;
        let subject_code = subject_code(&upload.subject_code)?;
        if !(MIN_SEMESTER..=MAX_SEMESTER).contains(&upload.semester) {
            return Err(AppError::Validation(format!(
                "Semester must be between {} and {}",
                MIN_SEMESTER, MAX_SEMESTER
            )));
        }

        if let Some(folder_id) = upload.folder_id {
            if self.folders.find(folder_id).await?.is_none() {
                return Err(AppError::NotFound(format!("Folder {} not found", folder_id)));
            }
        }

        let key = generate_object_key(&upload.file_name, Utc::now().timestamp_millis());
        self.storage.upload(&key, upload.data, content_type).await?;
        let file_url = self.storage.public_url(&key);

        let inserted = self
            .resources
            .insert(NewResource {
                title,
                branch,
                semester: upload.semester,
                subject_code,
                resource_type: upload.resource_type,
                file_url,
                uploaded_by: user.id,
                folder_id: upload.folder_id,
            })
            .await;

        match inserted {
            Ok(resource) => {
                info!(
                    "Resource {} uploaded by {} as '{}'",
                    resource.id, user.id, key
                );
                Ok(resource.into())
            }
            Err(e) => {
                if let Err(cleanup) = self.storage.remove(&key).await {
                    warn!("Failed to remove orphaned upload '{}': {}", key, cleanup);
                }
                Err(e)
            }
        }
    }

    /// Edit title and subject code; nothing else is editable
    pub async fn update(&self, id: Uuid, dto: UpdateResourceDto) -> Result<ResourceResponseDto> {
        let title = required(&dto.title, "Title")?;
        let subject_code = subject_code(&dto.subject_code)?;

        let resource = self
            .resources
            .update_details(id, &title, &subject_code)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Resource {} not found", id)))?;

        info!("Resource {} updated", id);
        Ok(resource.into())
    }

    /// Remove the stored file (failure only logged), then the row.
    ///
    /// The two steps are independent: a failed row delete does not restore
    /// the file.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let resource = self
            .resources
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Resource {} not found", id)))?;

        match key_from_url(&resource.file_url, &self.storage.bucket_name()) {
            Some(key) => {
                if let Err(e) = self.storage.remove(&key).await {
                    warn!("Failed to remove stored file '{}' for resource {}: {}", key, id, e);
                }
            }
            None => warn!(
                "Resource {} has no storage key in '{}', skipping file removal",
                id, resource.file_url
            ),
        }

        if !self.resources.delete(id).await? {
            return Err(AppError::NotFound(format!("Resource {} not found", id)));
        }

        info!("Resource {} deleted", id);
        Ok(())
    }
}

fn required(value: &str, field: &str) -> Result<String> {
    non_blank(value)
        .map(String::from)
        .ok_or_else(|| AppError::Validation(format!("{} is required", field)))
}

fn subject_code(value: &str) -> Result<String> {
    let code = required(value, "Subject code")?;
    if code.chars().count() > MAX_SUBJECT_CODE_LEN {
        return Err(AppError::Validation(format!(
            "Subject code must be at most {} characters",
            MAX_SUBJECT_CODE_LEN
        )));
    }
    Ok(code)
}
