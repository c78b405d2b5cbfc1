use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::folders::dtos::{
    CreateFolderDto, FolderDeletedDto, FolderNodeDto, FolderResponseDto, FolderRowDto,
};
use crate::features::folders::models::FolderTree;
use crate::features::folders::repositories::{FolderRepository, NewFolder};
use crate::features::resources::dtos::ResourceResponseDto;
use crate::features::resources::repositories::ResourceRepository;
use crate::shared::constants::DEFAULT_FOLDER_COLOR;
use crate::shared::validation::{non_blank, HEX_COLOR_REGEX};

/// Service for folder tree operations.
///
/// Results are built only from what the store returned; nothing is updated
/// ahead of a confirmed write.
pub struct FolderService {
    folders: Arc<dyn FolderRepository>,
    resources: Arc<dyn ResourceRepository>,
}

impl FolderService {
    pub fn new(folders: Arc<dyn FolderRepository>, resources: Arc<dyn ResourceRepository>) -> Self {
        Self { folders, resources }
    }

    pub async fn list(&self) -> Result<Vec<FolderResponseDto>> {
        let folders = self.folders.list_all().await?;
        Ok(folders.into_iter().map(Into::into).collect())
    }

    async fn load_tree(&self) -> Result<FolderTree> {
        Ok(FolderTree::build(self.folders.list_all().await?))
    }

    pub async fn tree(&self) -> Result<Vec<FolderNodeDto>> {
        Ok(self.load_tree().await?.nested())
    }

    pub async fn rows(&self, expanded: &HashSet<Uuid>) -> Result<Vec<FolderRowDto>> {
        Ok(self.load_tree().await?.visible_rows(expanded))
    }

    pub async fn create(
        &self,
        dto: CreateFolderDto,
        user: &AuthenticatedUser,
    ) -> Result<FolderResponseDto> {
        let name = folder_name(&dto.name)?;

        let color = match dto.color.as_deref().and_then(non_blank) {
            Some(color) if HEX_COLOR_REGEX.is_match(color) => color.to_string(),
            Some(color) => {
                return Err(AppError::Validation(format!("Invalid color: {}", color)));
            }
            None => DEFAULT_FOLDER_COLOR.to_string(),
        };

        if let Some(parent_id) = dto.parent_id {
            if self.folders.find(parent_id).await?.is_none() {
                return Err(AppError::NotFound(format!(
                    "Parent folder {} not found",
                    parent_id
                )));
            }
        }

        let folder = self
            .folders
            .insert(NewFolder {
                name,
                parent_id: dto.parent_id,
                color,
                created_by: user.id,
            })
            .await?;

        info!("Folder {} created by {}", folder.id, user.id);
        Ok(folder.into())
    }

    /// Blank names are rejected before the store is touched
    pub async fn rename(&self, id: Uuid, name: &str) -> Result<FolderResponseDto> {
        let name = folder_name(name)?;

        let folder = self
            .folders
            .rename(id, &name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Folder {} not found", id)))?;

        info!("Folder {} renamed", id);
        Ok(folder.into())
    }

    /// Delete a folder and report the caller's resulting selection
    pub async fn delete(&self, id: Uuid, selected: Option<Uuid>) -> Result<FolderDeletedDto> {
        if !self.folders.delete(id).await? {
            return Err(AppError::NotFound(format!("Folder {} not found", id)));
        }

        info!("Folder {} deleted", id);
        Ok(FolderDeletedDto {
            deleted_id: id,
            selected: selected.filter(|s| *s != id),
        })
    }

    /// Re-parent a folder. The new parent may not be the folder or one of its descendants.
    pub async fn move_folder(
        &self,
        id: Uuid,
        parent_id: Option<Uuid>,
    ) -> Result<FolderResponseDto> {
        let tree = self.load_tree().await?;

        if tree.get(id).is_none() {
            return Err(AppError::NotFound(format!("Folder {} not found", id)));
        }

        if let Some(parent_id) = parent_id {
            if tree.get(parent_id).is_none() {
                return Err(AppError::NotFound(format!(
                    "Parent folder {} not found",
                    parent_id
                )));
            }
            if tree.is_within(parent_id, id) {
                return Err(AppError::Conflict(
                    "A folder cannot be moved into itself or one of its subfolders".to_string(),
                ));
            }
        }

        let folder = self
            .folders
            .set_parent(id, parent_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Folder {} not found", id)))?;

        info!("Folder {} moved under {:?}", id, parent_id);
        Ok(folder.into())
    }

    /// Put a resource into a folder (`None` for no folder)
    pub async fn move_resource(
        &self,
        resource_id: Uuid,
        folder_id: Option<Uuid>,
    ) -> Result<ResourceResponseDto> {
        let resource = self
            .resources
            .find(resource_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Resource {} not found", resource_id)))?;

        if resource.folder_id == folder_id {
            return Err(AppError::BadRequest(
                "Resource is already in this folder".to_string(),
            ));
        }

        if let Some(folder_id) = folder_id {
            if self.folders.find(folder_id).await?.is_none() {
                return Err(AppError::NotFound(format!("Folder {} not found", folder_id)));
            }
        }

        let moved = self
            .resources
            .set_folder(resource_id, folder_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Resource {} not found", resource_id)))?;

        info!("Resource {} moved to folder {:?}", resource_id, folder_id);
        Ok(moved.into())
    }
}

fn folder_name(raw: &str) -> Result<String> {
    non_blank(raw)
        .map(String::from)
        .ok_or_else(|| AppError::Validation("Folder name cannot be empty".to_string()))
}
