use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};

/// Response DTO for folder
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FolderResponseDto {
    pub id: Uuid,
    pub name: String,
    pub parent_id: Option<Uuid>,
    pub color: String,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Folder with its subtree
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(no_recursion)]
pub struct FolderNodeDto {
    pub id: Uuid,
    pub name: String,
    pub parent_id: Option<Uuid>,
    pub color: String,
    pub children: Vec<FolderNodeDto>,
}

/// One visible row of the rendered tree
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FolderRowDto {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    /// 0 for roots
    pub depth: usize,
    pub has_children: bool,
    pub is_expanded: bool,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct FolderRowsQuery {
    /// Comma-separated ids of expanded folders
    pub expanded: Option<String>,
}

impl FolderRowsQuery {
    pub fn expanded_ids(&self) -> Result<HashSet<Uuid>> {
        self.expanded
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                Uuid::parse_str(s)
                    .map_err(|_| AppError::BadRequest(format!("Invalid folder id: {}", s)))
            })
            .collect()
    }
}

/// Request DTO for creating a folder
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateFolderDto {
    #[validate(length(max = 100, message = "Name must not exceed 100 characters"))]
    pub name: String,

    /// Parent folder; omit for a root folder
    #[serde(default)]
    pub parent_id: Option<Uuid>,

    /// `#rrggbb`, defaults to `#135bec`
    #[validate(regex(
        path = "*crate::shared::validation::HEX_COLOR_REGEX",
        message = "Color must be a hex value like #135bec"
    ))]
    #[serde(default)]
    pub color: Option<String>,
}

/// Request DTO for renaming a folder
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RenameFolderDto {
    #[validate(length(max = 100, message = "Name must not exceed 100 characters"))]
    pub name: String,
}

/// Request DTO for moving a folder under a new parent
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MoveFolderDto {
    /// New parent; `null` moves the folder to the root
    #[serde(default)]
    pub parent_id: Option<Uuid>,
}

/// Request DTO for moving a resource into a folder
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MoveResourceDto {
    /// Target folder; `null` moves the resource out of any folder
    #[serde(default)]
    pub folder_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct DeleteFolderQuery {
    /// Folder currently selected by the caller
    pub selected: Option<Uuid>,
}

/// Result of a folder delete
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FolderDeletedDto {
    pub deleted_id: Uuid,
    /// Caller's selection after the delete; `null` means root
    pub selected: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expanded_ids() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let query = FolderRowsQuery {
            expanded: Some(format!("{}, {},", a, b)),
        };
        assert_eq!(query.expanded_ids().unwrap(), HashSet::from([a, b]));
        assert!(FolderRowsQuery::default().expanded_ids().unwrap().is_empty());

        let bad = FolderRowsQuery {
            expanded: Some("nope".to_string()),
        };
        assert!(bad.expanded_ids().is_err());
    }

    #[test]
    fn test_color_validation() {
        let dto = CreateFolderDto {
            name: "Sem 3".to_string(),
            parent_id: None,
            color: Some("blue".to_string()),
        };
        assert!(dto.validate().is_err());

        let dto = CreateFolderDto {
            color: Some("#135BEC".to_string()),
            ..dto
        };
        assert!(dto.validate().is_ok());
    }
}
