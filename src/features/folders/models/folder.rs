use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::folders::dtos::FolderResponseDto;

/// Database model for folder
#[derive(Debug, Clone, FromRow)]
pub struct Folder {
    pub id: Uuid,
    pub name: String,
    pub parent_id: Option<Uuid>,
    pub color: String,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<Folder> for FolderResponseDto {
    fn from(f: Folder) -> Self {
        Self {
            id: f.id,
            name: f.name,
            parent_id: f.parent_id,
            color: f.color,
            created_by: f.created_by,
            created_at: f.created_at,
        }
    }
}
