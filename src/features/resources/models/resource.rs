use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::resources::dtos::ResourceResponseDto;

/// Kind of academic material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ResourceType {
    Notes,
    Papers,
    Labs,
    Books,
}

impl ResourceType {
    pub const ALL: [ResourceType; 4] = [
        ResourceType::Notes,
        ResourceType::Papers,
        ResourceType::Labs,
        ResourceType::Books,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Notes => "Notes",
            ResourceType::Papers => "Papers",
            ResourceType::Labs => "Labs",
            ResourceType::Books => "Books",
        }
    }

    /// Case-insensitive parse of the stored type string
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

/// Database model for resource
#[derive(Debug, Clone, FromRow)]
pub struct Resource {
    pub id: Uuid,
    pub title: String,
    pub branch: String,
    pub semester: i32,
    pub subject_code: String,
    #[sqlx(rename = "type")]
    pub resource_type: String,
    pub file_url: String,
    pub uploaded_by: Option<Uuid>,
    pub folder_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<Resource> for ResourceResponseDto {
    fn from(r: Resource) -> Self {
        Self {
            id: r.id,
            title: r.title,
            branch: r.branch,
            semester: r.semester,
            subject_code: r.subject_code,
            resource_type: r.resource_type,
            file_url: r.file_url,
            uploaded_by: r.uploaded_by,
            folder_id: r.folder_id,
            created_at: r.created_at,
        }
    }
}
