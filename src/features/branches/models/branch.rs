use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::branches::dtos::BranchResponseDto;

/// Database model for branch
#[derive(Debug, Clone, FromRow)]
pub struct Branch {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Branch> for BranchResponseDto {
    fn from(b: Branch) -> Self {
        Self {
            id: b.id,
            name: b.name,
            created_at: b.created_at,
        }
    }
}
