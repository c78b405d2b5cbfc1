use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::access::Role;
use crate::features::profiles::dtos::ProfileResponseDto;

/// Database model for profile
#[derive(Debug, Clone, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub branch: Option<String>,
    pub semester: Option<i32>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Unknown role strings are treated as no role
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }
}

impl From<Profile> for ProfileResponseDto {
    fn from(p: Profile) -> Self {
        Self {
            role: p.role(),
            id: p.id,
            email: p.email,
            full_name: p.full_name,
            branch: p.branch,
            semester: p.semester,
            created_at: p.created_at,
        }
    }
}
