use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::access::Role;

/// Response DTO for profile
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponseDto {
    pub id: Uuid,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub branch: Option<String>,
    pub semester: Option<i32>,
    /// Read-only; assigned by the portal
    pub role: Option<Role>,
    pub created_at: DateTime<Utc>,
}

/// Request DTO for updating the current user's profile.
///
/// Unknown fields are rejected, so a `role` in the body is a client error.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateProfileDto {
    #[validate(length(min = 1, max = 128, message = "Full name must be 1-128 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Branch must be 1-100 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    #[validate(range(min = 1, max = 8, message = "Semester must be between 1 and 8"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester: Option<i32>,
}
