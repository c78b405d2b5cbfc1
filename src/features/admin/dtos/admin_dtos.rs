use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::resources::dtos::ResourceResponseDto;

// =============================================================================
// DASHBOARD DTOs
// =============================================================================

/// Admin dashboard overview
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminDashboardDto {
    pub total_resources: i64,
    pub total_profiles: i64,
    /// Newest uploads first
    pub recent_uploads: Vec<ResourceResponseDto>,
}
