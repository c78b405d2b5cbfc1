use std::sync::Arc;

use crate::core::error::Result;
use crate::features::admin::dtos::AdminDashboardDto;
use crate::features::profiles::repositories::ProfileRepository;
use crate::features::resources::models::ResourceFilter;
use crate::features::resources::repositories::ResourceRepository;
use crate::shared::constants::RECENT_UPLOADS_LIMIT;

/// Service for admin queries
pub struct AdminService {
    resources: Arc<dyn ResourceRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl AdminService {
    pub fn new(resources: Arc<dyn ResourceRepository>, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self {
            resources,
            profiles,
        }
    }

    /// Three independent reads; counts and the recent list are not a snapshot
    pub async fn dashboard(&self) -> Result<AdminDashboardDto> {
        let all = ResourceFilter::default();
        let (total_resources, total_profiles, recent) = tokio::try_join!(
            self.resources.count(&all),
            self.profiles.count(),
            self.resources.recent(RECENT_UPLOADS_LIMIT),
        )?;

        Ok(AdminDashboardDto {
            total_resources,
            total_profiles,
            recent_uploads: recent.into_iter().map(Into::into).collect(),
        })
    }
}
