use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::profiles::dtos::{ProfileResponseDto, UpdateProfileDto};
use crate::features::profiles::repositories::{ProfileChanges, ProfileRepository};
use crate::features::resources::dtos::ResourceResponseDto;
use crate::features::resources::repositories::ResourceRepository;
use crate::shared::validation::non_blank;

/// Service for the signed-in user's own profile
pub struct ProfileService {
    profiles: Arc<dyn ProfileRepository>,
    resources: Arc<dyn ResourceRepository>,
}

impl ProfileService {
    pub fn new(profiles: Arc<dyn ProfileRepository>, resources: Arc<dyn ResourceRepository>) -> Self {
        Self {
            profiles,
            resources,
        }
    }

    pub async fn get_profile(&self, user: &AuthenticatedUser) -> Result<ProfileResponseDto> {
        self.profiles
            .find(user.id)
            .await?
            .map(Into::into)
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))
    }

    /// Update name, branch and semester. The role column is not reachable from here.
    pub async fn update_profile(
        &self,
        user: &AuthenticatedUser,
        dto: UpdateProfileDto,
    ) -> Result<ProfileResponseDto> {
        let changes = ProfileChanges {
            full_name: trimmed(dto.full_name, "Full name")?,
            branch: trimmed(dto.branch, "Branch")?,
            semester: dto.semester,
        };

        let profile = self
            .profiles
            .update_details(user.id, changes)
            .await?
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

        tracing::info!("Profile {} updated", user.id);
        Ok(profile.into())
    }

    /// Resources uploaded by the current user, newest first
    pub async fn activity(&self, user: &AuthenticatedUser) -> Result<Vec<ResourceResponseDto>> {
        let uploads = self.resources.uploaded_by(user.id).await?;
        Ok(uploads.into_iter().map(Into::into).collect())
    }
}

fn trimmed(value: Option<String>, field: &str) -> Result<Option<String>> {
    match value {
        None => Ok(None),
        Some(v) => non_blank(&v)
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| AppError::Validation(format!("{} cannot be blank", field))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::profiles::repositories::NewProfile;
    use crate::shared::test_helpers::{
        sample_resource, user_with_id, InMemoryProfiles, InMemoryResources,
    };
    use uuid::Uuid;

    async fn service_with_profile(id: Uuid) -> (ProfileService, Arc<InMemoryProfiles>, Arc<InMemoryResources>) {
        let profiles = Arc::new(InMemoryProfiles::default());
        profiles
            .create_student(NewProfile {
                id,
                email: Some("asha@example.com".to_string()),
                full_name: Some("Asha".to_string()),
                branch: Some("Mechanical".to_string()),
                semester: Some(3),
            })
            .await
            .unwrap();
        let resources = Arc::new(InMemoryResources::default());
        let service = ProfileService::new(profiles.clone(), resources.clone());
        (service, profiles, resources)
    }

    #[tokio::test]
    async fn test_update_keeps_role_and_unset_fields() {
        let id = Uuid::new_v4();
        let (service, _, _) = service_with_profile(id).await;

        let updated = service
            .update_profile(
                &user_with_id(id),
                UpdateProfileDto {
                    full_name: Some("  Asha K  ".to_string()),
                    branch: None,
                    semester: Some(4),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.full_name.as_deref(), Some("Asha K"));
        assert_eq!(updated.branch.as_deref(), Some("Mechanical"));
        assert_eq!(updated.semester, Some(4));
        assert_eq!(updated.role, Some(crate::features::access::Role::Student));
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected() {
        let id = Uuid::new_v4();
        let (service, profiles, _) = service_with_profile(id).await;

        let result = service
            .update_profile(
                &user_with_id(id),
                UpdateProfileDto {
                    full_name: Some("   ".to_string()),
                    branch: None,
                    semester: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(profiles.updates(), 0);
    }

    #[tokio::test]
    async fn test_missing_profile_is_not_found() {
        let (service, _, _) = service_with_profile(Uuid::new_v4()).await;
        let result = service.get_profile(&user_with_id(Uuid::new_v4())).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_activity_lists_only_own_uploads() {
        let id = Uuid::new_v4();
        let (service, _, resources) = service_with_profile(id).await;

        let mut mine = sample_resource("Thermo Notes", "Mechanical", 3);
        mine.uploaded_by = Some(id);
        resources.seed(mine.clone());
        resources.seed(sample_resource("Other", "Civil", 1));

        let activity = service.activity(&user_with_id(id)).await.unwrap();
        assert_eq!(activity.len(), 1);
        assert_eq!(activity[0].id, mine.id);
    }

    #[test]
    fn test_role_in_body_is_rejected() {
        let body = r#"{"full_name": "Asha", "role": "admin"}"#;
        assert!(serde_json::from_str::<UpdateProfileDto>(body).is_err());
    }
}
