use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::access::Role;
use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers};
use crate::features::auth;
use crate::features::branches::{dtos as branches_dtos, handlers as branches_handlers};
use crate::features::folders::{dtos as folders_dtos, handlers as folders_handlers};
use crate::features::notifications::{
    dtos as notifications_dtos, handlers as notifications_handlers,
    models as notifications_models,
};
use crate::features::profiles::{dtos as profiles_dtos, handlers as profiles_handlers};
use crate::features::resources::{
    dtos as resources_dtos, handlers as resources_handlers, models as resources_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::signup,
        auth::handlers::login,
        auth::handlers::refresh_token,
        auth::handlers::logout,
        auth::handlers::forgot_password,
        auth::handlers::get_me,
        // Profile
        profiles_handlers::get_profile,
        profiles_handlers::update_profile,
        profiles_handlers::get_activity,
        // Resources
        resources_handlers::list_resources,
        resources_handlers::get_resource,
        // Folders
        folders_handlers::list_folders,
        folders_handlers::get_folder_tree,
        folders_handlers::get_folder_rows,
        // Branches (public)
        branches_handlers::list_branches,
        // Notifications (public)
        notifications_handlers::list_notifications,
        // Admin
        admin_handlers::get_dashboard,
        resources_handlers::list_admin_resources,
        resources_handlers::upload_resource,
        resources_handlers::update_resource,
        resources_handlers::delete_resource,
        folders_handlers::create_folder,
        folders_handlers::rename_folder,
        folders_handlers::delete_folder,
        folders_handlers::move_folder,
        folders_handlers::move_resource,
        branches_handlers::create_branch,
        branches_handlers::delete_branch,
        notifications_handlers::create_notification,
        notifications_handlers::delete_notification,
    ),
    components(
        schemas(
            // Shared
            Meta,
            Role,
            // Auth
            auth::dtos::SignupRequestDto,
            auth::dtos::SignupResponseDto,
            auth::dtos::LoginRequestDto,
            auth::dtos::RefreshTokenRequestDto,
            auth::dtos::ForgotPasswordRequestDto,
            auth::dtos::SessionTokensDto,
            auth::dtos::AuthResponseDto,
            auth::dtos::AuthUserDto,
            auth::dtos::MeResponseDto,
            ApiResponse<auth::dtos::SignupResponseDto>,
            ApiResponse<auth::dtos::AuthResponseDto>,
            ApiResponse<auth::dtos::SessionTokensDto>,
            ApiResponse<auth::dtos::MeResponseDto>,
            // Profile
            profiles_dtos::ProfileResponseDto,
            profiles_dtos::UpdateProfileDto,
            ApiResponse<profiles_dtos::ProfileResponseDto>,
            // Resources
            resources_models::ResourceType,
            resources_dtos::ResourceResponseDto,
            resources_dtos::UpdateResourceDto,
            resources_dtos::UploadResourceForm,
            ApiResponse<resources_dtos::ResourceResponseDto>,
            ApiResponse<Vec<resources_dtos::ResourceResponseDto>>,
            // Folders
            folders_dtos::FolderResponseDto,
            folders_dtos::FolderNodeDto,
            folders_dtos::FolderRowDto,
            folders_dtos::CreateFolderDto,
            folders_dtos::RenameFolderDto,
            folders_dtos::MoveFolderDto,
            folders_dtos::MoveResourceDto,
            folders_dtos::FolderDeletedDto,
            ApiResponse<folders_dtos::FolderResponseDto>,
            ApiResponse<Vec<folders_dtos::FolderResponseDto>>,
            ApiResponse<Vec<folders_dtos::FolderNodeDto>>,
            ApiResponse<Vec<folders_dtos::FolderRowDto>>,
            ApiResponse<folders_dtos::FolderDeletedDto>,
            // Branches
            branches_dtos::BranchResponseDto,
            branches_dtos::CreateBranchDto,
            ApiResponse<branches_dtos::BranchResponseDto>,
            ApiResponse<Vec<branches_dtos::BranchResponseDto>>,
            // Notifications
            notifications_models::NotificationType,
            notifications_dtos::NotificationResponseDto,
            notifications_dtos::CreateNotificationDto,
            ApiResponse<notifications_dtos::NotificationResponseDto>,
            ApiResponse<Vec<notifications_dtos::NotificationResponseDto>>,
            // Admin
            admin_dtos::AdminDashboardDto,
            ApiResponse<admin_dtos::AdminDashboardDto>,
        )
    ),
    tags(
        (name = "auth", description = "Sign up, login and session management"),
        (name = "profile", description = "Current user's profile and uploads"),
        (name = "resources", description = "Resource catalog with filters and search"),
        (name = "folders", description = "Folder tree"),
        (name = "branches", description = "Engineering branches (public)"),
        (name = "notifications", description = "Portal notifications (public)"),
        (name = "admin", description = "Admin endpoints (admin role only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Engineering Portal API",
        version = "0.1.0",
        description = "API documentation for the engineering resource portal",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_portal_paths_with_bearer_scheme() {
        let doc = ApiDoc::openapi();

        for path in [
            "/api/resources",
            "/api/folders/tree/rows",
            "/api/admin/resources/{id}/folder",
            "/api/admin/dashboard",
            "/api/auth/logout",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{}", path);
        }

        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
