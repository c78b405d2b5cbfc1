use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::clients::AuthProvider;
use crate::features::auth::dtos::{
    AuthResponseDto, ForgotPasswordRequestDto, LoginRequestDto, MeResponseDto,
    RefreshTokenRequestDto, SessionTokensDto, SignupRequestDto, SignupResponseDto,
};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::profiles::repositories::{NewProfile, ProfileRepository};
use crate::shared::validation::non_blank;

/// Cookie and redirect settings for the auth endpoints
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub session_cookie: String,
    /// Where the reset email links to
    pub password_reset_url: String,
}

impl AuthSettings {
    pub fn new(session_cookie: String, frontend_url: &str) -> Self {
        Self {
            session_cookie,
            password_reset_url: format!("{}/reset-password", frontend_url.trim_end_matches('/')),
        }
    }
}

/// Service for authentication operations.
///
/// Credentials never touch this service's database; every check is a call
/// to the auth backend. Sign up additionally writes the student profile.
pub struct AuthService {
    provider: Arc<dyn AuthProvider>,
    profiles: Arc<dyn ProfileRepository>,
    settings: AuthSettings,
}

impl AuthService {
    pub fn new(
        provider: Arc<dyn AuthProvider>,
        profiles: Arc<dyn ProfileRepository>,
        settings: AuthSettings,
    ) -> Self {
        Self {
            provider,
            profiles,
            settings,
        }
    }

    pub fn session_cookie(&self) -> &str {
        &self.settings.session_cookie
    }

    /// Register a student. The profile role is always `student`.
    pub async fn signup(&self, dto: SignupRequestDto) -> Result<SignupResponseDto> {
        let full_name = non_blank(&dto.full_name)
            .ok_or_else(|| AppError::Validation("Full name cannot be empty".to_string()))?
            .to_string();
        let branch = dto.branch.as_deref().and_then(non_blank).map(String::from);

        let outcome = self
            .provider
            .sign_up(dto.email.trim(), &dto.password, &full_name)
            .await?;

        self.profiles
            .create_student(NewProfile {
                id: outcome.user.id,
                email: outcome.user.email.clone(),
                full_name: Some(full_name),
                branch,
                semester: dto.semester,
            })
            .await?;

        tracing::info!("Student profile created for {}", outcome.user.id);

        Ok(SignupResponseDto {
            user: outcome.user.into(),
            session: outcome.session.map(Into::into),
        })
    }

    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthResponseDto> {
        let session = self
            .provider
            .sign_in_with_password(dto.email.trim(), &dto.password)
            .await?;

        tracing::info!("User {} signed in", session.user.id);
        Ok(session.into())
    }

    pub async fn refresh_token(&self, dto: RefreshTokenRequestDto) -> Result<SessionTokensDto> {
        let session = self.provider.refresh(&dto.refresh_token).await?;
        Ok(session.into())
    }

    /// End the upstream session. A session the backend no longer knows counts as ended.
    pub async fn logout(&self, user: &AuthenticatedUser) -> Result<()> {
        match self.provider.sign_out(&user.access_token).await {
            Ok(()) => {
                tracing::info!("User {} signed out", user.id);
                Ok(())
            }
            Err(AppError::Auth(msg)) => {
                tracing::debug!("Sign out for {}: {}", user.id, msg);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    pub async fn forgot_password(&self, dto: ForgotPasswordRequestDto) -> Result<()> {
        self.provider
            .reset_password_for_email(dto.email.trim(), &self.settings.password_reset_url)
            .await
    }

    /// Session user plus the role stored on their profile
    pub async fn me(&self, user: &AuthenticatedUser) -> Result<MeResponseDto> {
        let role = self.profiles.find(user.id).await?.and_then(|p| p.role());

        Ok(MeResponseDto {
            id: user.id,
            email: user.email.clone(),
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::access::Role;
    use crate::shared::test_helpers::{user_with_id, FakeAuthProvider, InMemoryProfiles};
    use uuid::Uuid;

    fn service(provider: Arc<FakeAuthProvider>) -> (AuthService, Arc<InMemoryProfiles>) {
        let profiles = Arc::new(InMemoryProfiles::default());
        let service = AuthService::new(
            provider,
            profiles.clone(),
            AuthSettings::new("portal-access-token".to_string(), "https://portal.example/"),
        );
        (service, profiles)
    }

    fn signup_dto(full_name: &str) -> SignupRequestDto {
        SignupRequestDto {
            email: " asha@college.edu ".to_string(),
            password: "secret123".to_string(),
            full_name: full_name.to_string(),
            branch: Some(" Mechanical ".to_string()),
            semester: Some(3),
        }
    }

    #[tokio::test]
    async fn test_signup_creates_student_profile() {
        let provider = Arc::new(FakeAuthProvider::default());
        let (service, profiles) = service(provider.clone());

        let response = service.signup(signup_dto(" Asha ")).await.unwrap();

        let profile = profiles.find(response.user.id).await.unwrap().unwrap();
        assert_eq!(profile.role(), Some(Role::Student));
        assert_eq!(profile.full_name.as_deref(), Some("Asha"));
        assert_eq!(profile.branch.as_deref(), Some("Mechanical"));
        assert_eq!(profile.email.as_deref(), Some("asha@college.edu"));
        assert!(response.session.is_some());
    }

    #[tokio::test]
    async fn test_signup_rejects_blank_name_before_backend() {
        let provider = Arc::new(FakeAuthProvider::default());
        let (service, _) = service(provider.clone());

        let result = service.signup(signup_dto("   ")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_signup_failure_creates_no_profile() {
        let provider = Arc::new(FakeAuthProvider::default());
        provider.fail_next(AppError::Conflict("Email already registered".to_string()));
        let (service, profiles) = service(provider);

        let result = service.signup(signup_dto("Asha")).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(profiles.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_logout_tolerates_ended_session() {
        let provider = Arc::new(FakeAuthProvider::default());
        provider.fail_next(AppError::Auth("Session already ended".to_string()));
        let (service, _) = service(provider.clone());

        service.logout(&user_with_id(Uuid::new_v4())).await.unwrap();

        provider.fail_next(AppError::ExternalServiceError("down".to_string()));
        let result = service.logout(&user_with_id(Uuid::new_v4())).await;
        assert!(matches!(result, Err(AppError::ExternalServiceError(_))));
    }

    #[tokio::test]
    async fn test_forgot_password_redirects_to_frontend() {
        let provider = Arc::new(FakeAuthProvider::default());
        let (service, _) = service(provider.clone());

        service
            .forgot_password(ForgotPasswordRequestDto {
                email: "asha@college.edu".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(
            provider.last_redirect().as_deref(),
            Some("https://portal.example/reset-password")
        );
    }

    #[tokio::test]
    async fn test_me_resolves_role_from_profile() {
        let provider = Arc::new(FakeAuthProvider::default());
        let (service, profiles) = service(provider);
        let id = Uuid::new_v4();

        let me = service.me(&user_with_id(id)).await.unwrap();
        assert_eq!(me.role, None);

        profiles
            .create_student(NewProfile {
                id,
                email: None,
                full_name: None,
                branch: None,
                semester: None,
            })
            .await
            .unwrap();
        profiles.set_role(id, Role::Admin);

        let me = service.me(&user_with_id(id)).await.unwrap();
        assert_eq!(me.role, Some(Role::Admin));
    }
}
