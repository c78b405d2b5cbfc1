use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::access::Role;
use crate::features::auth::clients::{BackendSession, BackendUser};

/// Request DTO for student sign up
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct SignupRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 128, message = "Full name must be 1-128 characters"))]
    pub full_name: String,

    #[validate(length(min = 1, max = 100, message = "Branch must be 1-100 characters"))]
    pub branch: Option<String>,

    #[validate(range(min = 1, max = 8, message = "Semester must be between 1 and 8"))]
    pub semester: Option<i32>,
}

/// Request DTO for user login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request DTO for token refresh
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RefreshTokenRequestDto {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ForgotPasswordRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Access and refresh token pair
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionTokensDto {
    /// JWT access token, also set as the session cookie
    pub access_token: String,
    /// Token type (always "bearer")
    pub token_type: String,
    /// Token expiry time in seconds
    pub expires_in: i64,
    pub refresh_token: String,
}

/// Response DTO for login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponseDto {
    #[serde(flatten)]
    pub tokens: SessionTokensDto,
    pub user: AuthUserDto,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignupResponseDto {
    pub user: AuthUserDto,
    /// Absent until the email address is confirmed
    pub session: Option<SessionTokensDto>,
}

/// User info included in auth responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthUserDto {
    pub id: Uuid,
    pub email: Option<String>,
    pub email_verified: bool,
}

/// DTO for /auth/me response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeResponseDto {
    pub id: Uuid,
    pub email: Option<String>,
    /// None when the user has no profile row yet
    pub role: Option<Role>,
}

impl From<BackendUser> for AuthUserDto {
    fn from(user: BackendUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            email_verified: user.email_confirmed_at.is_some(),
        }
    }
}

impl From<BackendSession> for SessionTokensDto {
    fn from(session: BackendSession) -> Self {
        Self {
            access_token: session.access_token,
            token_type: session.token_type,
            expires_in: session.expires_in,
            refresh_token: session.refresh_token,
        }
    }
}

impl From<BackendSession> for AuthResponseDto {
    fn from(session: BackendSession) -> Self {
        let user = session.user.clone().into();
        Self {
            tokens: session.into(),
            user,
        }
    }
}
