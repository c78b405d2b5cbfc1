use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// User resolved from a valid session token
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Backend auth user id (also the profile id)
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Session id issued by the auth backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Raw access token, kept so the session can be revoked upstream
    #[serde(skip)]
    pub access_token: String,
}

/// Claims the auth backend puts into its access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: Uuid,
    pub aud: String,
    pub exp: u64,
    #[serde(default)]
    pub iat: Option<u64>,
    #[serde(default)]
    pub email: Option<String>,
    /// Postgres role of the token ("authenticated"); not the portal role
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}
