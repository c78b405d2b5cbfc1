use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};

/// User record returned by the auth backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_confirmed_at: Option<DateTime<Utc>>,
}

/// Token pair issued on sign in or refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSession {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_token: String,
    pub user: BackendUser,
}

/// Result of a sign up. `session` is absent while email confirmation is pending.
#[derive(Debug, Clone)]
pub struct SignUpOutcome {
    pub user: BackendUser,
    pub session: Option<BackendSession>,
}

/// Password-based auth operations delegated to the backend
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str, full_name: &str)
        -> Result<SignUpOutcome>;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<BackendSession>;

    async fn refresh(&self, refresh_token: &str) -> Result<BackendSession>;

    /// Revoke the session the access token belongs to
    async fn sign_out(&self, access_token: &str) -> Result<()>;

    async fn reset_password_for_email(&self, email: &str, redirect_to: &str) -> Result<()>;
}

#[derive(Debug, Serialize)]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    data: SignUpMetadata<'a>,
}

#[derive(Debug, Serialize)]
struct SignUpMetadata<'a> {
    full_name: &'a str,
}

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Debug, Serialize)]
struct RecoverRequest<'a> {
    email: &'a str,
}

/// Sign up answers with a session when confirmation is off, or the bare user otherwise
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(BackendSession),
    User(BackendUser),
}

impl From<SignUpResponse> for SignUpOutcome {
    fn from(response: SignUpResponse) -> Self {
        match response {
            SignUpResponse::Session(session) => SignUpOutcome {
                user: session.user.clone(),
                session: Some(session),
            },
            SignUpResponse::User(user) => SignUpOutcome {
                user,
                session: None,
            },
        }
    }
}

/// Error body of the auth backend; older and newer versions use different keys
#[derive(Debug, Default, Deserialize)]
struct BackendErrorResponse {
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

impl BackendErrorResponse {
    fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    fn code(&self) -> &str {
        self.error_code
            .as_deref()
            .or(self.error.as_deref())
            .unwrap_or_default()
    }

    fn message(&self) -> Option<&str> {
        self.msg.as_deref().or(self.error_description.as_deref())
    }
}

/// Client for the backend's auth REST API
pub struct BackendAuthClient {
    api_url: String,
    anon_key: String,
    http_client: reqwest::Client,
}

impl BackendAuthClient {
    pub fn new(config: &AuthConfig, anon_key: String) -> Self {
        Self {
            api_url: config.api_url.clone(),
            anon_key,
            http_client: reqwest::Client::new(),
        }
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http_client
            .post(format!("{}{}", self.api_url, path))
            .header("apikey", &self.anon_key)
    }

    async fn send(&self, request: reqwest::RequestBuilder, action: &str) -> Result<reqwest::Response> {
        request.send().await.map_err(|e| {
            tracing::error!("Auth backend request failed ({}): {}", action, e);
            AppError::ExternalServiceError(format!("Failed to {}: {}", action, e))
        })
    }

    async fn parse_json<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
        action: &str,
    ) -> Result<T> {
        response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to parse auth backend response ({}): {}", action, e);
            AppError::ExternalServiceError(format!("Failed to parse {} response: {}", action, e))
        })
    }

    async fn session_grant<B: Serialize + Sync>(
        &self,
        grant_type: &str,
        body: &B,
    ) -> Result<BackendSession> {
        let request = self
            .post(&format!("/token?grant_type={}", grant_type))
            .json(body);
        let response = self.send(request, "sign in").await?;

        let status = response.status();
        if status.is_success() {
            return Self::parse_json(response, "sign in").await;
        }

        let body = response.text().await.unwrap_or_default();
        Err(grant_error(status, &body))
    }
}

#[async_trait]
impl AuthProvider for BackendAuthClient {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<SignUpOutcome> {
        tracing::debug!("Signing up user: {}", email);

        let request = self.post("/signup").json(&SignUpRequest {
            email,
            password,
            data: SignUpMetadata { full_name },
        });
        let response = self.send(request, "sign up").await?;

        let status = response.status();
        if status.is_success() {
            let parsed: SignUpResponse = Self::parse_json(response, "sign up").await?;
            let outcome = SignUpOutcome::from(parsed);
            tracing::info!("Auth backend created user {}", outcome.user.id);
            return Ok(outcome);
        }

        let body = response.text().await.unwrap_or_default();
        Err(sign_up_error(status, &body))
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<BackendSession> {
        tracing::debug!("Password sign in for: {}", email);
        self.session_grant("password", &CredentialsRequest { email, password })
            .await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<BackendSession> {
        self.session_grant("refresh_token", &RefreshRequest { refresh_token })
            .await
    }

    async fn sign_out(&self, access_token: &str) -> Result<()> {
        let request = self.post("/logout").bearer_auth(access_token);
        let response = self.send(request, "sign out").await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        if matches!(
            status,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND
        ) {
            return Err(AppError::Auth("Session already ended".to_string()));
        }

        tracing::error!("Auth backend sign out error: HTTP {} - {}", status, body);
        Err(AppError::ExternalServiceError(format!(
            "Auth backend error: HTTP {}",
            status
        )))
    }

    async fn reset_password_for_email(&self, email: &str, redirect_to: &str) -> Result<()> {
        let request = self
            .post(&format!(
                "/recover?redirect_to={}",
                urlencoding::encode(redirect_to)
            ))
            .json(&RecoverRequest { email });
        let response = self.send(request, "request password reset").await?;

        let status = response.status();
        if status.is_success() {
            tracing::info!("Password reset email requested for {}", email);
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(AppError::BadRequest(
                "Too many reset requests, try again later".to_string(),
            ));
        }

        tracing::error!("Auth backend recover error: HTTP {} - {}", status, body);
        Err(AppError::ExternalServiceError(format!(
            "Auth backend error: HTTP {}",
            status
        )))
    }
}

fn sign_up_error(status: StatusCode, body: &str) -> AppError {
    let error = BackendErrorResponse::parse(body);

    if error.code() == "user_already_exists"
        || error.code() == "email_exists"
        || error
            .message()
            .is_some_and(|m| m.contains("already registered"))
    {
        return AppError::Conflict("Email already registered".to_string());
    }

    if matches!(
        status,
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY
    ) {
        return AppError::Validation(
            error
                .message()
                .unwrap_or("Invalid sign up request")
                .to_string(),
        );
    }

    tracing::error!("Auth backend sign up error: HTTP {} - {}", status, body);
    AppError::ExternalServiceError(format!("Auth backend error: HTTP {}", status))
}

fn grant_error(status: StatusCode, body: &str) -> AppError {
    let error = BackendErrorResponse::parse(body);

    if matches!(status, StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED) {
        return match error.code() {
            "email_not_confirmed" => AppError::Forbidden("Email not confirmed".to_string()),
            "refresh_token_not_found" | "refresh_token_already_used" | "session_not_found" => {
                AppError::Unauthorized("Invalid or expired refresh token".to_string())
            }
            _ => AppError::Unauthorized("Invalid login credentials".to_string()),
        };
    }

    tracing::error!("Auth backend token error: HTTP {} - {}", status, body);
    AppError::ExternalServiceError(format!("Auth backend error: HTTP {}", status))
}
