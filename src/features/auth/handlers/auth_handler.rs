use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::access::{clear_session_cookie, session_cookie};
use crate::features::auth::dtos::{
    AuthResponseDto, ForgotPasswordRequestDto, LoginRequestDto, MeResponseDto,
    RefreshTokenRequestDto, SessionTokensDto, SignupRequestDto, SignupResponseDto,
};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::AuthService;
use crate::shared::types::ApiResponse;
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use std::sync::Arc;
use validator::Validate;

fn cookie_headers(cookie: Option<HeaderValue>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Some(cookie) = cookie {
        headers.insert(header::SET_COOKIE, cookie);
    }
    headers
}

/// Register a new student
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequestDto,
    responses(
        (status = 201, description = "User registered successfully", body = ApiResponse<SignupResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    ),
    tag = "auth"
)]
pub async fn signup(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<SignupRequestDto>,
) -> Result<(StatusCode, HeaderMap, Json<ApiResponse<SignupResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = service.signup(dto).await?;
    let cookie = response.session.as_ref().and_then(|s| {
        session_cookie(service.session_cookie(), &s.access_token, s.expires_in)
    });

    let message = if response.session.is_some() {
        "Account created"
    } else {
        "Account created, check your email to confirm it"
    };

    Ok((
        StatusCode::CREATED,
        cookie_headers(cookie),
        Json(ApiResponse::success(
            Some(response),
            Some(message.to_string()),
            None,
        )),
    ))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful, session cookie set", body = ApiResponse<AuthResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Email not confirmed")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<(HeaderMap, Json<ApiResponse<AuthResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let auth_response = service.login(dto).await?;
    let cookie = session_cookie(
        service.session_cookie(),
        &auth_response.tokens.access_token,
        auth_response.tokens.expires_in,
    );

    Ok((
        cookie_headers(cookie),
        Json(ApiResponse::success(Some(auth_response), None, None)),
    ))
}

/// Refresh access token using refresh token
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    request_body = RefreshTokenRequestDto,
    responses(
        (status = 200, description = "Token refreshed successfully", body = ApiResponse<SessionTokensDto>),
        (status = 401, description = "Invalid or expired refresh token")
    ),
    tag = "auth"
)]
pub async fn refresh_token(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<RefreshTokenRequestDto>,
) -> Result<(HeaderMap, Json<ApiResponse<SessionTokensDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let tokens = service.refresh_token(dto).await?;
    let cookie = session_cookie(service.session_cookie(), &tokens.access_token, tokens.expires_in);

    Ok((
        cookie_headers(cookie),
        Json(ApiResponse::success(Some(tokens), None, None)),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Signed out, session cookie cleared"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn logout(
    user: AuthenticatedUser,
    State(service): State<Arc<AuthService>>,
) -> Result<(HeaderMap, Json<ApiResponse<()>>)> {
    service.logout(&user).await?;

    Ok((
        cookie_headers(clear_session_cookie(service.session_cookie())),
        Json(ApiResponse::success(
            None,
            Some("Signed out".to_string()),
            None,
        )),
    ))
}

/// Send a password reset email
#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    request_body = ForgotPasswordRequestDto,
    responses(
        (status = 200, description = "Reset email requested"),
        (status = 400, description = "Validation error")
    ),
    tag = "auth"
)]
pub async fn forgot_password(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<ForgotPasswordRequestDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.forgot_password(dto).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("If the address is registered, a reset link is on its way".to_string()),
        None,
    )))
}

/// Get current authenticated user info
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user retrieved successfully", body = ApiResponse<MeResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(
    user: AuthenticatedUser,
    State(service): State<Arc<AuthService>>,
) -> Result<Json<ApiResponse<MeResponseDto>>> {
    let user_data = service.me(&user).await?;
    Ok(Json(ApiResponse::success(Some(user_data), None, None)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::routes;
    use crate::features::auth::services::AuthSettings;
    use crate::shared::test_helpers::{FakeAuthProvider, InMemoryProfiles};
    use axum_test::TestServer;
    use serde_json::json;

    fn server(provider: Arc<FakeAuthProvider>) -> TestServer {
        let service = Arc::new(AuthService::new(
            provider,
            Arc::new(InMemoryProfiles::default()),
            AuthSettings::new("portal-access-token".to_string(), "http://localhost:3000"),
        ));
        TestServer::new(routes::public_routes(service)).unwrap()
    }

    #[tokio::test]
    async fn test_login_sets_http_only_cookie() {
        let server = server(Arc::new(FakeAuthProvider::default()));

        let response = server
            .post("/api/auth/login")
            .json(&json!({"email": "asha@college.edu", "password": "secret123"}))
            .await;

        response.assert_status_ok();
        let cookie = response.header(header::SET_COOKIE);
        let cookie = cookie.to_str().unwrap();
        assert!(cookie.starts_with("portal-access-token="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
    }

    #[tokio::test]
    async fn test_login_with_bad_credentials_sets_no_cookie() {
        let provider = Arc::new(FakeAuthProvider::default());
        provider.fail_next(AppError::Unauthorized("Invalid login credentials".to_string()));
        let server = server(provider);

        let response = server
            .post("/api/auth/login")
            .json(&json!({"email": "asha@college.edu", "password": "wrong"}))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        assert!(response.maybe_header(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_login_validation() {
        let server = server(Arc::new(FakeAuthProvider::default()));

        let response = server
            .post("/api/auth/login")
            .json(&json!({"email": "nope", "password": ""}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
