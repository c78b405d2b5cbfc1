use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use super::policy::{evaluate, GuardDecision, RoleLookup, Surface};
use super::session::extract_token;
use crate::core::error::AppError;
use crate::features::auth::JwtValidator;

/// Everything the route guard needs per request
pub struct RouteGuard {
    validator: Arc<JwtValidator>,
    roles: Arc<dyn RoleLookup>,
    cookie_name: String,
}

impl RouteGuard {
    pub fn new(
        validator: Arc<JwtValidator>,
        roles: Arc<dyn RoleLookup>,
        cookie_name: String,
    ) -> Self {
        Self {
            validator,
            roles,
            cookie_name,
        }
    }
}

/// Runs in front of every route.
///
/// Invalid or expired tokens are treated as "no session". Page requests get a
/// temporary redirect that keeps the original query string, API requests get
/// 401/403 in the usual error envelope.
pub async fn route_guard_middleware(
    State(guard): State<Arc<RouteGuard>>,
    mut req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();

    let user = extract_token(req.headers(), &guard.cookie_name).and_then(|token| {
        guard
            .validator
            .validate_token(&token)
            .map_err(|e| tracing::debug!("Ignoring session token: {}", e))
            .ok()
    });

    let outcome = evaluate(&path, user, guard.roles.as_ref()).await;

    if outcome.decision == GuardDecision::PassThrough {
        req.extensions_mut().insert(outcome.context);
        return next.run(req).await;
    }

    match Surface::of(&path) {
        Surface::Api => match outcome.decision {
            GuardDecision::RedirectToLogin => {
                AppError::Unauthorized("Authentication required".to_string()).into_response()
            }
            _ => AppError::Forbidden("Admin access required".to_string()).into_response(),
        },
        Surface::Page => {
            let target = outcome.decision.redirect_target().unwrap_or("/");
            let location = match req.uri().query() {
                Some(query) => format!("{}?{}", target, query),
                None => target.to_string(),
            };
            tracing::debug!("Redirecting {} to {}", path, location);
            Redirect::temporary(&location).into_response()
        }
    }
}
