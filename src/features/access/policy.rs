//! Per-request access policy.
//!
//! Order of checks:
//! 1. protected path without a session user -> login
//! 2. session user on a pure auth page -> dashboard
//! 3. session user on an admin path -> role lookup, non-admin -> dashboard
//! 4. everything else passes through
//!
//! Check 1 runs before check 3, so anonymous admin requests never trigger a
//! role lookup. Nothing is cached between requests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::access::model::{AccessContext, Role};
use crate::features::auth::model::AuthenticatedUser;

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";

const AUTH_PAGES: &[&str] = &["/login", "/signup"];

const PROTECTED_PREFIXES: &[&str] = &[
    "/dashboard",
    "/profile",
    "/api/profile",
    "/api/resources",
    "/api/folders",
    "/api/auth/me",
    "/api/auth/logout",
];

const ADMIN_PREFIXES: &[&str] = &["/admin", "/api/admin"];

/// Point read of a user's portal role
#[async_trait]
pub trait RoleLookup: Send + Sync {
    async fn role_of(&self, user_id: Uuid) -> Result<Option<Role>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Public,
    AuthPage,
    Protected,
    Admin,
}

impl RouteClass {
    pub fn of(path: &str) -> Self {
        if ADMIN_PREFIXES.iter().any(|p| under_prefix(path, p)) {
            RouteClass::Admin
        } else if PROTECTED_PREFIXES.iter().any(|p| under_prefix(path, p)) {
            RouteClass::Protected
        } else if AUTH_PAGES.contains(&path) {
            RouteClass::AuthPage
        } else {
            RouteClass::Public
        }
    }

    pub fn requires_session(&self) -> bool {
        matches!(self, RouteClass::Protected | RouteClass::Admin)
    }
}

/// Whether a request targets the JSON API or a browser page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Page,
    Api,
}

impl Surface {
    pub fn of(path: &str) -> Self {
        if under_prefix(path, "/api") {
            Surface::Api
        } else {
            Surface::Page
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    PassThrough,
    RedirectToLogin,
    RedirectToDashboard,
}

impl GuardDecision {
    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            GuardDecision::PassThrough => None,
            GuardDecision::RedirectToLogin => Some(LOGIN_PATH),
            GuardDecision::RedirectToDashboard => Some(DASHBOARD_PATH),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GuardOutcome {
    pub decision: GuardDecision,
    pub context: AccessContext,
}

impl GuardOutcome {
    fn pass(context: AccessContext) -> Self {
        Self {
            decision: GuardDecision::PassThrough,
            context,
        }
    }

    fn redirect(decision: GuardDecision, context: AccessContext) -> Self {
        Self { decision, context }
    }
}

/// Decide what happens to a request for `path` made by `user`
pub async fn evaluate(
    path: &str,
    user: Option<AuthenticatedUser>,
    roles: &dyn RoleLookup,
) -> GuardOutcome {
    let class = RouteClass::of(path);

    let Some(user) = user else {
        if class.requires_session() {
            return GuardOutcome::redirect(
                GuardDecision::RedirectToLogin,
                AccessContext::anonymous(),
            );
        }
        return GuardOutcome::pass(AccessContext::anonymous());
    };

    match class {
        RouteClass::AuthPage => GuardOutcome::redirect(
            GuardDecision::RedirectToDashboard,
            AccessContext {
                user: Some(user),
                role: None,
            },
        ),
        RouteClass::Admin => {
            let role = match roles.role_of(user.id).await {
                Ok(role) => role,
                Err(e) => {
                    tracing::warn!("Role lookup failed for user {}: {}", user.id, e);
                    None
                }
            };

            let context = AccessContext {
                user: Some(user),
                role,
            };

            if role == Some(Role::Admin) {
                GuardOutcome::pass(context)
            } else {
                GuardOutcome::redirect(GuardDecision::RedirectToDashboard, context)
            }
        }
        RouteClass::Protected | RouteClass::Public => GuardOutcome::pass(AccessContext {
            user: Some(user),
            role: None,
        }),
    }
}

/// Segment-aware prefix match: `/admin` matches `/admin` and `/admin/x`, not `/administrator`
fn under_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
