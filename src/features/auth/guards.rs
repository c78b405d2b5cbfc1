//! Role-based authorization guards.
//!
//! The route guard middleware resolves the session user and, for admin
//! paths, the user's role exactly once per request and stores the result
//! as an [`AccessContext`]. These extractors only read that context; they
//! never look the role up again.
//!
//! Roles:
//! - admin: manages resources, branches, folders and notifications
//! - student: browses the catalog and manages their own profile

use crate::core::error::AppError;
use crate::features::access::AccessContext;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for admin-only handlers.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let context = parts
            .extensions
            .get::<AccessContext>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        let user = context
            .user
            .as_ref()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !context.is_admin() {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(RequireAdmin(user.clone()))
    }
}
