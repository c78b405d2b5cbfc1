use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::auth::model::AuthenticatedUser;
use crate::shared::constants::{ROLE_ADMIN, ROLE_STUDENT};

/// Portal role stored on the profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Admin,
}

impl Role {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            ROLE_STUDENT => Some(Role::Student),
            ROLE_ADMIN => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => ROLE_STUDENT,
            Role::Admin => ROLE_ADMIN,
        }
    }
}

/// Authorization resolved once per request by the route guard.
///
/// `role` is only looked up when the request targets an admin path, so it
/// is `None` for ordinary requests even when a user is present.
#[derive(Debug, Clone, Default)]
pub struct AccessContext {
    pub user: Option<AuthenticatedUser>,
    pub role: Option<Role>,
}

impl AccessContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("student"), Some(Role::Student));
        assert_eq!(Role::parse("Admin"), None);
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::Admin.as_str(), "admin");
    }

    #[test]
    fn test_anonymous_context() {
        let ctx = AccessContext::anonymous();
        assert!(!ctx.is_authenticated());
        assert!(!ctx.is_admin());
    }
}
