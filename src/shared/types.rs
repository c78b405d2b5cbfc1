use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::shared::constants::{ADMIN_PAGE_SIZE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_previous: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_next: Option<bool>,
}

impl Meta {
    pub fn total(total: i64) -> Self {
        Self {
            total,
            page: None,
            has_previous: None,
            has_next: None,
        }
    }

    /// Previous/Next style paging metadata (no page jumping)
    pub fn paged(total: i64, page: i64, page_size: i64) -> Self {
        let page = page.max(1);
        Self {
            total,
            page: Some(page),
            has_previous: Some(page > 1),
            has_next: Some(page.saturating_mul(page_size) < total),
        }
    }
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Standard pagination query parameters for list endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PaginationQuery {
    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Number of items per page (default: 10, max: 100)
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationQuery {
    /// Fixed-size page used by the admin management view
    pub fn admin(page: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).clamp(1, i64::MAX / ADMIN_PAGE_SIZE),
            page_size: ADMIN_PAGE_SIZE,
        }
    }

    /// Calculate SQL OFFSET from page number
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1).saturating_mul(self.limit())
    }

    /// Get clamped page_size (respects MAX_PAGE_SIZE)
    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_offset_and_clamp() {
        let q = PaginationQuery {
            page: 3,
            page_size: 20,
        };
        assert_eq!(q.offset(), 40);

        let q = PaginationQuery {
            page: 0,
            page_size: 1000,
        };
        assert_eq!(q.limit(), MAX_PAGE_SIZE);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn test_paged_meta_previous_next() {
        let first = Meta::paged(25, 1, 10);
        assert_eq!(first.has_previous, Some(false));
        assert_eq!(first.has_next, Some(true));

        let last = Meta::paged(25, 3, 10);
        assert_eq!(last.has_previous, Some(true));
        assert_eq!(last.has_next, Some(false));

        let exact = Meta::paged(20, 2, 10);
        assert_eq!(exact.has_next, Some(false));
    }

    #[test]
    fn test_admin_page_is_fixed_size() {
        let q = PaginationQuery::admin(Some(2));
        assert_eq!(q.limit(), ADMIN_PAGE_SIZE);
        assert_eq!(q.offset(), ADMIN_PAGE_SIZE);
        assert_eq!(PaginationQuery::admin(None).page, 1);
    }

    #[test]
    fn test_huge_page_number_does_not_overflow() {
        let q = PaginationQuery::admin(Some(i64::MAX));
        assert!(q.offset() > 0);

        let q = PaginationQuery {
            page: i64::MAX,
            page_size: MAX_PAGE_SIZE,
        };
        assert_eq!(q.offset(), i64::MAX);

        let meta = Meta::paged(25, i64::MAX, 10);
        assert_eq!(meta.has_previous, Some(true));
        assert_eq!(meta.has_next, Some(false));
    }
}
