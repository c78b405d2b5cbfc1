/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Page size of the admin resource management view
pub const ADMIN_PAGE_SIZE: i64 = 10;

/// Number of uploads shown on the admin dashboard
pub const RECENT_UPLOADS_LIMIT: i64 = 5;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

pub const ROLE_ADMIN: &str = "admin";

/// Role assigned to every account at signup
pub const ROLE_STUDENT: &str = "student";

// =============================================================================
// ACADEMIC CONSTANTS
// =============================================================================

pub const MIN_SEMESTER: i32 = 1;
pub const MAX_SEMESTER: i32 = 8;

/// Subject codes are free text, only the length is capped
pub const MAX_SUBJECT_CODE_LEN: usize = 32;

/// Folder color used when none is chosen
pub const DEFAULT_FOLDER_COLOR: &str = "#135bec";
