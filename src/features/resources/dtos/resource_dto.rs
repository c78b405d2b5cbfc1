use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::resources::models::{ResourceFilter, ResourceType};
use crate::shared::constants::{MAX_SEMESTER, MIN_SEMESTER};
use crate::shared::validation::non_blank;

/// Response DTO for resource
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResourceResponseDto {
    pub id: Uuid,
    pub title: String,
    pub branch: String,
    pub semester: i32,
    pub subject_code: String,
    /// Notes, Papers, Labs or Books
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Public URL of the stored file
    pub file_url: String,
    pub uploaded_by: Option<Uuid>,
    pub folder_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Catalog filters. Empty values are ignored.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ResourceListQuery {
    /// Exact branch name
    pub branch: Option<String>,
    /// Semester 1-8
    pub semester: Option<String>,
    /// Notes, Papers, Labs or Books
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
    /// Case-insensitive search in title or subject code
    pub q: Option<String>,
    /// Only resources in this folder
    pub folder_id: Option<String>,
}

impl ResourceListQuery {
    pub fn into_filter(self) -> Result<ResourceFilter> {
        let semester = match self.semester.as_deref().and_then(non_blank) {
            Some(raw) => Some(parse_semester(raw)?),
            None => None,
        };

        let resource_type = match self.resource_type.as_deref().and_then(non_blank) {
            Some(raw) => Some(parse_resource_type(raw)?),
            None => None,
        };

        let folder_id = match self.folder_id.as_deref().and_then(non_blank) {
            Some(raw) => Some(
                Uuid::parse_str(raw)
                    .map_err(|_| AppError::BadRequest(format!("Invalid folder_id: {}", raw)))?,
            ),
            None => None,
        };

        Ok(ResourceFilter {
            branch: self.branch.as_deref().and_then(non_blank).map(String::from),
            semester,
            resource_type,
            q: self.q.as_deref().and_then(non_blank).map(String::from),
            folder_id,
        })
    }
}

/// Admin management list: catalog filters plus a page number
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct AdminResourceListQuery {
    /// Page number (1-indexed, page size is fixed)
    #[param(minimum = 1)]
    pub page: Option<i64>,
    pub branch: Option<String>,
    pub semester: Option<String>,
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
    pub q: Option<String>,
    pub folder_id: Option<String>,
}

impl AdminResourceListQuery {
    pub fn into_parts(self) -> Result<(Option<i64>, ResourceFilter)> {
        let filter = ResourceListQuery {
            branch: self.branch,
            semester: self.semester,
            resource_type: self.resource_type,
            q: self.q,
            folder_id: self.folder_id,
        }
        .into_filter()?;
        Ok((self.page, filter))
    }
}

/// Request DTO for editing a resource
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateResourceDto {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 32, message = "Subject code must be 1-32 characters"))]
    pub subject_code: String,
}

/// Upload form for OpenAPI documentation.
/// The handler reads the multipart body directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadResourceForm {
    /// PDF, ZIP or Word document, at most 50 MB
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
    #[schema(example = "Thermo Notes")]
    pub title: String,
    #[schema(example = "Mechanical")]
    pub branch: String,
    #[schema(example = 3)]
    pub semester: i32,
    #[schema(example = "ME-301")]
    pub subject_code: String,
    /// Notes, Papers, Labs or Books
    #[schema(rename = "type", example = "Notes")]
    pub resource_type: String,
    pub folder_id: Option<Uuid>,
}

/// Validated upload ready for the service
#[derive(Debug, Clone)]
pub struct NewUpload {
    pub data: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
    pub title: String,
    pub branch: String,
    pub semester: i32,
    pub subject_code: String,
    pub resource_type: ResourceType,
    pub folder_id: Option<Uuid>,
}

/// Maximum upload size in bytes (50MB)
pub const MAX_FILE_SIZE: usize = 50 * 1024 * 1024;

/// Allowed MIME types for uploads
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/zip",
    "application/x-zip-compressed",
    DOC_MIME,
    DOCX_MIME,
];

const DOC_MIME: &str = "application/msword";
const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Resolve the stored content type of an upload.
///
/// Browsers sometimes send `application/octet-stream` for archives, so the
/// file extension decides in that case.
pub fn resolve_content_type(file_name: &str, content_type: &str) -> Option<&'static str> {
    let declared = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match declared.as_str() {
        "application/pdf" => return Some("application/pdf"),
        "application/zip" | "application/x-zip-compressed" | "application/x-zip" => {
            return Some("application/zip")
        }
        DOC_MIME => return Some(DOC_MIME),
        DOCX_MIME => return Some(DOCX_MIME),
        "" | "application/octet-stream" => {}
        _ => return None,
    }

    let extension = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    match extension.as_str() {
        "pdf" => Some("application/pdf"),
        "zip" => Some("application/zip"),
        "doc" => Some(DOC_MIME),
        "docx" => Some(DOCX_MIME),
        _ => None,
    }
}

pub fn parse_semester(raw: &str) -> Result<i32> {
    let semester = raw
        .trim()
        .parse::<i32>()
        .map_err(|_| AppError::Validation(format!("Invalid semester: {}", raw)))?;

    if !(MIN_SEMESTER..=MAX_SEMESTER).contains(&semester) {
        return Err(AppError::Validation(format!(
            "Semester must be between {} and {}",
            MIN_SEMESTER, MAX_SEMESTER
        )));
    }
    Ok(semester)
}

pub fn parse_resource_type(raw: &str) -> Result<ResourceType> {
    ResourceType::parse(raw).ok_or_else(|| {
        AppError::Validation(format!(
            "Invalid type '{}'. Allowed: Notes, Papers, Labs, Books",
            raw
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_values_are_ignored() {
        let query = ResourceListQuery {
            branch: Some("".to_string()),
            semester: Some(" ".to_string()),
            resource_type: None,
            q: Some("  ".to_string()),
            folder_id: Some("".to_string()),
        };
        assert!(query.into_filter().unwrap().is_empty());
    }

    #[test]
    fn test_query_into_filter() {
        let folder = Uuid::new_v4();
        let filter = ResourceListQuery {
            branch: Some("Mechanical".to_string()),
            semester: Some("3".to_string()),
            resource_type: Some("notes".to_string()),
            q: Some(" thermo ".to_string()),
            folder_id: Some(folder.to_string()),
        }
        .into_filter()
        .unwrap();

        assert_eq!(filter.branch.as_deref(), Some("Mechanical"));
        assert_eq!(filter.semester, Some(3));
        assert_eq!(filter.resource_type, Some(ResourceType::Notes));
        assert_eq!(filter.q.as_deref(), Some("thermo"));
        assert_eq!(filter.folder_id, Some(folder));
    }

    #[test]
    fn test_invalid_query_values() {
        let bad_semester = ResourceListQuery {
            semester: Some("9".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            bad_semester.into_filter(),
            Err(AppError::Validation(_))
        ));

        let bad_type = ResourceListQuery {
            resource_type: Some("Slides".to_string()),
            ..Default::default()
        };
        assert!(bad_type.into_filter().is_err());

        let bad_folder = ResourceListQuery {
            folder_id: Some("not-a-uuid".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            bad_folder.into_filter(),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_resolve_content_type() {
        assert_eq!(
            resolve_content_type("a.pdf", "application/pdf"),
            Some("application/pdf")
        );
        assert_eq!(
            resolve_content_type("a.zip", "application/x-zip-compressed"),
            Some("application/zip")
        );
        assert_eq!(
            resolve_content_type("labs.ZIP", "application/octet-stream"),
            Some("application/zip")
        );
        assert_eq!(resolve_content_type("a.png", "image/png"), None);
        assert_eq!(resolve_content_type("a.exe", "application/octet-stream"), None);
        assert!(ALLOWED_MIME_TYPES.contains(&"application/pdf"));
    }

    #[test]
    fn test_word_documents_are_accepted() {
        assert_eq!(
            resolve_content_type("notes.doc", "application/msword"),
            Some(DOC_MIME)
        );
        assert_eq!(
            resolve_content_type("notes.docx", DOCX_MIME),
            Some(DOCX_MIME)
        );
        assert_eq!(
            resolve_content_type("Lab Manual.DOCX", "application/octet-stream"),
            Some(DOCX_MIME)
        );
        assert_eq!(resolve_content_type("notes.doc", ""), Some(DOC_MIME));
        assert!(ALLOWED_MIME_TYPES.contains(&DOCX_MIME));
    }
}
