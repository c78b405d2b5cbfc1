use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::AppError;

/// Minimal object store surface the resource lifecycle needs
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `data` under `key`
    async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<(), AppError>;

    async fn remove(&self, key: &str) -> Result<(), AppError>;

    /// Publicly reachable URL for `key`
    fn public_url(&self, key: &str) -> String;

    fn bucket_name(&self) -> String;
}

/// Object key for an upload: `<unix-millis>_<7 random chars>.<ext>`
///
/// The extension is taken from the original file name, lowercased. Names
/// without an extension get `bin`.
pub fn generate_object_key(original_filename: &str, unix_millis: i64) -> String {
    let extension = original_filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.trim().to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| "bin".to_string());

    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(7).collect();

    format!("{}_{}.{}", unix_millis, suffix, extension)
}

/// Storage key of a stored file, found after the first `/<bucket>/` in its URL
pub fn key_from_url(file_url: &str, bucket: &str) -> Option<String> {
    let marker = format!("/{}/", bucket);
    let (_, rest) = file_url.split_once(&marker)?;
    let key = rest.split(['?', '#']).next().unwrap_or_default();

    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_shape() {
        let key = generate_object_key("Thermo Notes.PDF", 1_700_000_000_000);
        let (stamp, rest) = key.split_once('_').unwrap();
        let (suffix, ext) = rest.split_once('.').unwrap();

        assert_eq!(stamp, "1700000000000");
        assert_eq!(suffix.len(), 7);
        assert_eq!(ext, "pdf");
    }

    #[test]
    fn test_object_key_without_extension() {
        assert!(generate_object_key("README", 1).ends_with(".bin"));
    }

    #[test]
    fn test_object_keys_differ() {
        assert_ne!(
            generate_object_key("a.zip", 42),
            generate_object_key("a.zip", 42)
        );
    }

    #[test]
    fn test_key_from_url() {
        let url = "https://x.example.co/storage/v1/object/public/eng-docs/1700_abcdefg.pdf";
        assert_eq!(
            key_from_url(url, "eng-docs").as_deref(),
            Some("1700_abcdefg.pdf")
        );
        assert_eq!(
            key_from_url("https://cdn.example.com/eng-docs/a/b.zip?download=1", "eng-docs")
                .as_deref(),
            Some("a/b.zip")
        );
        assert_eq!(key_from_url("https://elsewhere.com/file.pdf", "eng-docs"), None);
        assert_eq!(key_from_url("https://x.co/eng-docs/", "eng-docs"), None);
    }
}
