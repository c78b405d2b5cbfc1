//! Object storage for uploaded resource files
//!
//! The backend's storage service speaks the S3 protocol; uploads land in a
//! single public bucket and are addressed by their public URL.

mod object_store;
mod s3_client;

pub use object_store::{generate_object_key, key_from_url, ObjectStore};
pub use s3_client::StorageClient;
