//! # Movie Catalog Storage
//!
//! Poster and backdrop images live in an S3-compatible bucket (MinIO in
//! development). Browsers upload directly through presigned PUT URLs and read
//! through a public-read bucket policy.
//!
//! ## Modules
//!
//! - `object_store`: `ObjectStore` trait with the S3 client and a recording test double
//! - `upload`: object key generation, presigned uploads, public URLs and image cleanup

pub mod object_store;
pub mod upload;

pub use object_store::{public_read_policy, ObjectStore, RecordingObjectStore, S3ObjectStore};
pub use upload::{
    object_key_for, ImageCleanup, PresignedUpload, UploadService, DEFAULT_CONTENT_TYPE,
    PRESIGN_EXPIRY,
};

use movie_catalog_core::CatalogError;

/// Object storage errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("invalid upload request: {0}")]
    InvalidRequest(String),

    #[error("failed to generate presigned URL: {0}")]
    Presign(String),

    #[error("failed to delete file: {0}")]
    Delete(String),

    #[error("bucket setup failed: {0}")]
    Bucket(String),

    #[error("storage configuration error: {0}")]
    Config(String),
}

impl From<StorageError> for CatalogError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidRequest(msg) => CatalogError::Validation(msg),
            StorageError::Config(msg) => CatalogError::ConfigurationError {
                message: msg,
                key: None,
            },
            other => CatalogError::Storage(other.to_string()),
        }
    }
}

/// Result type alias for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_conversion() {
        let err: CatalogError = StorageError::InvalidRequest("filename is required".into()).into();
        assert!(matches!(err, CatalogError::Validation(_)));

        let err: CatalogError = StorageError::Delete("boom".into()).into();
        match err {
            CatalogError::Storage(msg) => assert_eq!(msg, "failed to delete file: boom"),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
