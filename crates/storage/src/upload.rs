//! Presigned uploads and image cleanup

use crate::object_store::ObjectStore;
use crate::{Result, StorageError};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;
use uuid::Uuid;

/// Lifetime of a presigned upload URL
pub const PRESIGN_EXPIRY: Duration = Duration::from_secs(15 * 60);

pub const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

/// Presigned upload returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresignedUpload {
    pub presigned_url: String,
    pub public_url: String,
    pub key: String,
}

/// Unique object key for an uploaded file: `{stem}_{8 hex chars}{.ext}`
///
/// Directory components of `filename` are dropped.
pub fn object_key_for(filename: &str) -> String {
    let name = filename
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(filename);

    let (stem, ext) = match name.rfind('.') {
        Some(idx) => name.split_at(idx),
        None => (name, ""),
    };

    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}_{}{}", stem, &suffix[..8], ext)
}

/// `scheme://host[:port]` of a public base URL
///
/// Bare hosts are treated as `http`.
fn public_origin(base: &str) -> String {
    [base.to_string(), format!("http://{}", base)]
        .iter()
        .filter_map(|candidate| Url::parse(candidate).ok())
        .map(|url| url.origin())
        .find(|origin| origin.is_tuple())
        .map(|origin| origin.ascii_serialization())
        .unwrap_or_else(|| base.trim_end_matches('/').to_string())
}

/// Removal of images the catalog uploaded itself
#[async_trait]
pub trait ImageCleanup: Send + Sync {
    /// Whether `reference` points into the managed bucket
    fn owns(&self, reference: &str) -> bool;

    /// Delete the object behind `reference`
    async fn remove_image(&self, reference: &str) -> Result<()>;
}

/// Upload service over an [`ObjectStore`]
pub struct UploadService {
    store: Arc<dyn ObjectStore>,
    public_origin: String,
}

impl UploadService {
    /// `public_base_url` is the browser-facing base; only its origin is used
    pub fn new(store: Arc<dyn ObjectStore>, public_base_url: &str) -> Self {
        Self {
            store,
            public_origin: public_origin(public_base_url),
        }
    }

    pub fn bucket(&self) -> &str {
        self.store.bucket()
    }

    /// Public read URL for `key`
    pub fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.public_origin, self.bucket(), key)
    }

    /// Issue a presigned PUT for a fresh key derived from `filename`
    ///
    /// # Errors
    ///
    /// Fails with `InvalidRequest` when `filename` is blank.
    pub async fn presign(
        &self,
        filename: &str,
        content_type: Option<&str>,
    ) -> Result<PresignedUpload> {
        let filename = filename.trim();
        if filename.is_empty() {
            return Err(StorageError::InvalidRequest("filename is required".into()));
        }

        let content_type = content_type
            .map(str::trim)
            .filter(|ct| !ct.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE);

        let key = object_key_for(filename);
        let presigned_url = self
            .store
            .presign_put(&key, content_type, PRESIGN_EXPIRY)
            .await?;
        let public_url = self.public_url(&key);

        info!(
            filename,
            key = %key,
            expiry_secs = PRESIGN_EXPIRY.as_secs(),
            "Generated presigned URL"
        );

        Ok(PresignedUpload {
            presigned_url,
            public_url,
            key,
        })
    }

    /// Object key behind a bare key or a full URL
    ///
    /// Takes the last path segment, drops any query string and a leading
    /// `{bucket}/`.
    pub fn object_key_from_reference(&self, reference: &str) -> String {
        let segment = if reference.contains("http") {
            reference.rsplit('/').next().unwrap_or(reference)
        } else {
            reference
        };
        let segment = segment.split('?').next().unwrap_or(segment);
        let bucket_prefix = format!("{}/", self.bucket());
        segment
            .strip_prefix(bucket_prefix.as_str())
            .unwrap_or(segment)
            .to_string()
    }

    /// Delete an object by key or URL
    pub async fn delete(&self, reference: &str) -> Result<()> {
        let key = self.object_key_from_reference(reference);
        if key.is_empty() {
            return Err(StorageError::InvalidRequest("object key is required".into()));
        }

        self.store.delete_object(&key).await?;
        info!(key = %key, "File deleted from object store");
        Ok(())
    }
}

#[async_trait]
impl ImageCleanup for UploadService {
    fn owns(&self, reference: &str) -> bool {
        reference.contains("http") && reference.contains(self.bucket())
    }

    async fn remove_image(&self, reference: &str) -> Result<()> {
        self.delete(reference).await.map_err(|e| {
            warn!(reference, error = %e, "Failed to delete image");
            e
        })
    }
}
