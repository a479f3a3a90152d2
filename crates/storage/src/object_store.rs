//! Object store access

use crate::{Result, StorageError};
use async_trait::async_trait;
use aws_sdk_s3::config::{BehaviorVersion, Builder, Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use movie_catalog_core::config::ObjectStoreConfig;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, info};

/// Bucket-level operations used by the upload service
#[async_trait]
pub trait ObjectStore: Send + Sync {
    fn bucket(&self) -> &str;

    /// Presigned PUT URL for `key`, valid for `expires_in`
    async fn presign_put(&self, key: &str, content_type: &str, expires_in: Duration)
        -> Result<String>;

    async fn delete_object(&self, key: &str) -> Result<()>;

    /// Create the bucket if missing and allow anonymous reads
    async fn ensure_public_bucket(&self) -> Result<()>;
}

/// Bucket policy granting anonymous `s3:GetObject` on every object
pub fn public_read_policy(bucket: &str) -> String {
    serde_json::json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Effect": "Allow",
            "Principal": { "AWS": ["*"] },
            "Action": ["s3:GetObject"],
            "Resource": [format!("arn:aws:s3:::{}/*", bucket)]
        }]
    })
    .to_string()
}

/// S3-compatible store (AWS or MinIO) with path-style addressing
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    pub fn new(config: &ObjectStoreConfig) -> Result<Self> {
        if config.endpoint.trim().is_empty() {
            return Err(StorageError::Config("object store endpoint is not set".into()));
        }

        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "movie-catalog",
        );

        let s3_config = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(config.endpoint_url())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        info!(
            endpoint = %config.endpoint_url(),
            bucket = %config.bucket,
            use_ssl = config.use_ssl,
            "Object store client initialized"
        );

        Ok(Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
        })
    }

    async fn bucket_exists(&self) -> Result<bool> {
        match self.client.head_bucket().bucket(&self.bucket).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                if err
                    .as_service_error()
                    .map(|e| e.is_not_found())
                    .unwrap_or(false)
                {
                    Ok(false)
                } else {
                    Err(StorageError::Bucket(format!(
                        "failed to check bucket existence: {}",
                        DisplayErrorContext(&err)
                    )))
                }
            }
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String> {
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| StorageError::Presign(e.to_string()))?;

        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(presigning)
            .await
            .map_err(|e| StorageError::Presign(DisplayErrorContext(&e).to_string()))?;

        Ok(request.uri().to_string())
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Delete(DisplayErrorContext(&e).to_string()))?;

        debug!(key, "Object deleted");
        Ok(())
    }

    async fn ensure_public_bucket(&self) -> Result<()> {
        if !self.bucket_exists().await? {
            self.client
                .create_bucket()
                .bucket(&self.bucket)
                .send()
                .await
                .map_err(|e| {
                    StorageError::Bucket(format!(
                        "failed to create bucket: {}",
                        DisplayErrorContext(&e)
                    ))
                })?;
            info!(bucket = %self.bucket, "Bucket created");
        }

        self.client
            .put_bucket_policy()
            .bucket(&self.bucket)
            .policy(public_read_policy(&self.bucket))
            .send()
            .await
            .map_err(|e| {
                StorageError::Bucket(format!(
                    "failed to set bucket policy: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        info!(bucket = %self.bucket, "Bucket policy set to public read");
        Ok(())
    }
}

/// In-process store that records calls instead of talking to a bucket
///
/// Presigned URLs point at `http://localhost:9000/{bucket}/{key}`.
pub struct RecordingObjectStore {
    bucket: String,
    fail_deletes: bool,
    deleted: Mutex<Vec<String>>,
    presigned: Mutex<Vec<(String, String)>>,
}

impl RecordingObjectStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            fail_deletes: false,
            deleted: Mutex::new(Vec::new()),
            presigned: Mutex::new(Vec::new()),
        }
    }

    /// Make every delete fail
    pub fn failing_deletes(mut self) -> Self {
        self.fail_deletes = true;
        self
    }

    /// Keys passed to `delete_object`, in call order
    pub fn deleted_keys(&self) -> Vec<String> {
        self.deleted
            .lock()
            .map(|keys| keys.clone())
            .unwrap_or_default()
    }

    /// `(key, content_type)` pairs passed to `presign_put`
    pub fn presigned_requests(&self) -> Vec<(String, String)> {
        self.presigned
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ObjectStore for RecordingObjectStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String> {
        if let Ok(mut requests) = self.presigned.lock() {
            requests.push((key.to_string(), content_type.to_string()));
        }
        Ok(format!(
            "http://localhost:9000/{}/{}?X-Amz-Expires={}",
            self.bucket,
            key,
            expires_in.as_secs()
        ))
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        if let Ok(mut deleted) = self.deleted.lock() {
            deleted.push(key.to_string());
        }
        if self.fail_deletes {
            return Err(StorageError::Delete(format!("object {} unavailable", key)));
        }
        Ok(())
    }

    async fn ensure_public_bucket(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_read_policy() {
        let policy: serde_json::Value = serde_json::from_str(&public_read_policy("movies")).unwrap();
        let statement = &policy["Statement"][0];
        assert_eq!(statement["Effect"], "Allow");
        assert_eq!(statement["Action"][0], "s3:GetObject");
        assert_eq!(statement["Resource"][0], "arn:aws:s3:::movies/*");
    }

    #[test]
    fn test_s3_store_requires_endpoint() {
        let config = ObjectStoreConfig::default();
        assert!(matches!(
            S3ObjectStore::new(&config),
            Err(StorageError::Config(_))
        ));
    }

    #[test]
    fn test_s3_store_builds_without_network() {
        let config = ObjectStoreConfig {
            endpoint: "localhost:9000".to_string(),
            access_key_id: "minio".to_string(),
            secret_access_key: "minio123".to_string(),
            use_ssl: false,
            ..ObjectStoreConfig::default()
        };
        let store = S3ObjectStore::new(&config).unwrap();
        assert_eq!(store.bucket(), "movies");
    }

    #[test]
    fn test_recording_store_failing_deletes() {
        let store = RecordingObjectStore::new("movies").failing_deletes();
        assert!(tokio_test::block_on(store.delete_object("a.jpg")).is_err());
        assert_eq!(store.deleted_keys(), vec!["a.jpg".to_string()]);
    }
}
