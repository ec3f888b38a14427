//! Adapter backed by an object-store bucket.

use crate::client::ObjectStoreClient;
use fly_core::{mime, path, Adapter, CreateDirOptions, Error, Result, WriteOptions};
use std::fmt;
use std::sync::Arc;

/// Adapter for a single bucket of an S3-compatible object store.
///
/// Paths are object keys. Leading slashes are ignored, and an optional
/// prefix scopes every key below a fixed "root" inside the bucket.
///
/// # Backend behavior
///
/// - `write` puts the whole body with a `Content-Type` from the extension and
///   fails with [`Error::IntegrityFailure`] when the store returns no ETag.
///   No parent marker is created; `WriteOptions::mode` is ignored.
/// - `copy` is a server-side copy; no data passes through this process.
/// - `delete` of a missing key may succeed, depending on the store.
/// - `delete_dir` removes only the marker object, never the keys below it.
#[derive(Clone)]
pub struct S3Adapter {
    client: Arc<dyn ObjectStoreClient>,
    bucket: String,
    prefix: String,
}

impl S3Adapter {
    /// Create an adapter for `bucket` using `client`.
    pub fn new(client: Arc<dyn ObjectStoreClient>, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            prefix: String::new(),
        }
    }

    /// Scope every key below `prefix` inside the bucket.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Bucket every key lives in.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Key prefix, empty when unscoped.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Object key for a path.
    pub fn key(&self, path: &str) -> String {
        path::object_key(&self.prefix, path)
    }

    async fn upload(&self, key: &str, contents: &[u8], content_type: &str) -> Result<()> {
        let content_type = (!content_type.is_empty()).then_some(content_type);
        let output = self
            .client
            .put_object(&self.bucket, key, contents.to_vec(), content_type)
            .await?;

        match output.etag {
            Some(etag) if !etag.trim_matches('"').is_empty() => Ok(()),
            _ => Err(Error::IntegrityFailure {
                path: key.to_string(),
                reason: "no ETag returned for the written object".to_string(),
            }),
        }
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        match self.client.head_object(&self.bucket, key).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl fmt::Debug for S3Adapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3Adapter")
            .field("bucket", &self.bucket)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl Adapter for S3Adapter {
    async fn create_dir(&self, path: &str, _options: &CreateDirOptions) -> Result<()> {
        let key = self.key(&path::dir_key(path));
        tracing::debug!(bucket = %self.bucket, key = %key, "create_dir");

        self.upload(&key, &[], "").await
    }

    async fn copy(&self, src: &str, dst: &str) -> Result<()> {
        let src_key = self.key(src);
        let dst_key = self.key(dst);
        tracing::debug!(bucket = %self.bucket, src = %src_key, dst = %dst_key, "copy");

        self.client
            .copy_object(&self.bucket, &src_key, &dst_key)
            .await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let key = self.key(path);
        tracing::debug!(bucket = %self.bucket, key = %key, "delete");

        self.client.delete_object(&self.bucket, &key).await
    }

    async fn delete_dir(&self, path: &str) -> Result<()> {
        self.delete(&path::dir_key(path)).await
    }

    async fn has(&self, path: &str) -> Result<bool> {
        self.exists(&self.key(path)).await
    }

    async fn has_dir(&self, path: &str) -> Result<bool> {
        self.exists(&self.key(&path::dir_key(path))).await
    }

    async fn mime_type(&self, path: &str) -> Result<String> {
        let head = self.client.head_object(&self.bucket, &self.key(path)).await?;
        Ok(head.content_type.unwrap_or_default())
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>> {
        let object = self.client.get_object(&self.bucket, &self.key(path)).await?;
        Ok(object.body)
    }

    async fn write(&self, path: &str, contents: &[u8], _options: &WriteOptions) -> Result<()> {
        let key = self.key(path);
        tracing::debug!(bucket = %self.bucket, key = %key, bytes = contents.len(), "write");

        self.upload(&key, contents, mime::for_path(path)).await
    }
}
