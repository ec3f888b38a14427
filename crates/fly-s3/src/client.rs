//! Object-store client seam.

use fly_core::Result;

/// Response to a successful put.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PutObjectOutput {
    /// Integrity tag assigned by the store, if it returned one.
    pub etag: Option<String>,
}

/// Object body and metadata returned by a get.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetObjectOutput {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

/// Object metadata returned by a head request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadObjectOutput {
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub etag: Option<String>,
}

/// Minimal object-store API used by [`S3Adapter`](crate::S3Adapter).
///
/// Implementations must report a missing object as
/// [`fly_core::Error::NotFound`] and any other failure as
/// [`fly_core::Error::Backend`]. Deleting a missing key may succeed.
#[async_trait::async_trait]
pub trait ObjectStoreClient: Send + Sync {
    /// Upload a complete object in one request.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<PutObjectOutput>;

    /// Fetch a complete object.
    async fn get_object(&self, bucket: &str, key: &str) -> Result<GetObjectOutput>;

    /// Fetch object metadata without the body.
    async fn head_object(&self, bucket: &str, key: &str) -> Result<HeadObjectOutput>;

    /// Remove an object.
    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()>;

    /// Server-side copy of `bucket/src_key` to `bucket/dst_key`.
    async fn copy_object(&self, bucket: &str, src_key: &str, dst_key: &str) -> Result<()>;
}
