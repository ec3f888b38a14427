//! In-memory object store.

use crate::client::{GetObjectOutput, HeadObjectOutput, ObjectStoreClient, PutObjectOutput};
use fly_core::{Error, Result};
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};

const BACKEND: &str = "memory";

#[derive(Debug, Clone)]
struct StoredObject {
    body: Vec<u8>,
    content_type: Option<String>,
    etag: String,
}

/// Object store held entirely in memory.
///
/// Buckets must be created before use; writing to an unknown bucket fails
/// the way a real store answers `NoSuchBucket`. Keys are kept sorted so
/// tests can assert on the exact key space, marker objects included.
///
/// # Thread Safety
///
/// Buckets live behind a `parking_lot::RwLock`; share the store with
/// `Arc` to hand it to an adapter and keep a handle for inspection.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    buckets: RwLock<HashMap<String, BTreeMap<String, StoredObject>>>,
    omit_etags: AtomicBool,
    fail_deletes: AtomicBool,
}

impl MemoryObjectStore {
    /// Create a store with no buckets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with one empty bucket.
    pub fn with_bucket(name: impl Into<String>) -> Self {
        let store = Self::new();
        store.create_bucket(name);
        store
    }

    /// Create an empty bucket. Existing buckets are left untouched.
    pub fn create_bucket(&self, name: impl Into<String>) {
        self.buckets.write().entry(name.into()).or_default();
    }

    /// All keys in a bucket, sorted. Empty for an unknown bucket.
    pub fn keys(&self, bucket: &str) -> Vec<String> {
        self.buckets
            .read()
            .get(bucket)
            .map(|objects| objects.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Stop returning ETags from puts, as a misbehaving store would.
    pub fn set_omit_etags(&self, omit: bool) {
        self.omit_etags.store(omit, Ordering::SeqCst);
    }

    /// Make every delete fail with a backend error.
    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    fn no_such_bucket(bucket: &str) -> Error {
        Error::backend(
            BACKEND,
            format!("NoSuchBucket: the specified bucket does not exist: {bucket}"),
        )
    }

    fn lookup(&self, bucket: &str, key: &str) -> Result<StoredObject> {
        let buckets = self.buckets.read();
        let objects = buckets
            .get(bucket)
            .ok_or_else(|| Self::no_such_bucket(bucket))?;
        objects
            .get(key)
            .cloned()
            .ok_or_else(|| Error::not_found(key))
    }
}

fn etag_for(body: &[u8]) -> String {
    let digest = hex::encode(Sha256::digest(body));
    format!("\"{}\"", &digest[..32])
}

#[async_trait::async_trait]
impl ObjectStoreClient for MemoryObjectStore {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<PutObjectOutput> {
        let etag = etag_for(&body);
        let mut buckets = self.buckets.write();
        let objects = buckets
            .get_mut(bucket)
            .ok_or_else(|| Self::no_such_bucket(bucket))?;

        objects.insert(
            key.to_string(),
            StoredObject {
                body,
                content_type: content_type.map(str::to_string),
                etag: etag.clone(),
            },
        );

        let etag = (!self.omit_etags.load(Ordering::SeqCst)).then_some(etag);
        Ok(PutObjectOutput { etag })
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<GetObjectOutput> {
        let object = self.lookup(bucket, key)?;
        Ok(GetObjectOutput {
            body: object.body,
            content_type: object.content_type,
        })
    }

    async fn head_object(&self, bucket: &str, key: &str) -> Result<HeadObjectOutput> {
        let object = self.lookup(bucket, key)?;
        Ok(HeadObjectOutput {
            content_type: object.content_type,
            content_length: Some(object.body.len() as u64),
            etag: Some(object.etag),
        })
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(Error::backend(BACKEND, format!("AccessDenied: delete {key}")));
        }

        let mut buckets = self.buckets.write();
        let objects = buckets
            .get_mut(bucket)
            .ok_or_else(|| Self::no_such_bucket(bucket))?;
        objects.remove(key);
        Ok(())
    }

    async fn copy_object(&self, bucket: &str, src_key: &str, dst_key: &str) -> Result<()> {
        let object = self.lookup(bucket, src_key)?;

        let mut buckets = self.buckets.write();
        let objects = buckets
            .get_mut(bucket)
            .ok_or_else(|| Self::no_such_bucket(bucket))?;
        objects.insert(dst_key.to_string(), object);
        Ok(())
    }
}
