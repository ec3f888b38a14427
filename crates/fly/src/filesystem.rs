//! Facade over a single adapter.

use crate::config::{BackendConfig, ConfigError, FlyConfig};
use fly_core::{Adapter, CreateDirOptions, Result, WriteOptions};
use fly_local::LocalAdapter;
use fly_s3::{BucketClient, S3Adapter};
use std::fmt;
use std::sync::Arc;

/// Storage-agnostic filesystem.
///
/// Forwards every operation to the adapter it was built with, options
/// included. Cloning is cheap and shares the adapter.
#[derive(Clone)]
pub struct Filesystem {
    adapter: Arc<dyn Adapter>,
    backend: &'static str,
}

impl Filesystem {
    /// Wrap a concrete adapter.
    pub fn new<A: Adapter + 'static>(adapter: A) -> Self {
        Self {
            adapter: Arc::new(adapter),
            backend: std::any::type_name::<A>(),
        }
    }

    /// Build the adapter a configuration describes.
    pub fn from_config(config: &FlyConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;

        let fs = match &config.backend {
            BackendConfig::Local { root } => Self::new(LocalAdapter::new(root)),
            BackendConfig::S3(s3) => {
                let client = BucketClient::from_settings(&s3.bucket_settings())?;
                let adapter = S3Adapter::new(Arc::new(client), &s3.bucket).with_prefix(&s3.prefix);
                Self::new(adapter)
            }
        };
        Ok(fs)
    }

    /// The wrapped adapter.
    pub fn adapter(&self) -> &dyn Adapter {
        self.adapter.as_ref()
    }

    /// Type name of the wrapped adapter, for diagnostics.
    pub fn backend_name(&self) -> &'static str {
        self.backend
    }
}

impl fmt::Debug for Filesystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filesystem")
            .field("backend", &self.backend)
            .finish()
    }
}

#[async_trait::async_trait]
impl Adapter for Filesystem {
    async fn create_dir(&self, path: &str, options: &CreateDirOptions) -> Result<()> {
        self.adapter.create_dir(path, options).await
    }

    async fn copy(&self, src: &str, dst: &str) -> Result<()> {
        self.adapter.copy(src, dst).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        self.adapter.delete(path).await
    }

    async fn delete_dir(&self, path: &str) -> Result<()> {
        self.adapter.delete_dir(path).await
    }

    async fn has(&self, path: &str) -> Result<bool> {
        self.adapter.has(path).await
    }

    async fn has_dir(&self, path: &str) -> Result<bool> {
        self.adapter.has_dir(path).await
    }

    async fn mime_type(&self, path: &str) -> Result<String> {
        self.adapter.mime_type(path).await
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>> {
        self.adapter.read(path).await
    }

    async fn write(&self, path: &str, contents: &[u8], options: &WriteOptions) -> Result<()> {
        self.adapter.write(path, contents, options).await
    }

    async fn read_and_delete(&self, path: &str) -> Result<Vec<u8>> {
        self.adapter.read_and_delete(path).await
    }

    async fn rename(&self, src: &str, dst: &str) -> Result<()> {
        self.adapter.rename(src, dst).await
    }
}
