//! Adapter trait for storage-agnostic file operations.

use crate::error::{Error, Result};
use crate::options::{CreateDirOptions, WriteOptions};

/// Storage backend contract.
///
/// Every operation works on whole files: content is read into memory and
/// written from memory in one call. Paths are slash-delimited strings that
/// each backend interprets (see the backend crates).
///
/// # Design Decisions
///
/// ## Composite operations
///
/// [`rename`](Adapter::rename) and [`read_and_delete`](Adapter::read_and_delete)
/// are provided methods built from the primitives, so every backend composes
/// them identically. They are **not atomic**: a failure between the two steps
/// leaves the backend in the intermediate state and the error says which step
/// failed. Nothing is rolled back and nothing is retried.
///
/// ## Existence checks
///
/// [`has`](Adapter::has) and [`has_dir`](Adapter::has_dir) return `Ok(false)`
/// when the target is absent. Any other probe failure (permission denied,
/// network error) is returned as `Err`, on every backend.
///
/// ## Concurrency
///
/// Adapters hold no mutable state. One instance may serve concurrent calls
/// for different paths; races on the same path are settled by the backend.
#[async_trait::async_trait]
pub trait Adapter: Send + Sync {
    /// Ensure a directory exists. Idempotent.
    async fn create_dir(&self, path: &str, options: &CreateDirOptions) -> Result<()>;

    /// Copy a file to a new path, overwriting the destination.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `src` does not exist.
    async fn copy(&self, src: &str, dst: &str) -> Result<()>;

    /// Remove a file.
    ///
    /// Whether removing an absent file is an error depends on the backend.
    async fn delete(&self, path: &str) -> Result<()>;

    /// Remove a directory.
    async fn delete_dir(&self, path: &str) -> Result<()>;

    /// Check whether a file exists.
    async fn has(&self, path: &str) -> Result<bool>;

    /// Check whether a directory exists.
    async fn has_dir(&self, path: &str) -> Result<bool>;

    /// Content type of a file, or an empty string if unknown.
    async fn mime_type(&self, path: &str) -> Result<String>;

    /// Read the full content of a file.
    async fn read(&self, path: &str) -> Result<Vec<u8>>;

    /// Create or overwrite a file, creating its parent directory if needed.
    async fn write(&self, path: &str, contents: &[u8], options: &WriteOptions) -> Result<()>;

    /// Read a file and then delete it.
    ///
    /// # Errors
    ///
    /// If the read succeeds but the delete fails, returns
    /// [`Error::DeleteAfterRead`] carrying the content that was read. The
    /// file is left in place.
    async fn read_and_delete(&self, path: &str) -> Result<Vec<u8>> {
        let content = self.read(path).await?;

        match self.delete(path).await {
            Ok(()) => Ok(content),
            Err(source) => Err(Error::DeleteAfterRead {
                path: path.to_string(),
                content,
                source: Box::new(source),
            }),
        }
    }

    /// Move a file by copying it and deleting the source.
    ///
    /// Not atomic. If the delete fails, both `src` and `dst` exist and the
    /// delete error is returned.
    async fn rename(&self, src: &str, dst: &str) -> Result<()> {
        self.copy(src, dst).await?;
        self.delete(src).await
    }

    /// Read a file as UTF-8 text.
    ///
    /// Invalid UTF-8 is reported as an [`Error::Io`] of kind `InvalidData`.
    async fn read_to_string(&self, path: &str) -> Result<String> {
        let bytes = self.read(path).await?;
        String::from_utf8(bytes)
            .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }

    /// Write with default options.
    async fn put(&self, path: &str, contents: &[u8]) -> Result<()> {
        self.write(path, contents, &WriteOptions::default()).await
    }
}
