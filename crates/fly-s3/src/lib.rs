//! S3-compatible object store adapter for fly.
//!
//! [`S3Adapter`] implements the [`fly_core::Adapter`] contract against a
//! single bucket of a key/value object store. The store is reached through
//! the [`ObjectStoreClient`] trait, with two implementations:
//!
//! - [`MemoryObjectStore`]: in-process buckets for tests and embedding
//! - [`BucketClient`]: a real S3 endpoint via rust-s3 (feature `bucket`)
//!
//! # Directories
//!
//! Object stores have no directories. A directory is a zero-length
//! *marker object* whose key ends in `/`:
//!
//! - `create_dir("a/b")` puts an empty object at `a/b/`
//! - `has_dir("a/b")` heads `a/b/`
//! - `delete_dir("a/b")` deletes `a/b/` and nothing else
//!
//! Writing `a/b/c.txt` never creates `a/b/`, and deleting the marker leaves
//! `a/b/c.txt` in place. Recursive tree deletion is not supported.
//!
//! # Example
//!
//! ```
//! use fly_core::Adapter;
//! use fly_s3::{MemoryObjectStore, S3Adapter};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> fly_core::Result<()> {
//! let store = Arc::new(MemoryObjectStore::with_bucket("assets"));
//! let fs = S3Adapter::new(store.clone(), "assets");
//!
//! fs.put("test/hello.txt", b"Hello, world!").await?;
//! assert_eq!(fs.mime_type("test/hello.txt").await?, "text/plain");
//! # Ok(())
//! # }
//! ```

mod adapter;
#[cfg(feature = "bucket")]
mod bucket;
mod client;
mod memory;

pub use adapter::S3Adapter;
#[cfg(feature = "bucket")]
pub use bucket::{BucketClient, BucketSettings};
pub use client::{GetObjectOutput, HeadObjectOutput, ObjectStoreClient, PutObjectOutput};
pub use memory::MemoryObjectStore;
