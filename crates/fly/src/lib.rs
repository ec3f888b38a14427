//! Storage-agnostic file operations.
//!
//! [`Filesystem`] forwards every call to one adapter chosen at construction,
//! either directly or from a [`FlyConfig`] loaded from TOML:
//!
//! ```toml
//! [backend]
//! kind = "s3"
//! bucket = "assets"
//! region = "eu-north-1"
//! prefix = "site"
//! ```
//!
//! # Example
//!
//! ```no_run
//! use fly::{Adapter, Filesystem, LocalAdapter};
//!
//! # #[tokio::main]
//! # async fn main() -> fly::Result<()> {
//! let fs = Filesystem::new(LocalAdapter::new("/tmp/fly"));
//! fs.put("test/hello.txt", b"Hello, world!").await?;
//! fs.rename("test/hello.txt", "test/hello-moved.txt").await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
mod filesystem;

pub use config::{BackendConfig, ConfigError, FlyConfig, S3Config};
pub use filesystem::Filesystem;

pub use fly_core::{mime, path, Adapter, CreateDirOptions, Error, Result, WriteOptions};
pub use fly_local::LocalAdapter;
pub use fly_s3::{BucketClient, MemoryObjectStore, ObjectStoreClient, S3Adapter};
