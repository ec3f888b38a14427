//! Storage adapter contract for fly.
//!
//! This crate defines the [`Adapter`] trait that every storage backend
//! implements, together with the pieces both backends share: the error
//! taxonomy, per-operation option structs, path normalization, and the
//! static extension → MIME table.
//!
//! Backends live in their own crates:
//!
//! - `fly-local`: hierarchical filesystem rooted at a base directory
//! - `fly-s3`: S3-compatible object store with emulated directories
//!
//! # Example
//!
//! ```no_run
//! use fly_core::{Adapter, WriteOptions};
//!
//! async fn stash(adapter: &dyn Adapter) -> fly_core::Result<()> {
//!     adapter
//!         .write("notes/today.txt", b"remember the milk", &WriteOptions::default())
//!         .await?;
//!     let content = adapter.read_and_delete("notes/today.txt").await?;
//!     assert_eq!(content, b"remember the milk");
//!     Ok(())
//! }
//! ```

mod adapter;
mod error;
pub mod mime;
mod options;
pub mod path;

pub use adapter::Adapter;
pub use error::{Error, Result};
pub use options::{CreateDirOptions, WriteOptions, DEFAULT_DIR_MODE, DEFAULT_FILE_MODE};
