//! Local filesystem adapter for fly.
//!
//! [`LocalAdapter`] implements the [`fly_core::Adapter`] contract on top of
//! `std::fs`, scoped to a root directory. Blocking calls are moved to tokio's
//! blocking thread pool.
//!
//! # Example
//!
//! ```no_run
//! use fly_core::Adapter;
//! use fly_local::LocalAdapter;
//!
//! # #[tokio::main]
//! # async fn main() -> fly_core::Result<()> {
//! let fs = LocalAdapter::new("/tmp/fly");
//! fs.put("test/hello.txt", b"Hello, world!").await?;
//! assert_eq!(fs.mime_type("test/hello.txt").await?, "text/plain");
//! # Ok(())
//! # }
//! ```

mod native;

pub use native::LocalAdapter;
