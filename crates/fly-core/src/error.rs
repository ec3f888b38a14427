//! Error types shared by every adapter.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for adapter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by adapter operations.
///
/// Backend-native failures are carried unmodified in [`Error::Io`] (local
/// filesystem) or [`Error::Backend`] (object store).
#[derive(Debug, Error)]
pub enum Error {
    /// The probed, read, copied or deleted target does not exist.
    #[error("Not found: {path}")]
    NotFound {
        /// Path or key that was looked up.
        path: String,
    },

    /// A copy source or destination is a directory, socket or device.
    #[error("{} is not a regular file", path.display())]
    NotRegularFile {
        /// Resolved path of the offending entry.
        path: PathBuf,
    },

    /// The object store accepted a write but did not confirm it.
    #[error("Integrity check failed for {path}: {reason}")]
    IntegrityFailure {
        /// Key that was written.
        path: String,
        /// What confirmation was missing.
        reason: String,
    },

    /// The path cannot be resolved against the backend root.
    #[error("Invalid path {path:?}: {reason}")]
    InvalidPath {
        /// Path as given by the caller.
        path: String,
        /// Why it was rejected.
        reason: String,
    },

    /// `read_and_delete` read the content but could not delete the file.
    ///
    /// The content is kept so the caller can recover it; the file is still
    /// present in the backend.
    #[error("Read {path} but failed to delete it: {source}")]
    DeleteAfterRead {
        /// Path that was read.
        path: String,
        /// Content returned by the successful read.
        content: Vec<u8>,
        /// Why the delete failed.
        #[source]
        source: Box<Error>,
    },

    /// I/O error from the local filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error reported by an object-store client.
    #[error("Backend error ({backend}): {message}")]
    Backend {
        /// Name of the client that produced the error.
        backend: String,
        /// Error message from the client.
        message: String,
    },
}

impl Error {
    /// Create a `NotFound` error for a path or key.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create a `Backend` error.
    pub fn backend(backend: impl Into<String>, message: impl ToString) -> Self {
        Self::Backend {
            backend: backend.into(),
            message: message.to_string(),
        }
    }

    /// Whether this error reports an absent target.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Content that was read before a failed delete, if any.
    pub fn recovered_content(&self) -> Option<&[u8]> {
        match self {
            Self::DeleteAfterRead { content, .. } => Some(content),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_detected() {
        assert!(Error::not_found("a.txt").is_not_found());
        assert!(!Error::backend("memory", "boom").is_not_found());
    }

    #[test]
    fn recovered_content_only_on_delete_after_read() {
        let err = Error::DeleteAfterRead {
            path: "a.txt".to_string(),
            content: b"data".to_vec(),
            source: Box::new(Error::backend("memory", "denied")),
        };
        assert_eq!(err.recovered_content(), Some(&b"data"[..]));
        assert!(Error::not_found("a.txt").recovered_content().is_none());
    }

    #[test]
    fn display_includes_path() {
        let err = Error::NotRegularFile {
            path: PathBuf::from("/tmp/dev"),
        };
        assert_eq!(err.to_string(), "/tmp/dev is not a regular file");
    }
}
