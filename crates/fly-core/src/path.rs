//! Path helpers shared by the adapters.
//!
//! Paths handed to an adapter are slash-delimited strings. The local adapter
//! resolves them against its root directory with [`resolve`]; the object
//! store uses them as keys via [`object_key`]. A trailing slash marks a
//! directory on backends without native directories, see [`dir_key`].

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Normalize a relative path syntactically.
///
/// Empty and `.` segments are dropped, `..` pops the previous segment. A
/// leading `/` is treated as relative to the root. The result never has a
/// leading or trailing slash; the root itself is the empty string.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if `..` would climb above the root.
pub fn normalize(path: &str) -> Result<String> {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(Error::InvalidPath {
                        path: path.to_string(),
                        reason: "path escapes the adapter root".to_string(),
                    });
                }
            }
            name => segments.push(name),
        }
    }

    Ok(segments.join("/"))
}

/// Resolve `path` against a filesystem root.
pub fn resolve(root: &Path, path: &str) -> Result<PathBuf> {
    let normalized = normalize(path)?;
    if normalized.is_empty() {
        return Ok(root.to_path_buf());
    }
    Ok(root.join(normalized))
}

/// Force a single trailing slash, the directory form of a path.
pub fn dir_key(path: &str) -> String {
    format!("{}/", path.trim_end_matches('/'))
}

/// Build an object key from an optional prefix and a path.
///
/// Leading slashes are dropped so `/a/b` and `a/b` name the same object. A
/// trailing slash is preserved since it distinguishes directory markers.
pub fn object_key(prefix: &str, path: &str) -> String {
    let prefix = prefix.trim_matches('/');
    let path = path.trim_start_matches('/');

    if prefix.is_empty() {
        path.to_string()
    } else if path.is_empty() {
        format!("{prefix}/")
    } else {
        format!("{prefix}/{path}")
    }
}

/// Extension of the last path segment, without the dot.
///
/// A path ending in `/` has no extension. Dot-files such as `.env` have no
/// extension either.
pub fn extension(path: &str) -> Option<&str> {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(0) | None => None,
        Some(idx) => Some(&name[idx + 1..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_drops_noise() {
        assert_eq!(normalize("a//b/./c/").unwrap(), "a/b/c");
        assert_eq!(normalize("/a/b").unwrap(), "a/b");
        assert_eq!(normalize("a/b/../c").unwrap(), "a/c");
        assert_eq!(normalize("").unwrap(), "");
        assert_eq!(normalize("./").unwrap(), "");
    }

    #[test]
    fn normalize_rejects_escape() {
        for path in ["..", "../etc/passwd", "a/../../b", "foo/../../bar/../../baz"] {
            let err = normalize(path).unwrap_err();
            assert!(matches!(err, Error::InvalidPath { .. }), "{path} not rejected");
        }
    }

    #[test]
    fn resolve_joins_onto_root() {
        let root = Path::new("/srv/data");
        assert_eq!(resolve(root, "test/hello.txt").unwrap(), root.join("test/hello.txt"));
        assert_eq!(resolve(root, "").unwrap(), root);
        assert!(resolve(root, "../x").is_err());
    }

    #[test]
    fn dir_key_forces_one_slash() {
        assert_eq!(dir_key("test/folder"), "test/folder/");
        assert_eq!(dir_key("test/folder///"), "test/folder/");
        assert_eq!(dir_key(""), "/");
    }

    #[test]
    fn object_key_handles_prefix() {
        assert_eq!(object_key("", "/test/hello.txt"), "test/hello.txt");
        assert_eq!(object_key("root/", "test/folder/"), "root/test/folder/");
        assert_eq!(object_key("/root", ""), "root/");
    }

    #[test]
    fn extension_of_last_segment() {
        assert_eq!(extension("test/hello.txt"), Some("txt"));
        assert_eq!(extension("archive.tar.gz"), Some("gz"));
        assert_eq!(extension("dir.d/file"), None);
        assert_eq!(extension("test/folder/"), None);
        assert_eq!(extension(".env"), None);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn normalize_is_idempotent(path in r"[a-z./]{0,24}") {
                if let Ok(once) = normalize(&path) {
                    prop_assert_eq!(normalize(&once).unwrap(), once.clone());
                }
            }

            #[test]
            fn normalized_paths_never_climb(path in r"[a-z./]{0,24}") {
                if let Ok(normalized) = normalize(&path) {
                    prop_assert!(!normalized.split('/').any(|s| s == ".." || s == "."));
                    prop_assert!(!normalized.starts_with('/'));
                }
            }
        }
    }
}
