//! Adapter backed by the local filesystem.

use fly_core::{path, Adapter, CreateDirOptions, Error, Result, WriteOptions, DEFAULT_DIR_MODE};
use std::fs::{self, File, Metadata, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tokio::task;

/// Adapter for a directory tree on the local filesystem.
///
/// Every path is normalized and joined onto the root before use; paths that
/// climb above the root with `..` are rejected with [`Error::InvalidPath`].
/// The root itself does not need to exist until something is written.
///
/// # Directory removal
///
/// [`delete`](Adapter::delete) and [`delete_dir`](Adapter::delete_dir) share
/// one removal primitive: files are unlinked and directories are removed only
/// when empty. Deleting a non-empty directory fails with the I/O error from
/// the filesystem; there is no recursive delete. `delete_dir` refuses
/// anything that is not a directory with a `NotADirectory` I/O error.
#[derive(Debug, Clone)]
pub struct LocalAdapter {
    root: PathBuf,
}

impl LocalAdapter {
    /// Create an adapter rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The directory every path is resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        path::resolve(&self.root, path)
    }
}

#[async_trait::async_trait]
impl Adapter for LocalAdapter {
    async fn create_dir(&self, path: &str, options: &CreateDirOptions) -> Result<()> {
        let resolved = self.resolve(path)?;
        let mode = options.mode;
        tracing::debug!(path, mode, "create_dir");

        blocking(move || create_dir_all(&resolved, mode).map_err(Error::Io)).await
    }

    async fn copy(&self, src: &str, dst: &str) -> Result<()> {
        let src_path = self.resolve(src)?;
        let dst_path = self.resolve(dst)?;
        let src_label = src.to_string();
        tracing::debug!(src, dst, "copy");

        blocking(move || copy_file(&src_path, &dst_path, &src_label)).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let resolved = self.resolve(path)?;
        let label = path.to_string();
        tracing::debug!(path, "delete");

        blocking(move || remove_entry(&resolved, &label, false)).await
    }

    async fn delete_dir(&self, path: &str) -> Result<()> {
        let resolved = self.resolve(&path::dir_key(path))?;
        let label = path.to_string();
        tracing::debug!(path, "delete_dir");

        blocking(move || remove_entry(&resolved, &label, true)).await
    }

    async fn has(&self, path: &str) -> Result<bool> {
        let resolved = self.resolve(path)?;
        blocking(move || Ok(probe(&resolved)?.is_some_and(|meta| !meta.is_dir()))).await
    }

    async fn has_dir(&self, path: &str) -> Result<bool> {
        let resolved = self.resolve(&path::dir_key(path))?;
        blocking(move || Ok(probe(&resolved)?.is_some_and(|meta| meta.is_dir()))).await
    }

    async fn mime_type(&self, path: &str) -> Result<String> {
        Ok(fly_core::mime::for_path(path).to_string())
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>> {
        if !self.has(path).await? {
            return Err(Error::not_found(path));
        }

        let resolved = self.resolve(path)?;
        let label = path.to_string();
        blocking(move || fs::read(&resolved).map_err(|e| map_io(e, &label))).await
    }

    async fn write(&self, path: &str, contents: &[u8], options: &WriteOptions) -> Result<()> {
        let normalized = path::normalize(path)?;
        let parent = normalized
            .rsplit_once('/')
            .map(|(parent, _)| parent)
            .unwrap_or("");
        self.create_dir(parent, &CreateDirOptions::default()).await?;

        let resolved = self.resolve(&normalized)?;
        let contents = contents.to_vec();
        let mode = options.mode;
        tracing::debug!(path, bytes = contents.len(), mode, "write");

        blocking(move || write_file(&resolved, &contents, mode).map_err(Error::Io)).await
    }
}

/// Run a blocking filesystem closure on tokio's blocking pool.
async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(f)
        .await
        .map_err(|e| Error::Io(io::Error::new(io::ErrorKind::Other, e)))?
}

/// Map a missing target to [`Error::NotFound`], pass everything else through.
fn map_io(err: io::Error, path: &str) -> Error {
    if err.kind() == io::ErrorKind::NotFound {
        Error::not_found(path)
    } else {
        Error::Io(err)
    }
}

/// Stat a path, treating "absent" as `None`.
///
/// A path component that is a file (`ENOTDIR`) also means the target cannot
/// exist. Other failures, such as permission errors, are returned.
fn probe(path: &Path) -> Result<Option<Metadata>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta)),
        Err(e)
            if e.kind() == io::ErrorKind::NotFound || e.kind() == io::ErrorKind::NotADirectory =>
        {
            Ok(None)
        }
        Err(e) => Err(Error::Io(e)),
    }
}

fn create_dir_all(path: &Path, mode: u32) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    builder.create(path)
}

fn write_file(path: &Path, contents: &[u8], mode: u32) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.flush()
}

/// Copy a regular file, refusing sockets, devices and directories.
fn copy_file(src: &Path, dst: &Path, src_label: &str) -> Result<()> {
    let mut src_file = File::open(src).map_err(|e| map_io(e, src_label))?;
    if !src_file.metadata()?.is_file() {
        return Err(Error::NotRegularFile {
            path: src.to_path_buf(),
        });
    }

    // Creating the destination would truncate the source.
    if src == dst {
        return Ok(());
    }

    if let Some(parent) = dst.parent() {
        create_dir_all(parent, DEFAULT_DIR_MODE)?;
    }

    let mut dst_file = File::create(dst)?;
    if !dst_file.metadata()?.is_file() {
        return Err(Error::NotRegularFile {
            path: dst.to_path_buf(),
        });
    }

    io::copy(&mut src_file, &mut dst_file)?;
    Ok(())
}

/// Remove a file, or a directory if it is empty.
///
/// With `dir_only`, anything other than a directory is refused with an I/O
/// error of kind `NotADirectory` and left in place.
fn remove_entry(path: &Path, label: &str, dir_only: bool) -> Result<()> {
    let meta = fs::symlink_metadata(path).map_err(|e| map_io(e, label))?;

    if dir_only && !meta.is_dir() {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::NotADirectory,
            format!("{label} is not a directory"),
        )));
    }

    let removed = if meta.is_dir() {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    };
    removed.map_err(|e| map_io(e, label))
}
