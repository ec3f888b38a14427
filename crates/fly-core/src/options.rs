//! Per-operation options.

/// Mode used for directories when none is given (before umask).
pub const DEFAULT_DIR_MODE: u32 = 0o777;

/// Mode used for new files when none is given (before umask).
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Options for [`Adapter::create_dir`](crate::Adapter::create_dir).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateDirOptions {
    /// Permission bits for every directory created (default: `0o777`).
    ///
    /// Only meaningful on unix filesystems. Object stores ignore it.
    pub mode: u32,
}

impl Default for CreateDirOptions {
    fn default() -> Self {
        Self {
            mode: DEFAULT_DIR_MODE,
        }
    }
}

impl CreateDirOptions {
    /// Options with a specific permission mode.
    pub fn with_mode(mode: u32) -> Self {
        Self { mode }
    }
}

/// Options for [`Adapter::write`](crate::Adapter::write).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Permission bits applied when the file is created (default: `0o644`).
    ///
    /// Existing files keep their mode. Object stores ignore it.
    pub mode: u32,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            mode: DEFAULT_FILE_MODE,
        }
    }
}

impl WriteOptions {
    /// Options with a specific permission mode.
    pub fn with_mode(mode: u32) -> Self {
        Self { mode }
    }
}
