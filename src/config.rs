//! Store configuration.
//!
//! `StoreConfig` collects the few tunables of the file store in one place:
//! - path: data file (default `todo_data.csv` in the working directory);
//! - write_mode: how `save` commits rows (see `WriteMode`);
//! - fsync: whether committed data is synced to disk before the lock drops.
//!
//! The CLI uses `StoreConfig::default()`; tests and embedders override
//! fields with the fluent setters.

use std::fmt;
use std::path::{Path, PathBuf};

/// Default data file name, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "todo_data.csv";

/// Suffix of the sidecar lock file (`todo_data.csv.lock`).
pub const LOCK_SUFFIX: &str = "lock";

/// Suffix of the temp file used by `WriteMode::AtomicRename`.
pub const TMP_SUFFIX: &str = "tmp";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Write to `<path>.tmp`, then rename over `<path>`.
    /// A crash leaves either the old or the new file.
    #[default]
    AtomicRename,
    /// Truncate `<path>` and write in place.
    /// A crash mid-write can leave the file empty or partially written.
    InPlace,
}

#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Data file. Lock and temp files live next to it.
    pub path: PathBuf,

    pub write_mode: WriteMode,

    /// fsync data (and, in atomic mode, the parent dir) before releasing the lock.
    pub fsync: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATA_FILE),
            write_mode: WriteMode::AtomicRename,
            fsync: true,
        }
    }
}

impl StoreConfig {
    /// Default config pointing at `path`.
    pub fn for_path<P: AsRef<Path>>(path: P) -> Self {
        Self::default().with_path(path)
    }

    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.path = path.as_ref().to_path_buf();
        self
    }

    pub fn with_write_mode(mut self, mode: WriteMode) -> Self {
        self.write_mode = mode;
        self
    }

    pub fn with_fsync(mut self, on: bool) -> Self {
        self.fsync = on;
        self
    }

    /// `<path>.lock`
    pub fn lock_path(&self) -> PathBuf {
        sibling_with_suffix(&self.path, LOCK_SUFFIX)
    }

    /// `<path>.tmp`
    pub fn tmp_path(&self) -> PathBuf {
        sibling_with_suffix(&self.path, TMP_SUFFIX)
    }
}

/// Append `.suffix` to the full file name (`a.csv` -> `a.csv.lock`),
/// unlike `Path::with_extension` which would replace `csv`.
fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

impl fmt::Display for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StoreConfig {{ path: {}, write_mode: {:?}, fsync: {} }}",
            self.path.display(),
            self.write_mode,
            self.fsync
        )
    }
}
