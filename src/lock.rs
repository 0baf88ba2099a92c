//! Cross-process exclusive lock for the todo data file.
//!
//! Cross-platform (fs2) advisory locks on a sidecar file `<data>.lock`:
//! - held for a whole load, save or update;
//! - blocks other processes (and other open file descriptions in this
//!   process) that lock the same path;
//! - never times out.
//!
//! The data file itself is not locked: atomic saves rename a new inode over
//! it, and a lock on the old inode would no longer exclude anyone.
//!
//! Lock is released on Drop.

use fs2::FileExt;
use log::debug;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::error::{IoContext, Result};

pub struct LockGuard {
    file: File,
    path: PathBuf,
}

impl LockGuard {
    fn new(file: File, path: PathBuf) -> Self {
        Self { file, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        // unlock errors on drop are ignored; closing the fd releases the lock anyway.
        let _ = self.file.unlock();
        debug!("released lock {}", self.path.display());
    }
}

fn open_lock_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .truncate(false)
        .open(path)
        .with_path("open lock file", path)
}

/// Acquire the exclusive lock at `path`. Blocks until acquired.
pub fn acquire_exclusive_lock(path: &Path) -> Result<LockGuard> {
    let file = open_lock_file(path)?;
    debug!("waiting for lock {}", path.display());
    file.lock_exclusive().with_path("lock_exclusive", path)?;
    debug!("acquired lock {}", path.display());
    Ok(LockGuard::new(file, path.to_path_buf()))
}

/// Try to acquire the exclusive lock at `path`. Returns Err if already locked.
pub fn try_acquire_exclusive_lock(path: &Path) -> Result<LockGuard> {
    let file = open_lock_file(path)?;
    file.try_lock_exclusive()
        .with_path("try_lock_exclusive", path)?;
    Ok(LockGuard::new(file, path.to_path_buf()))
}
