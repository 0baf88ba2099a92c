//! File store: full-table load/save of the todo CSV file under an
//! exclusive cross-process lock.
//!
//! File format (no header, one row per todo, RFC 4180 quoting):
//!   id,description,completed,created_at_unix_seconds
//!
//! Policy:
//! - every load/save/update holds `<path>.lock` for its whole duration;
//! - load creates an absent data file and returns an empty table for it;
//! - save writes rows ascending by id (order carries no meaning);
//! - any I/O, lock, CSV or decode error aborts and propagates; no partial
//!   table is returned;
//! - `WriteMode::AtomicRename` commits via tmp+rename, `WriteMode::InPlace`
//!   truncates the data file and rewrites it (crash can leave it partial).

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use log::{debug, info, warn};

use crate::codec;
use crate::config::{StoreConfig, WriteMode};
use crate::error::{IoContext, Result, TodoError};
use crate::lock::{acquire_exclusive_lock, LockGuard};
use crate::table::TodoTable;

/// Directory holding `path`; a bare file name lives in ".".
#[cfg_attr(not(unix), allow(dead_code))]
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

#[cfg(unix)]
fn fsync_parent_dir(path: &Path) -> io::Result<()> {
    let dir = File::open(parent_dir(path))?;
    dir.sync_all()
}
#[cfg(not(unix))]
fn fsync_parent_dir(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[derive(Debug, Clone)]
pub struct FileStore {
    config: StoreConfig,
}

impl FileStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Store at `path` with default settings.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::new(StoreConfig::for_path(path))
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Read the whole table. Creates the data file if it does not exist.
    pub fn load(&self) -> Result<TodoTable> {
        let lk = self.lock()?;
        self.read_locked(&lk)
    }

    /// Replace the file contents with `table`.
    pub fn save(&self, table: &TodoTable) -> Result<()> {
        let lk = self.lock()?;
        self.write_locked(&lk, table)
    }

    /// Load, apply `f`, save; all under one lock acquisition, so no other
    /// process can write between the read and the write.
    ///
    /// If `f` fails the file is left untouched.
    pub fn update<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut TodoTable) -> Result<R>,
    {
        let lk = self.lock()?;
        let mut table = self.read_locked(&lk)?;
        let out = f(&mut table)?;
        self.write_locked(&lk, &table)?;
        Ok(out)
    }

    fn lock(&self) -> Result<LockGuard> {
        acquire_exclusive_lock(&self.config.lock_path())
    }

    // ----------------- under lock -----------------
    // The guard parameter is proof of holding the lock; it is only read for logging.

    fn read_locked(&self, lk: &LockGuard) -> Result<TodoTable> {
        let path = self.path();
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                OpenOptions::new()
                    .create(true)
                    .write(true)
                    .truncate(false)
                    .open(path)
                    .with_path("create", path)?;
                debug!("created empty data file {}", path.display());
                return Ok(TodoTable::new());
            }
            Err(e) => return Err(TodoError::io("open", path, e)),
        };

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            // field count is validated by the codec, which reports it as Format
            .flexible(true)
            .from_reader(file);

        let mut table = TodoTable::new();
        for rec in rdr.records() {
            let rec = rec.map_err(|e| TodoError::csv("read", path, e))?;
            let line = rec.position().map(|p| p.line()).unwrap_or_default();
            let log_err = |e: &TodoError| debug!("{}:{}: {}", path.display(), line, e);
            let (id, todo) = codec::decode(&rec).inspect_err(log_err)?;
            table.insert(id, todo).inspect_err(log_err)?;
        }

        debug!(
            "loaded {} todos from {} (lock {})",
            table.len(),
            path.display(),
            lk.path().display()
        );
        Ok(table)
    }

    fn write_locked(&self, lk: &LockGuard, table: &TodoTable) -> Result<()> {
        match self.config.write_mode {
            WriteMode::AtomicRename => self.write_atomic(table)?,
            WriteMode::InPlace => self.write_in_place(table)?,
        }
        info!(
            "saved {} todos; {} (lock {})",
            table.len(),
            self.config,
            lk.path().display()
        );
        Ok(())
    }

    fn write_atomic(&self, table: &TodoTable) -> Result<()> {
        let path = self.path();
        let tmp = self.config.tmp_path();

        // leftover from a crashed writer
        let _ = fs::remove_file(&tmp);

        if let Err(e) = self.write_file(&tmp, table) {
            if let Err(rm) = fs::remove_file(&tmp) {
                warn!("remove {} after failed write: {}", tmp.display(), rm);
            }
            return Err(e);
        }

        fs::rename(&tmp, path)
            .map_err(|e| TodoError::io(&format!("rename {} ->", tmp.display()), path, e))?;

        if self.config.fsync {
            if let Err(e) = fsync_parent_dir(path) {
                warn!("fsync parent dir of {}: {}", path.display(), e);
            }
        }
        Ok(())
    }

    fn write_in_place(&self, table: &TodoTable) -> Result<()> {
        self.write_file(self.path(), table)
    }

    /// Create/truncate `path` and write every row; flush (and fsync if configured).
    fn write_file(&self, path: &Path, table: &TodoTable) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .with_path("open for write", path)?;

        let file = write_rows(file, table, path)?;
        if self.config.fsync {
            file.sync_all().with_path("fsync", path)?;
        }
        Ok(())
    }
}

/// Serialize `table` as CSV into `w`, flush, and hand the writer back.
fn write_rows<W: Write>(w: W, table: &TodoTable, path: &Path) -> Result<W> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(w);
    for (id, todo) in table.sorted() {
        wtr.write_record(&codec::encode(id, todo))
            .map_err(|e| TodoError::csv("write", path, e))?;
    }
    wtr.flush().with_path("flush", path)?;
    wtr.into_inner()
        .map_err(|e| TodoError::io("flush", path, e.into_error()))
}

/// Load the table at `path` with default settings.
pub fn load<P: AsRef<Path>>(path: P) -> Result<TodoTable> {
    FileStore::open(path).load()
}

/// Save `table` to `path` with default settings.
pub fn save<P: AsRef<Path>>(path: P, table: &TodoTable) -> Result<()> {
    FileStore::open(path).save(table)
}
