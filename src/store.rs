//! File-backed item store.
//!
//! Keeps the whole collection in one pretty-printed JSON file
//! (`{ "items": [...] }`) inside a data directory. Writes land in a temp file
//! first and are renamed into place, so an interrupted save never leaves a
//! truncated data file behind. Read-modify-write cycles hold an exclusive
//! advisory lock on a sibling lock file for their whole duration.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs4::fs_std::FileExt;
use serde::Deserialize;
use tempfile::NamedTempFile;

use crate::codec;
use crate::config;
use crate::error::{Result, TrackerError};
use crate::models::Item;

const LOG_TARGET: &str = "value_tracker::store";

/// On-disk layout; the same envelope as the JSON export.
#[derive(Debug, Default, Deserialize)]
struct DataFile {
    #[serde(default)]
    items: Vec<Item>,
}

/// Reads and writes the persisted item collection.
#[derive(Debug)]
pub struct ItemStore {
    /// Directory holding the data and lock files.
    pub data_dir: PathBuf,
    seed: Option<Vec<Item>>,
}

impl ItemStore {
    /// Open a store in `data_dir`, creating the directory if needed.
    ///
    /// If `data_dir` is `None`, uses the platform-appropriate default data
    /// directory. `seed` is written out the first time the store is read
    /// while no data file exists yet.
    pub fn new(data_dir: Option<PathBuf>, seed: Option<Vec<Item>>) -> Result<Self> {
        let dir = data_dir.unwrap_or_else(config::default_data_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self { data_dir: dir, seed })
    }

    pub fn data_file(&self) -> PathBuf {
        self.data_dir.join(config::DATA_FILE)
    }

    fn lock_file(&self) -> PathBuf {
        self.data_dir.join(config::LOCK_FILE)
    }

    /// Load the current collection.
    ///
    /// A missing data file is an empty collection (or the seed, which is
    /// then saved). A data file that does not parse is reported as
    /// [`TrackerError::CorruptStore`] and left on disk untouched.
    pub fn load(&self) -> Result<Vec<Item>> {
        let _guard = self.lock()?;
        self.load_unlocked()
    }

    fn load_unlocked(&self) -> Result<Vec<Item>> {
        let path = self.data_file();
        if !path.exists() {
            return match &self.seed {
                Some(seed) => {
                    log::info!(target: LOG_TARGET, "Seeding {} with {} items", path.display(), seed.len());
                    self.save_unlocked(seed)?;
                    Ok(seed.clone())
                }
                None => Ok(Vec::new()),
            };
        }

        let contents = fs::read_to_string(&path)?;
        match serde_json::from_str::<DataFile>(&contents) {
            Ok(data) => {
                log::debug!(target: LOG_TARGET, "Loaded {} items from {}", data.items.len(), path.display());
                Ok(data.items)
            }
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Data file {} is corrupt: {e}", path.display());
                Err(TrackerError::CorruptStore(format!(
                    "'{}' could not be parsed: {e}",
                    path.display()
                )))
            }
        }
    }

    /// Replace the persisted collection with `items`.
    pub fn save(&self, items: &[Item]) -> Result<()> {
        let _guard = self.lock()?;
        self.save_unlocked(items)
    }

    fn save_unlocked(&self, items: &[Item]) -> Result<()> {
        let path = self.data_file();
        write_atomic(&path, &codec::export_json(items)?)?;

        log::debug!(target: LOG_TARGET, "Saved {} items to {}", items.len(), path.display());
        Ok(())
    }

    /// Run one read-modify-write cycle under the store lock.
    ///
    /// `f` receives the current collection and may mutate it. The collection
    /// is saved only when `f` succeeds; its result is passed through.
    pub fn modify<T>(&self, f: impl FnOnce(&mut Vec<Item>) -> Result<T>) -> Result<T> {
        let _guard = self.lock()?;
        let mut items = self.load_unlocked()?;
        let out = f(&mut items)?;
        self.save_unlocked(&items)?;
        Ok(out)
    }

    /// Delete the data file. The next load starts over (from the seed, if any).
    pub fn clear(&self) -> Result<()> {
        let _guard = self.lock()?;
        let path = self.data_file();
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    fn lock(&self) -> Result<StoreLockGuard> {
        let lock_path = self.lock_file();
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;
        file.lock_exclusive()?;
        log::trace!(target: LOG_TARGET, "Acquired store lock at '{}'", lock_path.display());
        Ok(StoreLockGuard(file))
    }
}

/// Releases the store lock when dropped.
#[derive(Debug)]
struct StoreLockGuard(File);

impl Drop for StoreLockGuard {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.0) {
            log::warn!(target: LOG_TARGET, "Could not unlock store: {e}");
        }
    }
}

/// Write `contents` to `path` atomically (temp file in the same directory,
/// then rename).
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| TrackerError::Io(e.error))?;
    Ok(())
}
