//! Durable storage slots
//!
//! A slot holds the whole serialized catalog under one name. It is read as a
//! whole and written as a whole; there is no incremental update.

use crate::error::SlotError;
use parking_lot::Mutex;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A single named persistence location
pub trait StorageSlot: Send {
    /// Slot name
    fn name(&self) -> &str;

    /// Read the slot contents, `None` if the slot has never been written
    ///
    /// # Errors
    /// Returns error if the medium cannot be read
    fn read(&self) -> Result<Option<String>, SlotError>;

    /// Overwrite the slot contents
    ///
    /// Either the full contents land or the previous contents stay in place.
    ///
    /// # Errors
    /// Returns error if the medium rejects the write
    fn write(&mut self, contents: &str) -> Result<(), SlotError>;

    /// Remove the slot; removing a missing slot is not an error
    ///
    /// # Errors
    /// Returns error if the medium rejects the removal
    fn remove(&mut self) -> Result<(), SlotError>;
}

impl<S: StorageSlot + ?Sized> StorageSlot for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn read(&self) -> Result<Option<String>, SlotError> {
        (**self).read()
    }

    fn write(&mut self, contents: &str) -> Result<(), SlotError> {
        (**self).write(contents)
    }

    fn remove(&mut self) -> Result<(), SlotError> {
        (**self).remove()
    }
}

/// Slot backed by `<dir>/<name>.json`
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the slot, so readers never observe a partial catalog.
#[derive(Debug, Clone)]
pub struct FileSlot {
    name: String,
    dir: PathBuf,
    path: PathBuf,
}

impl FileSlot {
    /// Create slot `name` inside `dir`
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        let dir = dir.into();
        let name = name.into();
        let path = dir.join(format!("{name}.json"));
        Self { name, dir, path }
    }

    /// Path of the backing file
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageSlot for FileSlot {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> Result<Option<String>, SlotError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SlotError::io_error(&self.path, e)),
        }
    }

    fn write(&mut self, contents: &str) -> Result<(), SlotError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| SlotError::io_error(&self.dir, e))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)
            .map_err(|e| SlotError::io_error(&self.dir, e))?;
        tmp.write_all(contents.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| SlotError::io_error(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| SlotError::io_error(&self.path, e.error))?;

        Ok(())
    }

    fn remove(&mut self) -> Result<(), SlotError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SlotError::io_error(&self.path, e)),
        }
    }
}

/// In-memory slot with an optional byte quota
///
/// Clones are handles to the same slot, which lets a test persist through one
/// handle and hydrate a fresh store through another, like a page reload.
#[derive(Debug, Clone)]
pub struct MemorySlot {
    name: String,
    quota: Option<usize>,
    contents: Arc<Mutex<Option<String>>>,
}

impl MemorySlot {
    /// Create empty slot
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quota: None,
            contents: Arc::new(Mutex::new(None)),
        }
    }

    /// Create slot pre-filled with raw contents
    #[must_use]
    pub fn with_contents(name: impl Into<String>, contents: impl Into<String>) -> Self {
        let slot = Self::new(name);
        *slot.contents.lock() = Some(contents.into());
        slot
    }

    /// Reject writes larger than `bytes`
    #[inline]
    #[must_use]
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    /// Snapshot of the raw contents
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().clone()
    }
}

impl StorageSlot for MemorySlot {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> Result<Option<String>, SlotError> {
        Ok(self.contents())
    }

    fn write(&mut self, contents: &str) -> Result<(), SlotError> {
        if let Some(quota) = self.quota {
            if contents.len() > quota {
                return Err(SlotError::QuotaExceeded {
                    needed: contents.len(),
                    quota,
                });
            }
        }
        *self.contents.lock() = Some(contents.to_string());
        Ok(())
    }

    fn remove(&mut self) -> Result<(), SlotError> {
        *self.contents.lock() = None;
        Ok(())
    }
}
