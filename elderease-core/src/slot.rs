//! The persisted slot: one named storage location holding the whole event
//! collection as a single JSON value.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

use crate::error::{ElderEaseError, ElderEaseResult};

/// Storage key the web screen uses.
pub const DEFAULT_STORAGE_KEY: &str = "elderEvents";

/// A single named value in durable storage.
pub trait Slot {
    /// Raw contents, or `None` if nothing has been stored yet.
    fn read(&self) -> ElderEaseResult<Option<String>>;

    /// Replace the stored value.
    fn write(&self, contents: &str) -> ElderEaseResult<()>;
}

/// A slot backed by `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(dir: &Path, key: &str) -> Self {
        FileSlot {
            path: dir.join(format!("{}.json", key)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Slot for FileSlot {
    fn read(&self) -> ElderEaseResult<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        std::fs::read_to_string(&self.path).map(Some).map_err(|e| {
            ElderEaseError::PersistenceRead(format!("{}: {e}", self.path.display()))
        })
    }

    fn write(&self, contents: &str) -> ElderEaseResult<()> {
        let write_err = |e: std::io::Error| {
            ElderEaseError::PersistenceWrite(format!("{}: {e}", self.path.display()))
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        // Write next to the target and rename so a crash never leaves half a file
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, contents).map_err(write_err)?;
        std::fs::rename(&tmp, &self.path).map_err(write_err)?;

        Ok(())
    }
}

/// An in-process slot, for tests and embedders that keep storage themselves.
#[derive(Debug, Default)]
pub struct MemorySlot {
    contents: RefCell<Option<String>>,
    fail_writes: Cell<bool>,
    writes: Cell<usize>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: &str) -> Self {
        let slot = Self::default();
        slot.contents.replace(Some(contents.to_string()));
        slot
    }

    /// Make subsequent writes fail, the way a full browser quota does.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }

    /// Number of write attempts, successful or not.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl Slot for MemorySlot {
    fn read(&self) -> ElderEaseResult<Option<String>> {
        Ok(self.contents.borrow().clone())
    }

    fn write(&self, contents: &str) -> ElderEaseResult<()> {
        self.writes.set(self.writes.get() + 1);

        if self.fail_writes.get() {
            return Err(ElderEaseError::PersistenceWrite("storage quota exceeded".into()));
        }

        self.contents.replace(Some(contents.to_string()));
        Ok(())
    }
}

impl<S: Slot + ?Sized> Slot for &S {
    fn read(&self) -> ElderEaseResult<Option<String>> {
        (**self).read()
    }

    fn write(&self, contents: &str) -> ElderEaseResult<()> {
        (**self).write(contents)
    }
}
