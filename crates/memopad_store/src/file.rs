//! File-based cache backend for persistent storage.

use crate::backend::CacheBackend;
use crate::error::{StoreError, StoreResult};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A file-based cache backend.
///
/// Each key is stored as one file under a root directory. Data survives
/// process restarts. Writes go through a temporary file and a rename, so a
/// crash mid-write never leaves a half-written value behind.
///
/// # Keys
///
/// Keys must be non-empty and consist of ASCII alphanumerics, `-`, `_`,
/// or `.` (without leading dots), so a key can never escape the root
/// directory.
///
/// # Example
///
/// ```no_run
/// use memopad_store::{CacheBackend, FileBackend};
/// use std::path::Path;
///
/// let backend = FileBackend::open(Path::new("/tmp/memopad")).unwrap();
/// backend.set("pages", "[]").unwrap();
/// ```
#[derive(Debug)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Opens a file backend rooted at `root`, creating the directory if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(root: &Path) -> StoreResult<Self> {
        fs::create_dir_all(root)?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Returns the root directory of this backend.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }
}

impl CacheBackend for FileBackend {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        let tmp = self.root.join(format!(".{key}.tmp"));
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
