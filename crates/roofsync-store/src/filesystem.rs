//! Filesystem-backed key/value storage.
//!
//! Each key is one file directly under the store directory. Writes go to a
//! temporary file in the same directory which is flushed and then renamed
//! over the target, so a reader never sees a half-written value.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::traits::KeyValueStore;
use crate::{Error, Result};

/// Key/value storage rooted at a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The store directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The file that backs `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(Error::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::io_with_path(e, path)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root).map_err(|e| Error::io_with_path(e, &self.root))?;

        // NamedTempFile is created 0600 on unix, which the credential keeps
        // after the rename.
        let mut temp = tempfile::NamedTempFile::new_in(&self.root)
            .map_err(|e| Error::io_with_path(e, &self.root))?;
        temp.write_all(value.as_bytes())
            .map_err(|e| Error::io_with_path(e, temp.path()))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| Error::io_with_path(e, temp.path()))?;
        temp.persist(&path)
            .map_err(|e| Error::io_with_path(e.error, &path))?;

        tracing::trace!(key, path = %path.display(), bytes = value.len(), "wrote store key");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io_with_path(e, path)),
        }
    }
}
