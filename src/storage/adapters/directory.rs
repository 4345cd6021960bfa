//! Directory-backed key-value store.
//!
//! Each key maps to `<key>.json` inside a capability directory. Writes land in
//! a sibling temporary file first, are flushed to disk and are then renamed
//! into place.

use std::io::{ErrorKind, Write};

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::storage::ports::{KeyValueStore, StoreError, StoreResult, validate_key};

/// Key-value store persisting one file per key.
#[derive(Debug)]
pub struct DirectoryStore {
    dir: Dir,
}

impl DirectoryStore {
    /// Opens (creating if needed) the directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the directory cannot be created or
    /// opened.
    pub fn open(path: &Utf8Path) -> StoreResult<Self> {
        std::fs::create_dir_all(path).map_err(StoreError::backend)?;
        let dir = Dir::open_ambient_dir(path, ambient_authority()).map_err(StoreError::backend)?;
        Ok(Self { dir })
    }

    /// Wraps an already opened capability directory.
    #[must_use]
    pub const fn from_dir(dir: Dir) -> Self {
        Self { dir }
    }
}

fn file_name(key: &str) -> StoreResult<String> {
    validate_key(key)?;
    Ok(format!("{key}.json"))
}

impl KeyValueStore for DirectoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let name = file_name(key)?;
        match self.dir.read_to_string(&name) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::backend(err)),
        }
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let name = file_name(key)?;
        let tmp = format!("{name}.tmp");
        let mut file = self.dir.create(&tmp).map_err(StoreError::backend)?;
        file.write_all(value.as_bytes()).map_err(StoreError::backend)?;
        file.sync_all().map_err(StoreError::backend)?;
        drop(file);
        self.dir
            .rename(&tmp, &self.dir, &name)
            .map_err(StoreError::backend)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let name = file_name(key)?;
        match self.dir.remove_file(&name) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::backend(err)),
        }
    }
}
