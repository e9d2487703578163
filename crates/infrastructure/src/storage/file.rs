//! File-backed session storage.
//!
//! Each key maps to one file under the storage directory, named after
//! the sanitized key. Tokens land in plain files, so the directory is
//! created with the platform's default permissions under the user's
//! configuration directory; embedders needing stricter handling can
//! point the store elsewhere.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use autoglue_application::{SessionStorage, StorageError};

/// Session storage that writes one file per key.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    dir: PathBuf,
}

impl FileSessionStorage {
    /// Creates a store rooted at `dir`. The directory is created lazily
    /// on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Creates a store under the user's configuration directory
    /// (`<config>/autoglue`).
    ///
    /// # Errors
    ///
    /// Returns an error when the platform exposes no configuration
    /// directory.
    pub fn in_config_dir() -> Result<Self, StorageError> {
        let base = dirs::config_dir().ok_or_else(|| {
            StorageError::Io("no configuration directory on this platform".to_string())
        })?;
        Ok(Self::new(base.join("autoglue")))
    }

    /// Returns the directory the store writes under.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    // Keys are dotted identifiers like "autoglue.tokens"; anything that
    // could escape the directory is flattened.
    fn file_name(key: &str) -> String {
        key.chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(Self::file_name(key))
    }
}

impl SessionStorage for FileSessionStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(StorageError::Io(error.to_string())),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|error| StorageError::Io(error.to_string()))?;

        // Write to a sibling then rename, so a crash never leaves a
        // half-written entry.
        let name = Self::file_name(key);
        let path = self.dir.join(&name);
        let tmp = self.dir.join(format!("{name}.tmp"));
        fs::write(&tmp, value).map_err(|error| StorageError::Io(error.to_string()))?;
        fs::rename(&tmp, &path).map_err(|error| StorageError::Io(error.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(StorageError::Io(error.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path());

        assert_eq!(storage.read("autoglue.tokens").unwrap(), None);
        storage.write("autoglue.tokens", "{\"a\":1}").unwrap();
        assert_eq!(
            storage.read("autoglue.tokens").unwrap(),
            Some("{\"a\":1}".to_string())
        );

        storage.remove("autoglue.tokens").unwrap();
        assert_eq!(storage.read("autoglue.tokens").unwrap(), None);
    }

    #[test]
    fn test_remove_missing_entry_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path());
        assert!(storage.remove("autoglue.org").is_ok());
    }

    #[test]
    fn test_keys_with_separators_stay_inside_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path());

        storage.write("../escape", "x").unwrap();
        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(entries, vec![".._escape".to_string()]);
    }

    #[test]
    fn test_two_stores_share_the_same_directory() {
        let dir = tempfile::tempdir().unwrap();
        let a = FileSessionStorage::new(dir.path());
        let b = FileSessionStorage::new(dir.path());

        a.write("autoglue.org", "org-1").unwrap();
        assert_eq!(b.read("autoglue.org").unwrap(), Some("org-1".to_string()));
    }
}
