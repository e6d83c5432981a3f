use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::{KeyValueStorage, StorageError};

/// Storage kept in a JSON object file (`{ "key": "value", ... }`).
///
/// The file is re-read on every call, so changes made by another process are
/// visible on the next read and the last writer wins. A missing file reads as
/// empty storage.
///
/// Writes go to a sibling `<name>.tmp` file that is then renamed over the
/// storage file, so readers never see a half-written file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt(e.to_string()))
    }

    /// Load the map for a write. A corrupt file is replaced.
    fn read_map_for_write(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match self.read_map() {
            Err(StorageError::Corrupt(reason)) => {
                warn!(path = %self.path.display(), %reason, "Replacing corrupt storage file");
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(map)
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        let tmp_path = self.tmp_path();
        std::fs::write(&tmp_path, raw)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| OsString::from("storage"), OsStr::to_os_string);
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.read_map_for_write()?;
        map.insert(key.to_owned(), value.to_owned());
        self.write_map(&map)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        let mut map = self.read_map_for_write()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "eketar-file-storage-{}-{name}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = scratch_dir("missing");
        let storage = FileStorage::new(dir.join("storage.json"));
        assert_eq!(storage.get_item("eketar_cart").unwrap(), None);
    }

    #[test]
    fn test_values_survive_a_new_handle() {
        let dir = scratch_dir("reopen");
        let path = dir.join("nested").join("storage.json");

        let mut first = FileStorage::new(&path);
        first.set_item("eketar_cart", "[]").unwrap();
        first.set_item("theme", "dark").unwrap();

        let second = FileStorage::new(&path);
        assert_eq!(second.get_item("eketar_cart").unwrap().as_deref(), Some("[]"));
        assert_eq!(second.get_item("theme").unwrap().as_deref(), Some("dark"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_remove_item() {
        let dir = scratch_dir("remove");
        let mut storage = FileStorage::new(dir.join("storage.json"));
        storage.set_item("a", "1").unwrap();
        storage.remove_item("a").unwrap();
        storage.remove_item("never-set").unwrap();
        assert_eq!(storage.get_item("a").unwrap(), None);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_corrupt_file_errors_on_read_and_is_replaced_on_write() {
        let dir = scratch_dir("corrupt");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("storage.json");
        std::fs::write(&path, "not json at all").unwrap();

        let mut storage = FileStorage::new(&path);
        assert!(matches!(
            storage.get_item("eketar_cart"),
            Err(StorageError::Corrupt(_))
        ));

        storage.set_item("eketar_cart", "[]").unwrap();
        assert_eq!(storage.get_item("eketar_cart").unwrap().as_deref(), Some("[]"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_write_leaves_no_temp_file() {
        let dir = scratch_dir("atomic");
        let path = dir.join("storage.json");
        let mut storage = FileStorage::new(&path);
        storage.set_item("eketar_cart", "[]").unwrap();
        storage.set_item("eketar_cart", r#"[{"id":"1"}]"#).unwrap();

        assert!(path.exists());
        assert!(!dir.join("storage.json.tmp").exists());
        let on_disk: BTreeMap<String, String> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk.get("eketar_cart").map(String::as_str), Some(r#"[{"id":"1"}]"#));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_stale_temp_file_is_ignored_and_overwritten() {
        let dir = scratch_dir("stale-tmp");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("storage.json");
        std::fs::write(dir.join("storage.json.tmp"), "{ half written").unwrap();

        let mut storage = FileStorage::new(&path);
        assert_eq!(storage.get_item("eketar_cart").unwrap(), None);

        storage.set_item("eketar_cart", "[]").unwrap();
        assert_eq!(storage.get_item("eketar_cart").unwrap().as_deref(), Some("[]"));
        assert!(!dir.join("storage.json.tmp").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
