//! File-backed key-value store for session snapshots.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use homegame_ledger_base::store::{SnapshotStore, StoreError};
use tempfile::NamedTempFile;
use tracing::warn;

/// Keeps the whole key-value map in one JSON object file. Every write
/// goes through a temp file in the same directory and a rename, so a
/// crash mid-write never leaves a torn snapshot behind.
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`. A missing file is an empty store; an
    /// unreadable one logs a warning and also starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "unreadable ledger file, starting empty");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read ledger file, starting empty");
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| StoreError::Encode(e.to_string()))?;
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                fs::create_dir_all(dir).map_err(|e| StoreError::Write(e.to_string()))?;
                dir.to_path_buf()
            }
            _ => PathBuf::from("."),
        };
        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| StoreError::Write(e.to_string()))?;
        tmp.as_file_mut()
            .write_all(json.as_bytes())
            .map_err(|e| StoreError::Write(e.to_string()))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| StoreError::Write(e.to_string()))?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::Write(e.to_string()))?;
        Ok(())
    }
}

impl SnapshotStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Write(e.to_string())),
        }
    }
}
