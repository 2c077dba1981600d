//! Key-value storage contract for session snapshots.

use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("snapshot encoding failed: {0}")]
    Encode(String),

    #[error("storage write failed: {0}")]
    Write(String),
}

/// Flat string key-value storage. Reads are infallible by contract: an
/// unreadable key is reported as absent and the loader falls back to
/// defaults for it.
pub trait SnapshotStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes every stored key.
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default, Debug, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SnapshotStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        Ok(())
    }
}
