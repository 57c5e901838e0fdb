//! In-process key-value store.

use std::collections::BTreeMap;
use std::sync::Mutex;

use super::KvStore;
use crate::error::StorageError;

/// Mutex-guarded map. Writers are serialized by the lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every stored pair.
    pub fn snapshot(&self) -> Result<BTreeMap<String, String>, StorageError> {
        Ok(self.entries.lock().map_err(|_| StorageError::Poisoned)?.clone())
    }
}

impl KvStore for MemoryStore {
    fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn kv_set_many(&self, batch: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        for (key, value) in batch {
            entries.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }
}
