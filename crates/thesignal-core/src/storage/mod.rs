mod codec;
mod config;
pub mod database;
pub mod memory;

pub use codec::{decode_state, decode_state_strict, encode_state, keys};
pub use config::{Config, DeliveryConfig, FlavorConfig, MinorConfig, ScheduleConfig};
pub use database::Database;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::StorageError;

/// String key-value backend with namespaced keys.
pub trait KvStore {
    fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Write several pairs as one unit.
    ///
    /// The default writes them one at a time. Backends that can commit a
    /// batch atomically override this so a failed write leaves every key
    /// unchanged.
    fn kv_set_many(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        for (key, value) in entries {
            self.kv_set(key, value)?;
        }
        Ok(())
    }
}

/// Returns `~/.config/thesignal[-dev]/`, or `$THESIGNAL_HOME` when set.
///
/// Set THESIGNAL_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("THESIGNAL_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir().ok_or(StorageError::NoDataDir)?.join(".config");
            let env = std::env::var("THESIGNAL_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("thesignal-dev")
            } else {
                base_dir.join("thesignal")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
