//! TOML-based application configuration.
//!
//! Stores the release and progression policy:
//! - Major signal interval and count
//! - Minor (daily) signal track
//! - Delivery mode and notification titles
//! - Flavor text seed
//! - Access tier table
//!
//! Configuration is stored at `~/.config/thesignal/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::catalog::{MAJOR_SIGNAL_COUNT, MINOR_SIGNAL_COUNT};
use crate::delivery::DeliveryMode;
use crate::error::ConfigError;
use crate::progression::TierTable;
use crate::schedule::{IntervalPolicy, MAJOR_INTERVAL_DAYS};

/// Major signal track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_major_interval")]
    pub interval_days: u32,
    #[serde(default = "default_major_count")]
    pub count: u32,
}

/// Daily minor signal track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinorConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_minor_interval")]
    pub interval_days: u32,
    #[serde(default = "default_minor_count")]
    pub count: u32,
}

/// Delivery behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    #[serde(default)]
    pub mode: DeliveryMode,
    #[serde(default = "default_major_title")]
    pub major_title: String,
    #[serde(default = "default_minor_title")]
    pub minor_title: String,
}

/// Presentation text generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlavorConfig {
    /// Fixed seed for reproducible flavor text. Unset = fresh entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/thesignal/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub minor: MinorConfig,
    #[serde(default)]
    pub delivery: DeliveryConfig,
    #[serde(default)]
    pub flavor: FlavorConfig,
    #[serde(default)]
    pub tiers: TierTable,
}

// Default functions
fn default_major_interval() -> u32 {
    MAJOR_INTERVAL_DAYS
}
fn default_major_count() -> u32 {
    MAJOR_SIGNAL_COUNT
}
fn default_minor_interval() -> u32 {
    1
}
fn default_minor_count() -> u32 {
    MINOR_SIGNAL_COUNT
}
fn default_major_title() -> String {
    "New Signal".into()
}
fn default_minor_title() -> String {
    "Mini Signal".into()
}
fn default_true() -> bool {
    true
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_days: default_major_interval(),
            count: default_major_count(),
        }
    }
}

impl Default for MinorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_days: default_minor_interval(),
            count: default_minor_count(),
        }
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            mode: DeliveryMode::default(),
            major_title: default_major_title(),
            minor_title: default_minor_title(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schedule: ScheduleConfig::default(),
            minor: MinorConfig::default(),
            delivery: DeliveryConfig::default(),
            flavor: FlavorConfig::default(),
            tiers: TierTable::reference(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                // Optional fields are skipped when unset, so only the seed may be absent.
                let existing = match obj.get(part) {
                    Some(v) => v.clone(),
                    None if key == "flavor.seed" => serde_json::Value::Null,
                    None => return Err(ConfigError::UnknownKey(key.to_string())),
                };

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) | serde_json::Value::Null => {
                        if value == "none" || value.is_empty() {
                            serde_json::Value::Null
                        } else {
                            let n = value
                                .parse::<u64>()
                                .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                            serde_json::Value::Number(n.into())
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    serde_json::Value::String(_) => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    /// Default location of the config file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// into a valid configuration (including an invalid tier table).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    pub fn major_policy(&self) -> IntervalPolicy {
        IntervalPolicy {
            interval_days: self.schedule.interval_days,
            count: self.schedule.count,
        }
    }

    pub fn minor_policy(&self) -> IntervalPolicy {
        IntervalPolicy {
            interval_days: self.minor.interval_days,
            count: self.minor.count,
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default configuration");
            Self::default()
        })
    }
}
