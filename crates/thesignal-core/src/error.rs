//! Core error types for thesignal-core.
//!
//! The pure compute functions only fail on malformed input
//! ([`ScheduleError`], [`TierTableError`]). State transitions and the
//! persistence boundary have their own enums, all folded into [`CoreError`].

use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::Track;

/// Core error type for thesignal-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Schedule computation errors
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Progress state transition errors
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// Tier table errors
    #[error("Tier table error: {0}")]
    TierTable(#[from] TierTableError),

    /// Persistence errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while computing a release schedule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Interval, count or signup date rejected
    #[error("Invalid schedule parameters: {message}")]
    InvalidScheduleParameters { message: String },
}

impl ScheduleError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ScheduleError::InvalidScheduleParameters {
            message: message.into(),
        }
    }
}

/// Errors raised by [`UserProgressState`](crate::state::UserProgressState) transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// Signup date is immutable once set
    #[error("Signup date already set to {existing}")]
    SignupAlreadySet { existing: chrono::NaiveDate },

    /// Operation requires an activated user
    #[error("User has not been activated yet")]
    NotActivated,

    /// Index outside of the catalog
    #[error("{track} signal index {index} out of range (count: {count})")]
    IndexOutOfRange { track: Track, index: u32, count: u32 },

    /// Release instant not reached
    #[error("{track} signal {index} is not due until {release_at}")]
    NotYetDue {
        track: Track,
        index: u32,
        release_at: chrono::DateTime<chrono::Utc>,
    },

    /// Index already delivered
    #[error("{track} signal {index} was already received")]
    AlreadyReceived { track: Track, index: u32 },

    /// Stored value could not be decoded
    #[error("Corrupt persisted state under '{key}': {message}")]
    CorruptPersistedState { key: String, message: String },
}

/// Errors raised when building a tier table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TierTableError {
    #[error("Tier table is empty")]
    Empty,

    #[error("First tier threshold must be 0, got {0}")]
    MissingBaseTier(u32),

    #[error("Tier '{name}' is out of order: thresholds and levels must strictly increase")]
    OutOfOrder { name: String },
}

/// Persistence errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(#[from] rusqlite::Error),

    /// Serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Home directory could not be determined
    #[error("Could not determine data directory")]
    NoDataDir,

    /// In-memory store lock was poisoned
    #[error("Store lock poisoned")]
    Poisoned,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown key for dot-path access
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
