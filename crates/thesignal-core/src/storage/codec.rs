//! Persisted shape of [`UserProgressState`].
//!
//! | key                              | value                         |
//! |----------------------------------|-------------------------------|
//! | `the_signal_v1:signupDate`       | `YYYY-MM-DD`, empty if absent |
//! | `the_signal_v1:receivedSignals`  | JSON array of integers        |
//! | `the_signal_v1:receivedMinor`    | JSON array of integers        |
//! | `the_signal_v1:receipts`         | JSON array of receipt objects |

use std::collections::BTreeSet;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::KvStore;
use crate::catalog::Track;
use crate::error::{CoreError, Result, StateError, StorageError};
use crate::schedule::parse_signup_date;
use crate::state::{Receipt, UserProgressState};

pub mod keys {
    pub const PREFIX: &str = "the_signal_v1:";
    pub const SIGNUP_DATE: &str = "the_signal_v1:signupDate";
    pub const RECEIVED_SIGNALS: &str = "the_signal_v1:receivedSignals";
    pub const RECEIVED_MINOR: &str = "the_signal_v1:receivedMinor";
    pub const RECEIPTS: &str = "the_signal_v1:receipts";
}

/// Write every key of `state` to `store` in a single
/// [`kv_set_many`](KvStore::kv_set_many) batch.
pub fn encode_state(store: &impl KvStore, state: &UserProgressState) -> Result<()> {
    let signup = state
        .signup_date()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let major = to_json(state.received(Track::Major))?;
    let minor = to_json(state.received(Track::Minor))?;
    let receipts = to_json(state.receipts())?;
    store.kv_set_many(&[
        (keys::SIGNUP_DATE, signup.as_str()),
        (keys::RECEIVED_SIGNALS, major.as_str()),
        (keys::RECEIVED_MINOR, minor.as_str()),
        (keys::RECEIPTS, receipts.as_str()),
    ])?;
    Ok(())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, StorageError> {
    Ok(serde_json::to_string(value)?)
}

/// Read state from `store`, failing on the first corrupt value.
///
/// # Errors
///
/// [`StateError::CorruptPersistedState`] when a stored value cannot be decoded.
pub fn decode_state_strict(store: &impl KvStore) -> Result<UserProgressState> {
    let signup_date = match store.kv_get(keys::SIGNUP_DATE)? {
        Some(raw) if !raw.trim().is_empty() => {
            Some(parse_signup_date(&raw).map_err(|e| corrupt(keys::SIGNUP_DATE, e))?)
        }
        _ => None,
    };
    let received: BTreeSet<u32> = json_or_default(store, keys::RECEIVED_SIGNALS)?;
    let received_minor: BTreeSet<u32> = json_or_default(store, keys::RECEIVED_MINOR)?;
    let receipts: Vec<Receipt> = json_or_default(store, keys::RECEIPTS)?;
    Ok(UserProgressState::from_parts(
        signup_date,
        received,
        received_minor,
        receipts,
    ))
}

/// Read state from `store`, replacing each corrupt value with its default.
///
/// Only backend failures are errors; decoding problems are logged.
pub fn decode_state(store: &impl KvStore) -> Result<UserProgressState> {
    let signup_date = match store.kv_get(keys::SIGNUP_DATE)? {
        Some(raw) if !raw.trim().is_empty() => match parse_signup_date(&raw) {
            Ok(date) => Some(date),
            Err(e) => {
                tracing::warn!(key = keys::SIGNUP_DATE, error = %e, "corrupt signup date, treating user as not activated");
                None
            }
        },
        _ => None,
    };
    let received = lenient(json_or_default(store, keys::RECEIVED_SIGNALS))?;
    let received_minor = lenient(json_or_default(store, keys::RECEIVED_MINOR))?;
    let receipts = lenient(json_or_default(store, keys::RECEIPTS))?;
    Ok(UserProgressState::from_parts(
        signup_date,
        received,
        received_minor,
        receipts,
    ))
}

fn json_or_default<T: DeserializeOwned + Default>(store: &impl KvStore, key: &str) -> Result<T> {
    match store.kv_get(key)? {
        Some(raw) if !raw.trim().is_empty() => {
            serde_json::from_str(&raw).map_err(|e| corrupt(key, e))
        }
        _ => Ok(T::default()),
    }
}

fn lenient<T: Default>(decoded: Result<T>) -> Result<T> {
    match decoded {
        Err(CoreError::State(StateError::CorruptPersistedState { key, message })) => {
            tracing::warn!(%key, %message, "corrupt persisted value, using empty default");
            Ok(T::default())
        }
        other => other,
    }
}

fn corrupt(key: &str, err: impl std::fmt::Display) -> CoreError {
    StateError::CorruptPersistedState {
        key: key.to_string(),
        message: err.to_string(),
    }
    .into()
}
