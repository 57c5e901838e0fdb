//! Durable user progress and its transitions.
//!
//! [`UserProgressState`] is the only state the engine reads and writes, and
//! it does so through a [`ProgressStore`](crate::delivery::ProgressStore).
//! Callers own the value and thread it through every call.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Track;
use crate::error::{Result, StateError};
use crate::schedule::{IntervalPolicy, Schedule};

/// Audit record of one delivered signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub track: Track,
    pub index: u32,
    pub received_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgressState {
    signup_date: Option<NaiveDate>,
    received: BTreeSet<u32>,
    received_minor: BTreeSet<u32>,
    /// Chronological receipt log.
    receipts: Vec<Receipt>,
}

impl UserProgressState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a state from persisted parts.
    pub fn from_parts(
        signup_date: Option<NaiveDate>,
        received: BTreeSet<u32>,
        received_minor: BTreeSet<u32>,
        receipts: Vec<Receipt>,
    ) -> Self {
        Self {
            signup_date,
            received,
            received_minor,
            receipts,
        }
    }

    pub fn signup_date(&self) -> Option<NaiveDate> {
        self.signup_date
    }

    pub fn is_activated(&self) -> bool {
        self.signup_date.is_some()
    }

    pub fn received(&self, track: Track) -> &BTreeSet<u32> {
        match track {
            Track::Major => &self.received,
            Track::Minor => &self.received_minor,
        }
    }

    pub fn receipts(&self) -> &[Receipt] {
        &self.receipts
    }

    /// Record the signup date. Happens exactly once.
    ///
    /// # Errors
    ///
    /// [`StateError::SignupAlreadySet`] if the user is already activated.
    pub fn activate(&mut self, signup_date: NaiveDate) -> Result<(), StateError> {
        if let Some(existing) = self.signup_date {
            return Err(StateError::SignupAlreadySet { existing });
        }
        tracing::info!(%signup_date, "user activated");
        self.signup_date = Some(signup_date);
        Ok(())
    }

    /// Release timeline for this user under `policy`.
    pub fn schedule(&self, policy: IntervalPolicy) -> Result<Schedule> {
        let signup = self.signup_date.ok_or(StateError::NotActivated)?;
        Ok(policy.schedule(signup)?)
    }

    /// Mark one signal as received.
    ///
    /// # Errors
    ///
    /// Rejects indices outside `schedule`, signals whose release instant is
    /// still ahead of `now`, and signals already received.
    pub fn acknowledge(
        &mut self,
        track: Track,
        schedule: &Schedule,
        index: u32,
        now: DateTime<Utc>,
    ) -> Result<Receipt, StateError> {
        let entry = schedule.get(index).ok_or(StateError::IndexOutOfRange {
            track,
            index,
            count: schedule.count(),
        })?;
        if entry.release_at > now {
            return Err(StateError::NotYetDue {
                track,
                index,
                release_at: entry.release_at,
            });
        }
        let set = match track {
            Track::Major => &mut self.received,
            Track::Minor => &mut self.received_minor,
        };
        if !set.insert(index) {
            return Err(StateError::AlreadyReceived { track, index });
        }

        let receipt = Receipt {
            track,
            index,
            received_at: now,
        };
        self.receipts.push(receipt);
        tracing::info!(%track, index, "signal received");
        Ok(receipt)
    }

    /// Drop received indices that fall outside `count`. Returns how many were removed.
    pub fn retain_in_range(&mut self, track: Track, count: u32) -> usize {
        let set = match track {
            Track::Major => &mut self.received,
            Track::Minor => &mut self.received_minor,
        };
        let before = set.len();
        set.retain(|i| *i < count);
        before - set.len()
    }
}
