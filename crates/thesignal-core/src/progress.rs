//! Progress snapshot aggregation.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::progression::{AccessTier, TierTable};
use crate::resolver::{next_signal, received_in_range, time_until_next, TimeUntilNext};
use crate::schedule::{start_of_day, IntervalPolicy};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Point-in-time summary of a user's progression on one track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub signals_received: u32,
    pub total_signals: u32,
    /// 0..=100, rounded to the nearest integer.
    pub percentage: u32,
    /// Whole days since signup. Negative if the signup date is in the future.
    pub days_since_start: i64,
    /// Access tier reached, for tracks that gate access.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<AccessTier>,
    /// `None` when no release lies ahead.
    pub next_signal_index: Option<u32>,
    pub time_until_next: TimeUntilNext,
    pub is_complete: bool,
}

/// Floor of the whole days elapsed between signup midnight and `now`.
pub fn days_since(signup: NaiveDate, now: DateTime<Utc>) -> i64 {
    (now - start_of_day(signup))
        .num_seconds()
        .div_euclid(SECONDS_PER_DAY)
}

/// Summarize progression for `received` against the track described by `policy`.
///
/// Pass `tiers` only for the track that drives access levels; the snapshot
/// of any other track carries no tier.
///
/// # Errors
///
/// Fails only if `policy` itself is invalid.
pub fn summarize(
    received: &BTreeSet<u32>,
    signup: NaiveDate,
    now: DateTime<Utc>,
    policy: IntervalPolicy,
    tiers: Option<&TierTable>,
) -> Result<ProgressSnapshot, ScheduleError> {
    let schedule = policy.schedule(signup)?;
    let signals_received = received_in_range(&schedule, received);
    let total_signals = policy.count;
    let percentage =
        (f64::from(signals_received) * 100.0 / f64::from(total_signals)).round() as u32;

    Ok(ProgressSnapshot {
        signals_received,
        total_signals,
        percentage,
        days_since_start: days_since(signup, now),
        tier: tiers.map(|t| t.classify(i64::from(signals_received)).clone()),
        next_signal_index: next_signal(&schedule, received, now).map(|e| e.index),
        time_until_next: time_until_next(&schedule, received, now),
        is_complete: signals_received >= total_signals,
    })
}
