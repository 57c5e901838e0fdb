//! Due/next signal resolution.
//!
//! Every function here is a pure query over `(schedule, received, now)`;
//! callers may poll them on a timer as often as they like.
//!
//! A signal is *due* once its release instant has passed and it has not been
//! received yet. Whenever something is due the countdown reports
//! [`TimeUntilNext::Ready`], even if later slots are still in the future.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::schedule::{Schedule, ScheduleEntry};

/// Whole days, hours and minutes until the next release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

impl Countdown {
    /// Floor-decompose a remaining duration. Negative input yields zeros.
    pub fn from_duration(remaining: Duration) -> Self {
        let total_minutes = remaining.num_minutes().max(0);
        Self {
            days: total_minutes / (24 * 60),
            hours: (total_minutes % (24 * 60)) / 60,
            minutes: total_minutes % 60,
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d {}h {}m", self.days, self.hours, self.minutes)
    }
}

/// Result of [`time_until_next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TimeUntilNext {
    /// Every signal of the track has been received.
    Completed,
    /// At least one signal is due now.
    Ready,
    /// Nothing due; the next release is this far away.
    Countdown(Countdown),
}

impl fmt::Display for TimeUntilNext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeUntilNext::Completed => write!(f, "sequence complete"),
            TimeUntilNext::Ready => write!(f, "signal available"),
            TimeUntilNext::Countdown(c) => write!(f, "{c}"),
        }
    }
}

/// Entries released at or before `now` and not yet received, by ascending index.
pub fn due_signals(
    schedule: &Schedule,
    received: &BTreeSet<u32>,
    now: DateTime<Utc>,
) -> Vec<ScheduleEntry> {
    schedule
        .entries()
        .iter()
        .filter(|e| e.release_at <= now && !received.contains(&e.index))
        .copied()
        .collect()
}

/// Lowest-index unreceived entry whose release is still in the future.
pub fn next_signal(
    schedule: &Schedule,
    received: &BTreeSet<u32>,
    now: DateTime<Utc>,
) -> Option<ScheduleEntry> {
    schedule
        .entries()
        .iter()
        .find(|e| e.release_at > now && !received.contains(&e.index))
        .copied()
}

/// Number of received indices that belong to the schedule.
pub fn received_in_range(schedule: &Schedule, received: &BTreeSet<u32>) -> u32 {
    received.range(..schedule.count()).count() as u32
}

/// Countdown status for the track.
pub fn time_until_next(
    schedule: &Schedule,
    received: &BTreeSet<u32>,
    now: DateTime<Utc>,
) -> TimeUntilNext {
    if received_in_range(schedule, received) >= schedule.count() {
        return TimeUntilNext::Completed;
    }
    if !due_signals(schedule, received, now).is_empty() {
        return TimeUntilNext::Ready;
    }
    match next_signal(schedule, received, now) {
        Some(next) => TimeUntilNext::Countdown(Countdown::from_duration(next.release_at - now)),
        // Nothing due and nothing ahead means every slot is received.
        None => TimeUntilNext::Completed,
    }
}
