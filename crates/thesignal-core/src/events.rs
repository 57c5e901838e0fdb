use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Track;

/// Every state change made by a delivery cycle produces an Event.
/// Front ends render them; tests assert on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    Activated {
        signup_date: NaiveDate,
        at: DateTime<Utc>,
    },
    /// Signal released but waiting for acknowledgment.
    SignalDue {
        track: Track,
        index: u32,
        release_at: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    /// Signal added to the received set and notified.
    SignalDelivered {
        track: Track,
        index: u32,
        release_at: DateTime<Utc>,
        at: DateTime<Utc>,
    },
    TierChanged {
        from_level: u32,
        to_level: u32,
        name: String,
        at: DateTime<Utc>,
    },
    SequenceCompleted {
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::Activated { at, .. }
            | Event::SignalDue { at, .. }
            | Event::SignalDelivered { at, .. }
            | Event::TierChanged { at, .. }
            | Event::SequenceCompleted { at } => *at,
        }
    }
}
