//! Signal catalog.
//!
//! The catalog is pure data: the ordered list of major signals with their
//! narrative payload and the pool of daily minor-signal messages. The rest
//! of the engine only handles indices; rendering code looks payloads up
//! here through [`ContentSource`](crate::delivery::ContentSource).

mod narrative;

use std::fmt;

use serde::{Deserialize, Serialize};

use narrative::{RawSignal, MAJOR_SIGNALS, MINOR_MESSAGES, STANDBY_TRANSMISSIONS};

/// Number of major signals in the standard catalog.
pub const MAJOR_SIGNAL_COUNT: u32 = MAJOR_SIGNALS.len() as u32;

/// Number of daily minor signals in the standard catalog.
pub const MINOR_SIGNAL_COUNT: u32 = 168;

/// The two release tracks a signal can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    /// Narrative signals released on the long interval.
    Major,
    /// Daily flavour signals.
    Minor,
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Track::Major => write!(f, "major"),
            Track::Minor => write!(f, "minor"),
        }
    }
}

/// Immutable catalog entry for a major signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalDefinition {
    pub index: u32,
    pub title: String,
    pub phase: String,
    pub urgency: String,
    pub body: String,
    pub hint: String,
    pub technical_data: String,
    pub unlocks: Vec<String>,
    /// Flavour lines that become available once this signal is received.
    pub transmissions: Vec<String>,
}

impl SignalDefinition {
    fn from_raw(index: u32, raw: &RawSignal) -> Self {
        Self {
            index,
            title: raw.title.into(),
            phase: raw.phase.into(),
            urgency: raw.urgency.into(),
            body: raw.body.into(),
            hint: raw.hint.into(),
            technical_data: raw.technical_data.into(),
            unlocks: raw.unlocks.iter().map(|s| s.to_string()).collect(),
            transmissions: raw.transmissions.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// A daily minor signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinorSignal {
    pub index: u32,
    pub text: String,
}

/// Ordered signal definitions plus the minor message pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    signals: Vec<SignalDefinition>,
    minor_messages: Vec<String>,
    standby_transmissions: Vec<String>,
}

impl Catalog {
    /// The standard nine-signal story.
    pub fn standard() -> Self {
        Self {
            signals: MAJOR_SIGNALS
                .iter()
                .enumerate()
                .map(|(i, raw)| SignalDefinition::from_raw(i as u32, raw))
                .collect(),
            minor_messages: MINOR_MESSAGES.iter().map(|s| s.to_string()).collect(),
            standby_transmissions: STANDBY_TRANSMISSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn len(&self) -> u32 {
        self.signals.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    pub fn signals(&self) -> &[SignalDefinition] {
        &self.signals
    }

    pub fn get(&self, index: u32) -> Option<&SignalDefinition> {
        self.signals.get(index as usize)
    }

    /// Minor signal text, cycling through the message pool.
    pub fn minor(&self, index: u32) -> Option<MinorSignal> {
        if self.minor_messages.is_empty() {
            return None;
        }
        let text = &self.minor_messages[index as usize % self.minor_messages.len()];
        Some(MinorSignal {
            index,
            text: text.clone(),
        })
    }

    pub fn standby_transmissions(&self) -> &[String] {
        &self.standby_transmissions
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
