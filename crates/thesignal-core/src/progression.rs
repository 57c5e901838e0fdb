//! Access tier classification.
//!
//! A [`TierTable`] is an ordered list of [`AccessTier`] rows keyed by the
//! minimum number of received signals. Classification walks the table from
//! the top and returns the first row whose threshold the count reaches, so
//! the resulting level never decreases as the count grows.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::TierTableError;

/// One row of the tier table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTier {
    /// Minimum received-signal count for this tier.
    pub threshold: u32,
    pub level: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub permissions: BTreeSet<String>,
    /// What the user has to do to reach the next tier, if any.
    #[serde(default)]
    pub next_unlock: Option<String>,
}

impl AccessTier {
    fn row(
        threshold: u32,
        level: u32,
        name: &str,
        description: &str,
        permissions: &[&str],
        next_unlock: Option<&str>,
    ) -> Self {
        Self {
            threshold,
            level,
            name: name.into(),
            description: description.into(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
            next_unlock: next_unlock.map(Into::into),
        }
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}

/// Validated, threshold-ordered tier table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TierTable {
    tiers: Vec<AccessTier>,
}

impl TierTable {
    /// Build a table from rows.
    ///
    /// # Errors
    ///
    /// The table must be non-empty, start at threshold 0, and have strictly
    /// increasing thresholds and levels.
    pub fn new(tiers: Vec<AccessTier>) -> Result<Self, TierTableError> {
        let first = tiers.first().ok_or(TierTableError::Empty)?;
        if first.threshold != 0 {
            return Err(TierTableError::MissingBaseTier(first.threshold));
        }
        for pair in tiers.windows(2) {
            if pair[1].threshold <= pair[0].threshold || pair[1].level <= pair[0].level {
                return Err(TierTableError::OutOfOrder {
                    name: pair[1].name.clone(),
                });
            }
        }
        Ok(Self { tiers })
    }

    /// Access levels of the network: PUBLIC through SIGNAL_MASTER.
    pub fn reference() -> Self {
        const BASIC: &[&str] = &["view_basic", "receive_signals"];
        const INITIATED: &[&str] = &["view_basic", "receive_signals", "decrypt_level1"];
        const OPERATOR: &[&str] = &[
            "view_basic",
            "receive_signals",
            "decrypt_level1",
            "access_nodes",
            "view_metrics",
        ];
        const ARCHITECT: &[&str] = &[
            "view_basic",
            "receive_signals",
            "decrypt_level1",
            "access_nodes",
            "view_metrics",
            "deep_access",
        ];

        Self {
            tiers: vec![
                AccessTier::row(
                    0,
                    0,
                    "PUBLIC",
                    "Basic network access",
                    BASIC,
                    Some("Receive the first signal"),
                ),
                AccessTier::row(
                    1,
                    1,
                    "INITIATED",
                    "Access to encrypted transmissions",
                    INITIATED,
                    Some("Receive 3 signals in total"),
                ),
                AccessTier::row(
                    3,
                    2,
                    "OPERATOR",
                    "Access to remote nodes",
                    OPERATOR,
                    Some("Receive 6 signals in total"),
                ),
                AccessTier::row(
                    6,
                    3,
                    "ARCHITECT",
                    "Full network access",
                    ARCHITECT,
                    Some("Receive every signal"),
                ),
                AccessTier::row(
                    9,
                    4,
                    "SIGNAL_MASTER",
                    "Total control - sequence complete",
                    &["all_access"],
                    None,
                ),
            ],
        }
    }

    /// Grade ladder with perks, unlocked every three signals.
    pub fn grades() -> Self {
        Self {
            tiers: vec![
                AccessTier::row(0, 0, "INITIATE", "", &[], Some("Receive 3 signals")),
                AccessTier::row(3, 1, "ADEPT", "", &["extra_hint"], Some("Receive 6 signals")),
                AccessTier::row(6, 2, "ARCHITECT", "", &["mini_bonus"], Some("Receive 9 signals")),
                AccessTier::row(9, 3, "MASTER", "", &["avatars", "secret_application"], None),
            ],
        }
    }

    pub fn tiers(&self) -> &[AccessTier] {
        &self.tiers
    }

    /// Tier reached with `received_count` signals. Negative counts clamp to zero.
    pub fn classify(&self, received_count: i64) -> &AccessTier {
        let count = received_count.max(0);
        self.tiers
            .iter()
            .rev()
            .find(|t| i64::from(t.threshold) <= count)
            .unwrap_or(&self.tiers[0])
    }

    /// Tier following the one reached with `received_count`, if any.
    pub fn next_tier(&self, received_count: i64) -> Option<&AccessTier> {
        let current = self.classify(received_count).level;
        self.tiers.iter().find(|t| t.level > current)
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self::reference()
    }
}

impl<'de> Deserialize<'de> for TierTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tiers = Vec::<AccessTier>::deserialize(deserializer)?;
        TierTable::new(tiers).map_err(serde::de::Error::custom)
    }
}
