//! Presentation text around the progression.
//!
//! Random picks go through a [`Flavor`] generator so that a configured seed
//! reproduces the same transmissions and code names. Everything else here
//! is a pure function of the progress data.

use std::collections::BTreeSet;

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;

use crate::catalog::Catalog;
use crate::progress::ProgressSnapshot;
use crate::resolver::TimeUntilNext;
use crate::storage::FlavorConfig;

const CODE_NAME_PREFIXES: [&str; 8] = [
    "SIGMA", "ALPHA", "OMEGA", "DELTA", "GAMMA", "THETA", "KAPPA", "ZETA",
];

/// Seedable source of random flavour text.
pub struct Flavor {
    rng: Mcg128Xsl64,
}

impl Flavor {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mcg128Xsl64::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Mcg128Xsl64::from_entropy(),
        }
    }

    pub fn from_config(config: &FlavorConfig) -> Self {
        match config.seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Random line from the transmissions of every signal up to the highest
    /// received index, or from the standby pool before the first signal.
    pub fn contextual_transmission(
        &mut self,
        catalog: &Catalog,
        received: &BTreeSet<u32>,
    ) -> Option<String> {
        let pool: Vec<&String> = match received.last() {
            Some(&highest) => catalog
                .signals()
                .iter()
                .take_while(|s| s.index <= highest)
                .flat_map(|s| s.transmissions.iter())
                .collect(),
            None => Vec::new(),
        };
        let pick = if pool.is_empty() {
            catalog.standby_transmissions().choose(&mut self.rng)
        } else {
            pool.choose(&mut self.rng).copied()
        };
        pick.cloned()
    }

    /// Operator code name such as `DELTA-417`.
    pub fn code_name(&mut self) -> String {
        let prefix = CODE_NAME_PREFIXES
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(CODE_NAME_PREFIXES[0]);
        let number: u32 = self.rng.gen_range(100..1000);
        format!("{prefix}-{number}")
    }
}

/// Hints of every received signal, in index order.
pub fn cryptic_hints(catalog: &Catalog, received: &BTreeSet<u32>) -> Vec<String> {
    received
        .iter()
        .filter_map(|&i| catalog.get(i))
        .map(|s| s.hint.clone())
        .collect()
}

pub fn status_line(catalog: &Catalog, snapshot: &ProgressSnapshot) -> String {
    if snapshot.is_complete {
        return ">>> SIGNAL MASTER - Sequence complete <<<".to_string();
    }
    if snapshot.signals_received == 0 && snapshot.time_until_next != TimeUntilNext::Ready {
        return ">>> Awaiting activation signal...".to_string();
    }
    match &snapshot.time_until_next {
        TimeUntilNext::Ready => ">>> New signal available. Acknowledge to receive. <<<".to_string(),
        TimeUntilNext::Completed => ">>> All available signals received <<<".to_string(),
        TimeUntilNext::Countdown(countdown) => {
            let phase = snapshot
                .next_signal_index
                .and_then(|i| catalog.get(i))
                .map(|s| s.phase.as_str())
                .unwrap_or("UNKNOWN");
            format!(">>> Phase {phase} - next signal in {countdown} <<<")
        }
    }
}

/// Quote shown for a progression band.
pub fn progress_quote(signals_received: u32) -> &'static str {
    match signals_received {
        0 => "\"They are watching. You have not been selected yet.\"",
        1..=2 => "\"You are starting to understand. Keep listening.\"",
        3..=5 => "\"The truth reveals itself slowly. Stay alert.\"",
        6..=8 => "\"You are close to the final revelation.\"",
        _ => "\"You are one of us now. Guide the others.\"",
    }
}

pub fn access_banner(snapshot: &ProgressSnapshot) -> String {
    if snapshot.signals_received == 0 {
        "[ Access levels locked. Activation required. ]".to_string()
    } else if !snapshot.is_complete {
        let remaining = snapshot.total_signals - snapshot.signals_received;
        format!(
            "[ Progress: {}% - {} signals remaining ]",
            snapshot.percentage, remaining
        )
    } else {
        "[ SIGNAL MASTER - Full access unlocked ]".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::summarize;
    use crate::progression::TierTable;
    use crate::schedule::IntervalPolicy;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn snapshot(received: &[u32], day: u32) -> ProgressSnapshot {
        let received: BTreeSet<u32> = received.iter().copied().collect();
        summarize(
            &received,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap(),
            IntervalPolicy::major(),
            Some(&TierTable::reference()),
        )
        .unwrap()
    }

    #[test]
    fn same_seed_same_text() {
        let catalog = Catalog::standard();
        let received = BTreeSet::from([0, 1]);
        let mut a = Flavor::seeded(7);
        let mut b = Flavor::seeded(7);
        assert_eq!(a.code_name(), b.code_name());
        assert_eq!(
            a.contextual_transmission(&catalog, &received),
            b.contextual_transmission(&catalog, &received)
        );
    }

    #[test]
    fn code_name_shape() {
        let mut flavor = Flavor::seeded(42);
        for _ in 0..50 {
            let name = flavor.code_name();
            let (prefix, number) = name.split_once('-').unwrap();
            assert!(CODE_NAME_PREFIXES.contains(&prefix));
            let n: u32 = number.parse().unwrap();
            assert!((100..1000).contains(&n));
        }
    }

    #[test]
    fn transmission_pool_follows_highest_received() {
        let catalog = Catalog::standard();
        let mut flavor = Flavor::seeded(1);

        let standby = flavor
            .contextual_transmission(&catalog, &BTreeSet::new())
            .unwrap();
        assert!(catalog.standby_transmissions().contains(&standby));

        let allowed: Vec<&String> = catalog.signals()[..=1]
            .iter()
            .flat_map(|s| s.transmissions.iter())
            .collect();
        for _ in 0..20 {
            let line = flavor
                .contextual_transmission(&catalog, &BTreeSet::from([1]))
                .unwrap();
            assert!(allowed.contains(&&line));
        }
    }

    #[test]
    fn hints_in_index_order() {
        let catalog = Catalog::standard();
        let hints = cryptic_hints(&catalog, &BTreeSet::from([2, 0]));
        assert_eq!(hints, vec![catalog.signals()[0].hint.clone(), catalog.signals()[2].hint.clone()]);
    }

    #[test]
    fn quote_bands() {
        assert!(progress_quote(0).contains("not been selected"));
        assert_eq!(progress_quote(1), progress_quote(2));
        assert_ne!(progress_quote(2), progress_quote(3));
        assert_eq!(progress_quote(9), progress_quote(12));
    }

    #[test]
    fn banner_and_status_follow_snapshot() {
        let catalog = Catalog::standard();

        let fresh = snapshot(&[], 1);
        assert_eq!(fresh.time_until_next, TimeUntilNext::Ready);
        assert!(status_line(&catalog, &fresh).contains("New signal available"));
        assert!(access_banner(&fresh).contains("locked"));

        let first = snapshot(&[0], 2);
        assert_eq!(access_banner(&first), "[ Progress: 11% - 8 signals remaining ]");
        assert!(status_line(&catalog, &first).starts_with(">>> Phase IDENTIFICATION"));

        let all: Vec<u32> = (0..9).collect();
        let done = snapshot(&all, 2);
        assert!(access_banner(&done).contains("Full access"));
        assert!(status_line(&catalog, &done).contains("Sequence complete"));
    }
}
