//! Delivery cycle and its collaborators.
//!
//! The engine never does I/O itself. A [`DeliveryCycle`] borrows a
//! [`ProgressStore`], a [`Notifier`] and a [`ContentSource`], reads the
//! state wholesale, resolves due signals, and writes back one delivery at
//! a time. Call [`DeliveryCycle::run`] from a timer; calling it again
//! with the same `now` is a no-op.
//!
//! ## Modes
//!
//! - [`DeliveryMode::Acknowledge`]: due signals are reported as
//!   [`Event::SignalDue`]; the user accepts each one through
//!   [`DeliveryCycle::acknowledge`].
//! - [`DeliveryMode::Automatic`]: every due signal is added to the
//!   received set, persisted, then notified, in ascending index order.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, MinorSignal, SignalDefinition, Track};
use crate::error::{Result, StateError};
use crate::events::Event;
use crate::progression::TierTable;
use crate::resolver::{due_signals, received_in_range};
use crate::schedule::{IntervalPolicy, ScheduleEntry};
use crate::state::UserProgressState;
use crate::storage::{decode_state, decode_state_strict, encode_state, Config, KvStore};

/// Reads and writes the persisted user state.
pub trait ProgressStore {
    /// Read the state, replacing corrupt values with defaults.
    fn load(&self) -> Result<UserProgressState>;

    /// Read the state, failing with
    /// [`StateError::CorruptPersistedState`] on any undecodable value.
    fn load_strict(&self) -> Result<UserProgressState>;

    fn save(&self, state: &UserProgressState) -> Result<()>;
}

impl<T: KvStore> ProgressStore for T {
    fn load(&self) -> Result<UserProgressState> {
        decode_state(self)
    }

    fn load_strict(&self) -> Result<UserProgressState> {
        decode_state_strict(self)
    }

    fn save(&self, state: &UserProgressState) -> Result<()> {
        encode_state(self, state)
    }
}

/// Push notification sink. Fire-and-forget.
pub trait Notifier {
    fn schedule(&self, title: &str, body: &str, at: DateTime<Utc>);
}

/// Narrative payload lookup by index.
pub trait ContentSource {
    fn lookup(&self, index: u32) -> Option<&SignalDefinition>;

    fn minor(&self, index: u32) -> Option<MinorSignal>;
}

impl ContentSource for Catalog {
    fn lookup(&self, index: u32) -> Option<&SignalDefinition> {
        self.get(index)
    }

    fn minor(&self, index: u32) -> Option<MinorSignal> {
        Catalog::minor(self, index)
    }
}

/// Notifier that only logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn schedule(&self, title: &str, body: &str, at: DateTime<Utc>) {
        tracing::info!(%title, %body, %at, "notification scheduled");
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// Report due signals and wait for the user.
    #[default]
    Acknowledge,
    /// Receive and notify due signals as soon as they are found.
    Automatic,
}

pub struct DeliveryCycle<'a, S, N, C> {
    store: &'a S,
    notifier: &'a N,
    content: &'a C,
    config: &'a Config,
}

impl<'a, S, N, C> DeliveryCycle<'a, S, N, C>
where
    S: ProgressStore,
    N: Notifier,
    C: ContentSource,
{
    pub fn new(store: &'a S, notifier: &'a N, content: &'a C, config: &'a Config) -> Self {
        Self {
            store,
            notifier,
            content,
            config,
        }
    }

    fn tiers(&self) -> &TierTable {
        &self.config.tiers
    }

    fn tracks(&self) -> Vec<(Track, IntervalPolicy)> {
        let mut tracks = vec![(Track::Major, self.config.major_policy())];
        if self.config.minor.enabled {
            tracks.push((Track::Minor, self.config.minor_policy()));
        }
        tracks
    }

    /// Record the signup date for a fresh user.
    ///
    /// # Errors
    ///
    /// [`StateError::SignupAlreadySet`] if the user is already activated,
    /// [`StateError::CorruptPersistedState`] if the stored state cannot be
    /// decoded. A corrupt signup date is never overwritten.
    pub fn activate(&self, signup_date: NaiveDate, now: DateTime<Utc>) -> Result<Event> {
        let mut state = self.store.load_strict()?;
        state.activate(signup_date)?;
        self.store.save(&state)?;
        Ok(Event::Activated {
            signup_date,
            at: now,
        })
    }

    /// Due signals of every enabled track, major first, each by ascending index.
    pub fn pending(&self, now: DateTime<Utc>) -> Result<Vec<(Track, ScheduleEntry)>> {
        let state = self.store.load()?;
        if !state.is_activated() {
            return Ok(Vec::new());
        }
        let mut pending = Vec::new();
        for (track, policy) in self.tracks() {
            let schedule = state.schedule(policy)?;
            pending.extend(
                due_signals(&schedule, state.received(track), now)
                    .into_iter()
                    .map(|entry| (track, entry)),
            );
        }
        Ok(pending)
    }

    /// One polling pass.
    ///
    /// Returns no events for a user who has not been activated.
    pub fn run(&self, now: DateTime<Utc>) -> Result<Vec<Event>> {
        let pending = self.pending(now)?;
        if pending.is_empty() {
            tracing::debug!(%now, "no signals due");
            return Ok(Vec::new());
        }

        match self.config.delivery.mode {
            DeliveryMode::Acknowledge => Ok(pending
                .into_iter()
                .map(|(track, entry)| Event::SignalDue {
                    track,
                    index: entry.index,
                    release_at: entry.release_at,
                    at: now,
                })
                .collect()),
            DeliveryMode::Automatic => {
                let mut events = Vec::new();
                for (track, entry) in pending {
                    events.extend(self.deliver(track, entry.index, now)?);
                }
                Ok(events)
            }
        }
    }

    /// Accept one due signal on behalf of the user.
    ///
    /// # Errors
    ///
    /// Fails if the user is not activated, or the index is out of range,
    /// not yet due, or already received.
    pub fn acknowledge(&self, track: Track, index: u32, now: DateTime<Utc>) -> Result<Vec<Event>> {
        self.deliver(track, index, now)
    }

    fn deliver(&self, track: Track, index: u32, now: DateTime<Utc>) -> Result<Vec<Event>> {
        let mut state = self.store.load()?;
        if !state.is_activated() {
            return Err(StateError::NotActivated.into());
        }
        let policy = match track {
            Track::Major => self.config.major_policy(),
            Track::Minor => self.config.minor_policy(),
        };
        let pruned = state.retain_in_range(track, policy.count);
        if pruned > 0 {
            tracing::warn!(%track, pruned, "dropped received indices outside the track");
        }
        let schedule = state.schedule(policy)?;
        let before = received_in_range(&schedule, state.received(track));

        let receipt = state.acknowledge(track, &schedule, index, now)?;
        // Persist before presenting so a crash cannot double-deliver.
        self.store.save(&state)?;

        let release_at = schedule
            .get(index)
            .map(|e| e.release_at)
            .unwrap_or(receipt.received_at);
        let mut events = vec![Event::SignalDelivered {
            track,
            index,
            release_at,
            at: now,
        }];
        self.notify(track, index, release_at);

        if track == Track::Major {
            let after = before + 1;
            let from = self.tiers().classify(i64::from(before));
            let to = self.tiers().classify(i64::from(after));
            if from.level != to.level {
                tracing::info!(from = %from.name, to = %to.name, "access tier changed");
                events.push(Event::TierChanged {
                    from_level: from.level,
                    to_level: to.level,
                    name: to.name.clone(),
                    at: now,
                });
            }
            if after >= schedule.count() {
                events.push(Event::SequenceCompleted { at: now });
            }
        }
        Ok(events)
    }

    fn notify(&self, track: Track, index: u32, release_at: DateTime<Utc>) {
        let delivery = &self.config.delivery;
        match track {
            Track::Major => {
                let body = self
                    .content
                    .lookup(index)
                    .map(|s| s.title.clone())
                    .unwrap_or_else(|| format!("Signal #{}", index + 1));
                self.notifier.schedule(&delivery.major_title, &body, release_at);
            }
            Track::Minor => {
                let body = self
                    .content
                    .minor(index)
                    .map(|m| m.text)
                    .unwrap_or_else(|| format!("Mini-signal {}", index + 1));
                self.notifier.schedule(&delivery.minor_title, &body, release_at);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::storage::MemoryStore;
    use chrono::TimeZone;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<(String, String, DateTime<Utc>)>>,
    }

    impl Notifier for RecordingNotifier {
        fn schedule(&self, title: &str, body: &str, at: DateTime<Utc>) {
            self.sent
                .lock()
                .unwrap()
                .push((title.to_string(), body.to_string(), at));
        }
    }

    fn signup() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap()
    }

    fn major_only(mode: DeliveryMode) -> Config {
        let mut config = Config::default();
        config.minor.enabled = false;
        config.delivery.mode = mode;
        config
    }

    #[test]
    fn inactive_user_gets_nothing() {
        let store = MemoryStore::new();
        let notifier = RecordingNotifier::default();
        let catalog = Catalog::standard();
        let config = Config::default();
        let cycle = DeliveryCycle::new(&store, &notifier, &catalog, &config);
        assert!(cycle.run(at(2024, 3, 1)).unwrap().is_empty());
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn activate_twice_fails() {
        let store = MemoryStore::new();
        let notifier = RecordingNotifier::default();
        let catalog = Catalog::standard();
        let config = Config::default();
        let cycle = DeliveryCycle::new(&store, &notifier, &catalog, &config);
        cycle.activate(signup(), at(2024, 1, 1)).unwrap();
        assert!(matches!(
            cycle.activate(signup(), at(2024, 1, 2)),
            Err(CoreError::State(StateError::SignupAlreadySet { .. }))
        ));
    }

    #[test]
    fn activate_refuses_to_replace_corrupt_signup() {
        use crate::storage::keys;

        let store = MemoryStore::new();
        store.kv_set(keys::SIGNUP_DATE, "2024-01-0x").unwrap();
        store.kv_set(keys::RECEIVED_SIGNALS, "[0,1,2,3]").unwrap();
        let notifier = RecordingNotifier::default();
        let catalog = Catalog::standard();
        let config = Config::default();
        let cycle = DeliveryCycle::new(&store, &notifier, &catalog, &config);

        assert!(matches!(
            cycle.activate(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), at(2024, 6, 1)),
            Err(CoreError::State(StateError::CorruptPersistedState { ref key, .. }))
                if key == keys::SIGNUP_DATE
        ));
        assert_eq!(
            store.kv_get(keys::SIGNUP_DATE).unwrap().as_deref(),
            Some("2024-01-0x")
        );
    }

    #[test]
    fn delivery_prunes_out_of_range_indices() {
        use crate::storage::keys;

        let store = MemoryStore::new();
        store.kv_set(keys::SIGNUP_DATE, "2024-01-01").unwrap();
        store.kv_set(keys::RECEIVED_SIGNALS, "[0,14]").unwrap();
        let notifier = RecordingNotifier::default();
        let catalog = Catalog::standard();
        let config = major_only(DeliveryMode::Acknowledge);
        let cycle = DeliveryCycle::new(&store, &notifier, &catalog, &config);

        cycle.acknowledge(Track::Major, 1, at(2024, 1, 22)).unwrap();
        assert_eq!(
            store.kv_get(keys::RECEIVED_SIGNALS).unwrap().as_deref(),
            Some("[0,1]")
        );
    }

    #[test]
    fn acknowledge_mode_reports_without_delivering() {
        let store = MemoryStore::new();
        let notifier = RecordingNotifier::default();
        let catalog = Catalog::standard();
        let config = major_only(DeliveryMode::Acknowledge);
        let cycle = DeliveryCycle::new(&store, &notifier, &catalog, &config);
        cycle.activate(signup(), at(2024, 1, 1)).unwrap();

        let events = cycle.run(at(2024, 1, 22)).unwrap();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], Event::SignalDue { index: 0, .. }));
        assert!(matches!(events[1], Event::SignalDue { index: 1, .. }));
        assert!(store.load().unwrap().received(Track::Major).is_empty());
        assert!(notifier.sent.lock().unwrap().is_empty());

        let events = cycle.acknowledge(Track::Major, 0, at(2024, 1, 22)).unwrap();
        assert!(matches!(events[0], Event::SignalDelivered { index: 0, .. }));
        assert!(matches!(
            events[1],
            Event::TierChanged { from_level: 0, to_level: 1, .. }
        ));
        assert_eq!(cycle.run(at(2024, 1, 22)).unwrap().len(), 1);
    }

    #[test]
    fn automatic_mode_delivers_each_due_signal_once_in_order() {
        let store = MemoryStore::new();
        let notifier = RecordingNotifier::default();
        let catalog = Catalog::standard();
        let config = major_only(DeliveryMode::Automatic);
        let cycle = DeliveryCycle::new(&store, &notifier, &catalog, &config);
        cycle.activate(signup(), at(2024, 1, 1)).unwrap();

        let events = cycle.run(at(2024, 2, 12)).unwrap();
        let delivered: Vec<u32> = events
            .iter()
            .filter_map(|e| match e {
                Event::SignalDelivered { index, .. } => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(delivered, vec![0, 1, 2]);
        // PUBLIC -> INITIATED on the first, INITIATED -> OPERATOR on the third
        let tier_changes = events
            .iter()
            .filter(|e| matches!(e, Event::TierChanged { .. }))
            .count();
        assert_eq!(tier_changes, 2);

        let sent = notifier.sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[0].0, "New Signal");
        assert_eq!(sent[0].1, "ACTIVATION SIGNAL");
        assert_eq!(sent[2].2, Utc.with_ymd_and_hms(2024, 2, 12, 0, 0, 0).unwrap());

        // Re-running with the same clock delivers nothing new.
        assert!(cycle.run(at(2024, 2, 12)).unwrap().is_empty());
        assert_eq!(notifier.sent.lock().unwrap().len(), 3);

        let state = store.load().unwrap();
        let order: Vec<u32> = state.receipts().iter().map(|r| r.index).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn automatic_mode_completes_sequence() {
        let store = MemoryStore::new();
        let notifier = RecordingNotifier::default();
        let catalog = Catalog::standard();
        let config = major_only(DeliveryMode::Automatic);
        let cycle = DeliveryCycle::new(&store, &notifier, &catalog, &config);
        cycle.activate(signup(), at(2024, 1, 1)).unwrap();

        let events = cycle.run(at(2024, 12, 31)).unwrap();
        assert!(matches!(events.last(), Some(Event::SequenceCompleted { .. })));
        assert_eq!(store.load().unwrap().received(Track::Major).len(), 9);
    }

    #[test]
    fn minor_track_uses_its_own_title_and_set() {
        let store = MemoryStore::new();
        let notifier = RecordingNotifier::default();
        let catalog = Catalog::standard();
        let mut config = Config::default();
        config.delivery.mode = DeliveryMode::Automatic;
        let cycle = DeliveryCycle::new(&store, &notifier, &catalog, &config);
        cycle.activate(signup(), at(2024, 1, 1)).unwrap();

        cycle.run(at(2024, 1, 3)).unwrap();
        let state = store.load().unwrap();
        assert_eq!(state.received(Track::Major).len(), 1);
        assert_eq!(state.received(Track::Minor).len(), 3);

        let sent = notifier.sent.lock().unwrap();
        let minor_titles = sent.iter().filter(|s| s.0 == "Mini Signal").count();
        assert_eq!(minor_titles, 3);
        assert_eq!(sent[1].1, catalog.minor(0).unwrap().text);
    }

    #[test]
    fn acknowledge_errors_propagate() {
        let store = MemoryStore::new();
        let notifier = RecordingNotifier::default();
        let catalog = Catalog::standard();
        let config = major_only(DeliveryMode::Acknowledge);
        let cycle = DeliveryCycle::new(&store, &notifier, &catalog, &config);

        assert!(matches!(
            cycle.acknowledge(Track::Major, 0, at(2024, 1, 1)),
            Err(CoreError::State(StateError::NotActivated))
        ));
        cycle.activate(signup(), at(2024, 1, 1)).unwrap();
        assert!(matches!(
            cycle.acknowledge(Track::Major, 1, at(2024, 1, 1)),
            Err(CoreError::State(StateError::NotYetDue { .. }))
        ));
    }
}
