//! # The Signal Core Library
//!
//! Content-drip scheduling and progression engine for "The Signal", a
//! narrative experience that releases a fixed sequence of signals to a user
//! on a calendar anchored to their signup date. The `thesignal` CLI is a
//! thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Schedule**: Pure calendar arithmetic turning a signup date into
//!   release instants, one per signal index
//! - **Resolver**: Which signals are due, which is next, how long until it lands
//! - **Progression**: Cumulative received count to access tier
//! - **Delivery**: Polling cycle over pluggable storage, notification and
//!   content seams
//! - **Storage**: SQLite key-value persistence and TOML configuration
//!
//! ## Key Components
//!
//! - [`IntervalPolicy`]: Interval and count of a release track
//! - [`UserProgressState`]: Signup date plus received sets
//! - [`DeliveryCycle`]: Applies due signals and emits [`Event`]s
//! - [`TierTable`]: Access tier classifier
//! - [`Database`]: Progress persistence
//! - [`Config`]: Application configuration management

pub mod catalog;
pub mod delivery;
pub mod error;
pub mod events;
pub mod flavor;
pub mod progress;
pub mod progression;
pub mod resolver;
pub mod schedule;
pub mod state;
pub mod storage;

pub use catalog::{Catalog, MinorSignal, SignalDefinition, Track};
pub use delivery::{ContentSource, DeliveryCycle, DeliveryMode, Notifier, ProgressStore, TracingNotifier};
pub use error::{ConfigError, CoreError, ScheduleError, StateError, StorageError, TierTableError};
pub use events::Event;
pub use flavor::Flavor;
pub use progress::{summarize, ProgressSnapshot};
pub use progression::{AccessTier, TierTable};
pub use resolver::{due_signals, next_signal, time_until_next, Countdown, TimeUntilNext};
pub use schedule::{compute_schedule, IntervalPolicy, Schedule, ScheduleEntry};
pub use state::{Receipt, UserProgressState};
pub use storage::{Config, Database, KvStore, MemoryStore};
