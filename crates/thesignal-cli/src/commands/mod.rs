pub mod activate;
pub mod config;
pub mod due;
pub mod receive;
pub mod schedule;
pub mod signal;
pub mod status;
pub mod sync;
pub mod tiers;
pub mod transmission;

use chrono::{DateTime, Utc};
use clap::Args;
use thesignal_core::{Event, Notifier};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Clock override shared by time-dependent commands.
#[derive(Args, Debug, Clone, Default)]
pub struct Clock {
    /// Pin "now" to an RFC 3339 timestamp (e.g. 2024-01-22T09:00:00Z)
    #[arg(long)]
    pub now: Option<String>,
}

impl Clock {
    pub fn now(&self) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
        match &self.now {
            Some(raw) => Ok(DateTime::parse_from_rfc3339(raw)
                .map_err(|e| format!("invalid --now '{raw}': {e}"))?
                .with_timezone(&Utc)),
            None => Ok(Utc::now()),
        }
    }
}

/// Prints notifications to stderr.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn schedule(&self, title: &str, body: &str, at: DateTime<Utc>) {
        tracing::debug!(%at, "notification");
        eprintln!("[{title}] {body}");
    }
}

pub fn describe(event: &Event) -> String {
    match event {
        Event::Activated { signup_date, .. } => format!("activated: {signup_date}"),
        Event::SignalDue {
            track,
            index,
            release_at,
            ..
        } => format!("due: {track} #{index} (released {})", release_at.format("%Y-%m-%d")),
        Event::SignalDelivered { track, index, .. } => format!("received: {track} #{index}"),
        Event::TierChanged { name, to_level, .. } => {
            format!("access level {to_level}: {name}")
        }
        Event::SequenceCompleted { .. } => "sequence complete".to_string(),
    }
}
