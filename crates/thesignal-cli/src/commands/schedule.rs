use clap::Args;
use serde::Serialize;
use thesignal_core::{Config, Database, ProgressStore, StateError, Track};

use super::{Clock, CmdResult};

#[derive(Args)]
pub struct ScheduleArgs {
    /// Show the minor track instead of the major one
    #[arg(long)]
    minor: bool,
    /// Output as JSON
    #[arg(long)]
    json: bool,
    #[command(flatten)]
    clock: Clock,
}

#[derive(Serialize)]
struct Row {
    index: u32,
    release_date: chrono::NaiveDate,
    days_from_signup: i64,
    released: bool,
    received: bool,
}

pub fn run(args: ScheduleArgs) -> CmdResult {
    let now = args.clock.now()?;
    let db = Database::open()?;
    let config = Config::load()?;
    let state = db.load()?;
    if !state.is_activated() {
        return Err(StateError::NotActivated.into());
    }

    let (track, policy) = if args.minor {
        (Track::Minor, config.minor_policy())
    } else {
        (Track::Major, config.major_policy())
    };
    let schedule = state.schedule(policy)?;
    let received = state.received(track);
    let rows: Vec<Row> = schedule
        .entries()
        .iter()
        .map(|e| Row {
            index: e.index,
            release_date: e.release_date,
            days_from_signup: e.days_from_signup,
            released: e.release_at <= now,
            received: received.contains(&e.index),
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{:<6} {:<12} {:>5}  STATUS", "INDEX", "RELEASE", "DAY");
    for row in &rows {
        let status = match (row.received, row.released) {
            (true, _) => "received",
            (false, true) => "due",
            (false, false) => "locked",
        };
        println!(
            "{:<6} {:<12} {:>5}  {}",
            row.index, row.release_date, row.days_from_signup, status
        );
    }
    println!("{track} track spans {} days", policy.span_days());
    Ok(())
}
