use clap::Args;
use serde::Serialize;
use thesignal_core::flavor::{access_banner, cryptic_hints, progress_quote, status_line};
use thesignal_core::{
    summarize, AccessTier, Catalog, Config, Database, Flavor, ProgressSnapshot, ProgressStore,
    Track,
};

use super::{Clock, CmdResult};

#[derive(Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
    #[command(flatten)]
    clock: Clock,
}

#[derive(Serialize)]
struct StatusReport {
    signup_date: chrono::NaiveDate,
    code_name: String,
    major: ProgressSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    minor: Option<ProgressSnapshot>,
    /// Tier unlocked by further major signals, absent at the top.
    #[serde(skip_serializing_if = "Option::is_none")]
    next_tier: Option<AccessTier>,
    hints: Vec<String>,
}

pub fn run(args: StatusArgs) -> CmdResult {
    let now = args.clock.now()?;
    let db = Database::open()?;
    let config = Config::load()?;
    let catalog = Catalog::standard();
    let state = db.load()?;

    let Some(signup) = state.signup_date() else {
        if args.json {
            println!("{}", serde_json::json!({ "activated": false }));
        } else {
            println!("not activated (run `thesignal activate`)");
        }
        return Ok(());
    };

    let major = summarize(
        state.received(Track::Major),
        signup,
        now,
        config.major_policy(),
        Some(&config.tiers),
    )?;
    let minor = if config.minor.enabled {
        Some(summarize(
            state.received(Track::Minor),
            signup,
            now,
            config.minor_policy(),
            None,
        )?)
    } else {
        None
    };
    let report = StatusReport {
        signup_date: signup,
        code_name: Flavor::from_config(&config.flavor).code_name(),
        hints: cryptic_hints(&catalog, state.received(Track::Major)),
        next_tier: config
            .tiers
            .next_tier(i64::from(major.signals_received))
            .cloned(),
        major,
        minor,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let major = &report.major;
    println!("Code name:  {}", report.code_name);
    println!("Signup:     {}", report.signup_date);
    println!("Day:        {}", major.days_since_start);
    if let Some(tier) = &major.tier {
        println!("Access:     {} (level {})", tier.name, tier.level);
        if let Some(unlock) = &tier.next_unlock {
            println!("Unlocks:    {unlock}");
        }
    }
    if let Some(next) = &report.next_tier {
        println!("Next tier:  {} at {} signals", next.name, next.threshold);
    }
    println!(
        "Signals:    {}/{} ({}%)",
        major.signals_received, major.total_signals, major.percentage
    );
    println!("Next:       {}", major.time_until_next);
    if let Some(minor) = &report.minor {
        println!(
            "Mini:       {}/{} ({})",
            minor.signals_received, minor.total_signals, minor.time_until_next
        );
    }
    println!();
    println!("{}", status_line(&catalog, major));
    println!("{}", access_banner(major));
    println!("{}", progress_quote(major.signals_received));
    for hint in &report.hints {
        println!("  {hint}");
    }
    Ok(())
}
