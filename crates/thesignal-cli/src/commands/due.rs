use clap::Args;
use serde::Serialize;
use thesignal_core::{Catalog, Config, Database, DeliveryCycle, Track};

use super::{Clock, CmdResult, ConsoleNotifier};

#[derive(Args)]
pub struct DueArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
    #[command(flatten)]
    clock: Clock,
}

#[derive(Serialize)]
struct DueItem {
    track: Track,
    index: u32,
    release_at: chrono::DateTime<chrono::Utc>,
}

pub fn run(args: DueArgs) -> CmdResult {
    let now = args.clock.now()?;
    let db = Database::open()?;
    let config = Config::load()?;
    let catalog = Catalog::standard();
    let cycle = DeliveryCycle::new(&db, &ConsoleNotifier, &catalog, &config);

    let items: Vec<DueItem> = cycle
        .pending(now)?
        .into_iter()
        .map(|(track, entry)| DueItem {
            track,
            index: entry.index,
            release_at: entry.release_at,
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else if items.is_empty() {
        println!("no signals due");
    } else {
        for item in &items {
            println!(
                "{} #{}  released {}",
                item.track,
                item.index,
                item.release_at.format("%Y-%m-%d")
            );
        }
    }
    Ok(())
}
