use clap::Args;
use thesignal_core::{Catalog, Config, Database, DeliveryCycle};

use super::{describe, Clock, CmdResult, ConsoleNotifier};

#[derive(Args)]
pub struct SyncArgs {
    /// Output events as JSON
    #[arg(long)]
    json: bool,
    #[command(flatten)]
    clock: Clock,
}

pub fn run(args: SyncArgs) -> CmdResult {
    let now = args.clock.now()?;
    let db = Database::open()?;
    let config = Config::load()?;
    let catalog = Catalog::standard();
    let cycle = DeliveryCycle::new(&db, &ConsoleNotifier, &catalog, &config);

    let events = cycle.run(now)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&events)?);
    } else if events.is_empty() {
        println!("nothing to deliver");
    } else {
        for event in &events {
            println!("{}  {}", event.at().format("%Y-%m-%d %H:%M"), describe(event));
        }
    }
    Ok(())
}
