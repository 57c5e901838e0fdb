use clap::Args;
use thesignal_core::{Catalog, Config, Database, DeliveryCycle, Track};

use super::{describe, Clock, CmdResult, ConsoleNotifier};

#[derive(Args)]
pub struct ReceiveArgs {
    /// Zero-based signal index
    index: u32,
    /// Acknowledge a minor signal instead of a major one
    #[arg(long)]
    minor: bool,
    #[command(flatten)]
    clock: Clock,
}

pub fn run(args: ReceiveArgs) -> CmdResult {
    let now = args.clock.now()?;
    let track = if args.minor { Track::Minor } else { Track::Major };

    let db = Database::open()?;
    let config = Config::load()?;
    let catalog = Catalog::standard();
    let cycle = DeliveryCycle::new(&db, &ConsoleNotifier, &catalog, &config);
    for event in cycle.acknowledge(track, args.index, now)? {
        println!("{}", describe(&event));
    }
    Ok(())
}
