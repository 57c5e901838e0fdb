use clap::Args;
use thesignal_core::{Catalog, Database, ProgressStore, Track};

use super::CmdResult;

#[derive(Args)]
pub struct SignalArgs {
    /// Zero-based major signal index
    index: u32,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: SignalArgs) -> CmdResult {
    let db = Database::open()?;
    let state = db.load()?;
    let catalog = Catalog::standard();

    let signal = catalog
        .get(args.index)
        .ok_or_else(|| format!("no signal #{}", args.index))?;
    if !state.received(Track::Major).contains(&args.index) {
        return Err(format!("signal #{} has not been received", args.index).into());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(signal)?);
        return Ok(());
    }

    println!("=== {} ===", signal.title);
    println!("Phase: {} | Urgency: {}", signal.phase, signal.urgency);
    println!();
    println!("{}", signal.body);
    println!();
    println!("{}", signal.hint);
    println!("{}", signal.technical_data);
    if !signal.unlocks.is_empty() {
        println!();
        println!("Unlocked:");
        for unlock in &signal.unlocks {
            println!("  - {unlock}");
        }
    }
    Ok(())
}
