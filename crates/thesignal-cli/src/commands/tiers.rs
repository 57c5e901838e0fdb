use clap::Args;
use thesignal_core::{Config, TierTable};

use super::CmdResult;

#[derive(Args)]
pub struct TiersArgs {
    /// Show the grade table instead of the configured access tiers
    #[arg(long)]
    grades: bool,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: TiersArgs) -> CmdResult {
    let table = if args.grades {
        TierTable::grades()
    } else {
        Config::load()?.tiers
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    for tier in table.tiers() {
        println!(
            "{:>2}+  L{}  {:<14} {}",
            tier.threshold, tier.level, tier.name, tier.description
        );
    }
    Ok(())
}
