use clap::Args;
use thesignal_core::{Catalog, Config, Database, Flavor, ProgressStore, Track};

use super::CmdResult;

#[derive(Args)]
pub struct TransmissionArgs {
    /// Seed for reproducible output; overrides `flavor.seed`
    #[arg(long)]
    seed: Option<u64>,
}

pub fn run(args: TransmissionArgs) -> CmdResult {
    let db = Database::open()?;
    let config = Config::load()?;
    let state = db.load()?;
    let catalog = Catalog::standard();

    let mut flavor = match args.seed {
        Some(seed) => Flavor::seeded(seed),
        None => Flavor::from_config(&config.flavor),
    };
    match flavor.contextual_transmission(&catalog, state.received(Track::Major)) {
        Some(line) => println!("{line}"),
        None => println!("..."),
    }
    Ok(())
}
