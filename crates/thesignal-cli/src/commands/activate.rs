use clap::Args;
use thesignal_core::schedule::parse_signup_date;
use thesignal_core::{Catalog, Config, Database, DeliveryCycle};

use super::{describe, Clock, CmdResult, ConsoleNotifier};

#[derive(Args)]
pub struct ActivateArgs {
    /// Signup date (YYYY-MM-DD); defaults to today in UTC
    #[arg(long)]
    date: Option<String>,
    #[command(flatten)]
    clock: Clock,
}

pub fn run(args: ActivateArgs) -> CmdResult {
    let now = args.clock.now()?;
    let signup = match args.date {
        Some(raw) => parse_signup_date(&raw)?,
        None => now.date_naive(),
    };

    let db = Database::open()?;
    let config = Config::load()?;
    let catalog = Catalog::standard();
    let cycle = DeliveryCycle::new(&db, &ConsoleNotifier, &catalog, &config);
    let event = cycle.activate(signup, now)?;
    println!("{}", describe(&event));
    Ok(())
}
