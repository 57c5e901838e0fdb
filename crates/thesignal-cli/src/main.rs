use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "thesignal", version, about = "The Signal CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record the signup date and start the sequence
    Activate(commands::activate::ActivateArgs),
    /// Progression summary
    Status(commands::status::StatusArgs),
    /// Release timeline
    Schedule(commands::schedule::ScheduleArgs),
    /// Signals released but not yet received
    Due(commands::due::DueArgs),
    /// Acknowledge one due signal
    Receive(commands::receive::ReceiveArgs),
    /// Run one delivery cycle
    Sync(commands::sync::SyncArgs),
    /// Show a received signal
    Signal(commands::signal::SignalArgs),
    /// Print a contextual transmission
    Transmission(commands::transmission::TransmissionArgs),
    /// Access tier table
    Tiers(commands::tiers::TiersArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Activate(args) => commands::activate::run(args),
        Commands::Status(args) => commands::status::run(args),
        Commands::Schedule(args) => commands::schedule::run(args),
        Commands::Due(args) => commands::due::run(args),
        Commands::Receive(args) => commands::receive::run(args),
        Commands::Sync(args) => commands::sync::run(args),
        Commands::Signal(args) => commands::signal::run(args),
        Commands::Transmission(args) => commands::transmission::run(args),
        Commands::Tiers(args) => commands::tiers::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
