use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "droplet-cli", version, about = "Droplet hydration reminder CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the reminder daemon
    Run {
        /// Override the configured tick interval
        #[arg(long)]
        interval_secs: Option<u64>,
    },
    /// Profile configuration
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Record a manual drink
    Log {
        #[arg(long)]
        user: String,
        /// Amount in the profile's unit
        #[arg(long)]
        amount: f64,
    },
    /// Today's running total and next reminder
    Status {
        #[arg(long)]
        user: String,
        #[arg(long)]
        json: bool,
    },
    /// Archived daily totals
    History {
        #[arg(long)]
        user: String,
        /// Most recent N days only
        #[arg(long)]
        days: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Force a single tick pass
    Tick,
}

fn main() {
    commands::init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run { interval_secs } => commands::run::run(interval_secs),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Log { user, amount } => commands::log::run(&user, amount),
        Commands::Status { user, json } => commands::status::run(&user, json),
        Commands::History { user, days, json } => commands::history::run(&user, days, json),
        Commands::Tick => commands::tick::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
