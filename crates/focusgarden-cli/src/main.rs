use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "focusgarden", version, about = "Focusgarden CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Session control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Focus list management
    List {
        #[command(subcommand)]
        action: commands::lists::ListAction,
    },
    /// Block list management
    Blocklist {
        #[command(subcommand)]
        action: commands::blocklists::BlocklistAction,
    },
    /// Garden inspection
    Garden {
        #[command(subcommand)]
        action: commands::garden::GardenAction,
    },
    /// Cycle statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Notification and music settings
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action),
        Commands::List { action } => commands::lists::run(action),
        Commands::Blocklist { action } => commands::blocklists::run(action),
        Commands::Garden { action } => commands::garden::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Settings { action } => commands::settings::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
