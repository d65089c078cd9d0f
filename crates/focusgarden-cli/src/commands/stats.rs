use chrono::Utc;
use clap::Subcommand;
use focusgarden_core::Database;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Print today's cycle stats as JSON
    Today,
    /// Print all recorded days as JSON
    All,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let stats = db.load_stats()?;

    match action {
        StatsAction::Today => {
            let today = Utc::now().format("%Y-%m-%d").to_string();
            let record = stats.iter().find(|s| s.date == today);
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        StatsAction::All => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    Ok(())
}
