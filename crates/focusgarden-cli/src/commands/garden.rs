use clap::Subcommand;
use focusgarden_core::Database;

#[derive(Subcommand)]
pub enum GardenAction {
    /// Print the garden as JSON
    Show {
        /// Only plants from this day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
}

pub fn run(action: GardenAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        GardenAction::Show { date } => {
            let mut garden = db.load_garden()?;
            if let Some(date) = date {
                garden.retain(|p| p.date == date);
            }
            println!("{}", serde_json::to_string_pretty(&garden)?);
        }
    }

    Ok(())
}
