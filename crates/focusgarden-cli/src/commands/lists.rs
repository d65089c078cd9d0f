use clap::Subcommand;
use focusgarden_core::{Database, FocusList};
use uuid::Uuid;

#[derive(Subcommand)]
pub enum ListAction {
    /// Print all focus lists as JSON
    Show,
    /// Add a focus list
    Add {
        name: String,
        #[arg(long, default_value_t = 25)]
        focus_minutes: u64,
        #[arg(long, default_value_t = 5)]
        break_minutes: u64,
        /// Id of the block list applied during focus
        #[arg(long)]
        block_list: String,
    },
    /// Remove a focus list by id
    Remove { id: String },
}

pub fn run(action: ListAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        ListAction::Show => {
            let lists = db.load_focus_lists()?;
            println!("{}", serde_json::to_string_pretty(&lists)?);
        }
        ListAction::Add {
            name,
            focus_minutes,
            break_minutes,
            block_list,
        } => {
            let list = FocusList {
                id: format!("fl-{}", Uuid::new_v4()),
                name,
                focus_minutes,
                break_minutes,
                block_list_id: block_list,
            };
            list.validate()?;

            let mut lists = db.load_focus_lists()?;
            lists.push(list.clone());
            db.save_focus_lists(&lists)?;
            println!("{}", serde_json::to_string_pretty(&list)?);
        }
        ListAction::Remove { id } => {
            let mut lists = db.load_focus_lists()?;
            let before = lists.len();
            lists.retain(|l| l.id != id);
            if lists.len() == before {
                return Err(format!("no focus list with id '{id}'").into());
            }
            db.save_focus_lists(&lists)?;
        }
    }

    Ok(())
}
