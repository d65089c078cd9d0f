use clap::Subcommand;
use focusgarden_core::{blocking, BlockKind, BlockList, Database};
use uuid::Uuid;

#[derive(Subcommand)]
pub enum BlocklistAction {
    /// Print all block lists as JSON
    Show,
    /// Add a block list
    Add {
        name: String,
        /// Domain patterns; "*" matches every domain
        #[arg(long, required = true, num_args = 1..)]
        sites: Vec<String>,
        /// Invert polarity: listed sites pass, everything else is blocked
        #[arg(long)]
        allow: bool,
    },
    /// Remove a block list by id
    Remove { id: String },
    /// Check whether a domain is blocked by the active session
    Check { domain: String },
}

pub fn run(action: BlocklistAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        BlocklistAction::Show => {
            let lists = db.load_block_lists()?;
            println!("{}", serde_json::to_string_pretty(&lists)?);
        }
        BlocklistAction::Add { name, sites, allow } => {
            let list = BlockList {
                id: format!("bl-{}", Uuid::new_v4()),
                name,
                sites,
                kind: if allow { BlockKind::Allow } else { BlockKind::Block },
            };
            let mut lists = db.load_block_lists()?;
            lists.push(list.clone());
            db.save_block_lists(&lists)?;
            println!("{}", serde_json::to_string_pretty(&list)?);
        }
        BlocklistAction::Remove { id } => {
            let mut lists = db.load_block_lists()?;
            let before = lists.len();
            lists.retain(|l| l.id != id);
            if lists.len() == before {
                return Err(format!("no block list with id '{id}'").into());
            }
            db.save_block_lists(&lists)?;
        }
        BlocklistAction::Check { domain } => {
            let session = db.load_session()?;
            let lists = db.load_block_lists()?;
            let active = blocking::active_block_list(session.as_ref(), &lists);
            let blocked = active.map_or(false, |bl| bl.blocks(&domain));
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "domain": domain,
                    "blocked": blocked,
                    "list": active.map(|bl| bl.name.clone()),
                }))?
            );
        }
    }

    Ok(())
}
