use clap::Subcommand;
use focusgarden_core::Database;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print settings as JSON
    Show,
    /// Update one or more settings
    Set {
        /// Notification text for a finished focus cycle
        #[arg(long)]
        focus_title: Option<String>,
        /// Notification text for a finished break
        #[arg(long)]
        break_title: Option<String>,
        /// Notification sound id (bell, chime, success, none)
        #[arg(long)]
        sound: Option<String>,
        /// Ambient music on or off
        #[arg(long)]
        music: Option<bool>,
        /// Ambient music track URL
        #[arg(long)]
        music_track: Option<String>,
        /// Ambient music volume (0-100)
        #[arg(long)]
        music_volume: Option<u32>,
    },
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        SettingsAction::Show => {
            let settings = db.load_settings()?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        SettingsAction::Set {
            focus_title,
            break_title,
            sound,
            music,
            music_track,
            music_volume,
        } => {
            let mut settings = db.load_settings()?;
            if let Some(v) = focus_title {
                settings.notification_title_focus = v;
            }
            if let Some(v) = break_title {
                settings.notification_title_break = v;
            }
            if let Some(v) = sound {
                settings.notification_sound = v;
            }
            if let Some(v) = music {
                settings.music_enabled = v;
            }
            if let Some(v) = music_track {
                settings.music_track_url = Some(v);
            }
            if let Some(v) = music_volume {
                settings.music_volume = v.min(100);
            }
            db.save_settings(&settings)?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }

    Ok(())
}
