pub mod database;
mod seed;

pub use database::{keys, Database};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns the data directory, `~/.config/focusgarden[-dev]/`.
///
/// Set FOCUSGARDEN_DATA_DIR to override the location entirely, or
/// FOCUSGARDEN_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var("FOCUSGARDEN_DATA_DIR") {
        Ok(explicit) => PathBuf::from(explicit),
        Err(_) => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("FOCUSGARDEN_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("focusgarden-dev")
            } else {
                base_dir.join("focusgarden")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
