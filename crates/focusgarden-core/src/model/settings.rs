use serde::{Deserialize, Serialize};

/// User preferences read by the deadline handler.
///
/// Owned and written by the view layer; the core only reads them when
/// a deadline fires. Every field has a default so a partial or absent
/// record still yields usable values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_focus_title")]
    pub notification_title_focus: String,
    #[serde(default = "default_break_title")]
    pub notification_title_break: String,
    /// Notification sound id; `"none"` suppresses the sound.
    #[serde(default = "default_sound")]
    pub notification_sound: String,
    #[serde(default)]
    pub music_enabled: bool,
    #[serde(default)]
    pub music_track_url: Option<String>,
    #[serde(default = "default_volume")]
    pub music_volume: u32,
}

fn default_focus_title() -> String {
    "Focus cycle complete! Time to water your plant.".to_string()
}

fn default_break_title() -> String {
    "Break finished! Ready to get back?".to_string()
}

fn default_sound() -> String {
    "bell".to_string()
}

fn default_volume() -> u32 {
    50
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notification_title_focus: default_focus_title(),
            notification_title_break: default_break_title(),
            notification_sound: default_sound(),
            music_enabled: false,
            music_track_url: None,
            music_volume: default_volume(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_record_fills_defaults() {
        let s: Settings = serde_json::from_str(r#"{"notification_sound":"chime"}"#).unwrap();
        assert_eq!(s.notification_sound, "chime");
        assert_eq!(s.music_volume, 50);
        assert!(!s.notification_title_focus.is_empty());
    }
}
