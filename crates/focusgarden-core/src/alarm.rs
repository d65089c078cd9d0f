//! Wake-up scheduling and the detached deadline handler.
//!
//! The engine schedules a wake-up at every deadline it persists, so a
//! transition fires even when no interactive surface is open to watch
//! the countdown. One well-known timer name is used for the single
//! active session; only one deadline is ever outstanding.
//!
//! Scheduling is redundant with in-process countdown polling and is
//! best-effort: a scheduler failure is logged, never fatal.

use thiserror::Error;
use tracing::debug;

use crate::error::CoreError;
use crate::events::Event;
use crate::model::SessionState;
use crate::session::SessionEngine;

/// The single well-known timer name.
pub const ALARM_NAME: &str = "focusTimer";

/// Notification title used by the deadline handler.
const NOTIFICATION_TITLE: &str = "Focusgarden";

#[derive(Error, Debug)]
pub enum AlarmError {
    #[error("scheduler unavailable: {0}")]
    Unavailable(String),
}

/// Platform primitive that invokes a callback at a future instant,
/// even without an interactive surface open.
pub trait WakeupScheduler {
    fn schedule(&self, name: &str, when_epoch_ms: i64) -> Result<(), AlarmError>;
    fn cancel(&self, name: &str) -> Result<(), AlarmError>;
}

/// Scheduler for contexts that drive the engine by polling alone.
pub struct NoopScheduler;

impl WakeupScheduler for NoopScheduler {
    fn schedule(&self, name: &str, when_epoch_ms: i64) -> Result<(), AlarmError> {
        debug!(name, when_epoch_ms, "wake-up noted (polling context)");
        Ok(())
    }

    fn cancel(&self, name: &str) -> Result<(), AlarmError> {
        debug!(name, "wake-up cancelled (polling context)");
        Ok(())
    }
}

/// Side-channel the deadline handler drives: user-visible notification
/// plus ambient audio control. Implementations live at the edges; all
/// calls are fire-and-forget.
pub trait Notifier {
    fn notify(&self, title: &str, message: &str);
    fn stop_music(&self);
    fn play_sound(&self, url: &str);
}

/// Map a notification sound id to its URL. Unknown ids (and `"none"`)
/// map to nothing.
pub fn sound_url(id: &str) -> Option<&'static str> {
    match id {
        "bell" => Some("https://cdn.freesound.org/previews/339/339816_5121236-lq.mp3"),
        "chime" => Some("https://cdn.freesound.org/previews/352/352651_4019029-lq.mp3"),
        "success" => Some("https://cdn.freesound.org/previews/270/270404_5123851-lq.mp3"),
        _ => None,
    }
}

/// Run the detached wake-up callback.
///
/// Re-validates against the store via [`SessionEngine::poll`]; a stale
/// or early alarm (deadline already handled elsewhere, or not due yet)
/// does nothing. When a deadline does fire: stop any ambient audio,
/// raise a notification worded for the phase that just ended, and play
/// the configured sound unless it is `"none"`.
pub fn handle_deadline(
    engine: &mut SessionEngine,
    notifier: &dyn Notifier,
) -> Result<Option<Event>, CoreError> {
    let Some(before) = engine.refresh()? else {
        return Ok(None);
    };
    let settings = engine.db().load_settings()?;

    let Some(event) = engine.poll()? else {
        return Ok(None);
    };

    notifier.stop_music();
    let message = match before.state {
        SessionState::Focus => settings.notification_title_focus.as_str(),
        _ => settings.notification_title_break.as_str(),
    };
    notifier.notify(NOTIFICATION_TITLE, message);
    if settings.notification_sound != "none" {
        if let Some(url) = sound_url(&settings.notification_sound) {
            notifier.play_sound(url);
        }
    }

    Ok(Some(event))
}
