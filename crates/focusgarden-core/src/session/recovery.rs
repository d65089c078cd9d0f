//! Cold-start recovery.
//!
//! On process start the persisted session is the only truth: absent
//! means idle, present means resume the countdown from the stored
//! deadline. A deadline that already passed while the process was
//! unloaded is driven through the same edge-triggered [`poll`] as a
//! live expiry, so the transition (and its accrual) fires exactly
//! once no matter how long the process was gone.
//!
//! [`poll`]: SessionEngine::poll

use serde::Serialize;

use crate::error::CoreError;
use crate::events::Event;
use crate::model::Session;

use super::engine::SessionEngine;

/// Outcome of resuming from the durable store.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "resumed")]
pub enum Resumed {
    /// No active session; land on the idle view. `event` is set when
    /// a persisted break had already fully elapsed and was cleared.
    Idle { event: Option<Event> },
    /// A session is active; resume its countdown from the stored
    /// deadline. `event` is set when a deadline passed while the
    /// process was unloaded and its transition was applied just now.
    Active {
        session: Session,
        event: Option<Event>,
    },
}

impl SessionEngine {
    /// Reconstruct state from the store, applying any transition whose
    /// deadline passed while the process was unloaded.
    ///
    /// # Errors
    /// A store read failure is surfaced to the caller; it must be
    /// shown as a load failure, not treated as "no session".
    pub fn resume(&mut self) -> Result<Resumed, CoreError> {
        if self.refresh()?.is_none() {
            return Ok(Resumed::Idle { event: None });
        }

        let event = self.poll()?;
        match self.current() {
            Some(session) => Ok(Resumed::Active {
                session: session.clone(),
                event,
            }),
            None => Ok(Resumed::Idle { event }),
        }
    }
}
