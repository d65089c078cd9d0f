use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::SessionState;

/// Every applied transition produces an Event.
/// Interface surfaces print or relay them; polls that hit a guard
/// rejection produce none.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        state: SessionState,
        list_id: String,
        list_name: String,
        end_time: i64,
        at: DateTime<Utc>,
    },
    PrepCompleted {
        end_time: i64,
        at: DateTime<Utc>,
    },
    /// Focus deadline reached; session moved to break.
    FocusCompleted {
        end_time: i64,
        at: DateTime<Utc>,
    },
    /// Break deadline reached; session cleared.
    BreakCompleted {
        at: DateTime<Utc>,
    },
    /// Expired focus session granted a fixed extension.
    SessionExtended {
        end_time: i64,
        at: DateTime<Utc>,
    },
    /// Session abandoned by the user. `penalized` is false only when
    /// the session was still in prep.
    SessionAbandoned {
        penalized: bool,
        at: DateTime<Utc>,
    },
}
