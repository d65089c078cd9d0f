use serde::{Deserialize, Serialize};

use super::FocusList;

/// Prep countdown length.
pub const PREP_MS: i64 = 60 * 1000;

/// Extension granted to an expired focus session.
pub const EXTEND_MS: i64 = 15 * 60 * 1000;

/// Phase of the single active session.
///
/// "No session" is represented by the absence of a persisted
/// [`Session`], not by an enum member. There is no paused phase; no
/// transition pauses a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Prep,
    Focus,
    Break,
}

/// The single active focus/break run.
///
/// Deadlines are absolute wall-clock timestamps: `end_time` is always
/// computed as `start_time + duration` at transition time, so "has the
/// deadline passed" is a pure comparison against `now` and survives
/// arbitrarily long process suspension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Embedded copy of the originating list.
    pub list: FocusList,
    pub state: SessionState,
    /// Epoch milliseconds.
    pub start_time: i64,
    /// Epoch milliseconds. Always strictly greater than `start_time`.
    pub end_time: i64,
}

impl Session {
    /// Create a fresh session at `now_ms`, in prep or straight into
    /// focus.
    pub fn start(list: FocusList, with_prep: bool, now_ms: i64) -> Self {
        if with_prep {
            Self {
                list,
                state: SessionState::Prep,
                start_time: now_ms,
                end_time: now_ms + PREP_MS,
            }
        } else {
            let end = now_ms + focus_ms(&list);
            Self {
                list,
                state: SessionState::Focus,
                start_time: now_ms,
                end_time: end,
            }
        }
    }

    /// Move into the focus phase, restarting the clock at `now_ms`.
    pub fn into_focus(self, now_ms: i64) -> Self {
        let end = now_ms + focus_ms(&self.list);
        Self {
            state: SessionState::Focus,
            start_time: now_ms,
            end_time: end,
            ..self
        }
    }

    /// Move into the break phase, restarting the clock at `now_ms`.
    pub fn into_break(self, now_ms: i64) -> Self {
        let end = now_ms + break_ms(&self.list);
        Self {
            state: SessionState::Break,
            start_time: now_ms,
            end_time: end,
            ..self
        }
    }

    /// Grant a fixed extension from `now_ms`, staying in focus.
    pub fn extended(self, now_ms: i64) -> Self {
        Self {
            state: SessionState::Focus,
            start_time: now_ms,
            end_time: now_ms + EXTEND_MS,
            ..self
        }
    }

    /// Milliseconds left on the current deadline, clamped at zero.
    pub fn remaining_ms(&self, now_ms: i64) -> i64 {
        (self.end_time - now_ms).max(0)
    }

    /// Whether the current deadline has passed.
    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms >= self.end_time
    }

    /// Total length of the current phase.
    pub fn duration_ms(&self) -> i64 {
        self.end_time - self.start_time
    }
}

fn focus_ms(list: &FocusList) -> i64 {
    list.focus_minutes as i64 * 60 * 1000
}

fn break_ms(list: &FocusList) -> i64 {
    list.break_minutes as i64 * 60 * 1000
}
