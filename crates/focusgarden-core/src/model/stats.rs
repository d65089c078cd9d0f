use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Per-day aggregate of completed vs interrupted cycles.
///
/// Keyed by calendar day; at most one record per date. The
/// `emergency_access` map (site -> count of emergency unblocks) is
/// written by the view layer and preserved untouched by accrual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleStat {
    /// Calendar day, `YYYY-MM-DD`.
    pub date: String,
    pub completed: u32,
    pub interrupted: u32,
    #[serde(default)]
    pub emergency_access: HashMap<String, u32>,
}

impl CycleStat {
    /// Fresh zeroed record for `date`.
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            completed: 0,
            interrupted: 0,
            emergency_access: HashMap::new(),
        }
    }
}
