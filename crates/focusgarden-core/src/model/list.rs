use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A named cycle template: focus duration, break duration, and the
/// block list applied while focusing.
///
/// A running session embeds a full copy of its list, so editing or
/// deleting the definition mid-session cannot corrupt the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusList {
    pub id: String,
    pub name: String,
    /// Focus duration in minutes.
    pub focus_minutes: u64,
    /// Break duration in minutes.
    pub break_minutes: u64,
    /// Id of the [`BlockList`] applied during focus.
    pub block_list_id: String,
}

impl FocusList {
    /// Check that the list can back a session.
    ///
    /// # Errors
    /// Returns an error if either duration is zero or the name is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "name".into(),
                message: "must not be empty".into(),
            });
        }
        if self.focus_minutes == 0 {
            return Err(ValidationError::InvalidValue {
                field: "focus_minutes".into(),
                message: "must be greater than zero".into(),
            });
        }
        if self.break_minutes == 0 {
            return Err(ValidationError::InvalidValue {
                field: "break_minutes".into(),
                message: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

/// Polarity of a block list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Sites on the list are blocked; everything else passes.
    Block,
    /// Sites on the list pass; everything else is blocked.
    Allow,
}

/// A named set of site patterns with a block or allow polarity.
///
/// Lives independently of sessions; referenced by id from
/// [`FocusList`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockList {
    pub id: String,
    pub name: String,
    /// Ordered domain patterns. `"*"` matches every domain.
    pub sites: Vec<String>,
    pub kind: BlockKind,
}

impl BlockList {
    /// Whether `domain` matches any pattern on the list.
    ///
    /// Matching is suffix-based on domain labels, so the pattern
    /// `example.com` matches `example.com` and `news.example.com`
    /// but not `badexample.com`.
    pub fn matches(&self, domain: &str) -> bool {
        self.sites.iter().any(|p| site_matches(p, domain))
    }

    /// Whether `domain` should be blocked under this list's polarity.
    pub fn blocks(&self, domain: &str) -> bool {
        match self.kind {
            BlockKind::Block => self.matches(domain),
            BlockKind::Allow => !self.matches(domain),
        }
    }
}

fn site_matches(pattern: &str, domain: &str) -> bool {
    if pattern == "*" {
        return true;
    }
    match domain.strip_suffix(pattern) {
        Some("") => true,
        Some(rest) => rest.ends_with('.'),
        None => false,
    }
}
