//! Resolution of the currently active block list.
//!
//! The core does not enforce blocking; it hands the resolved list to a
//! platform content-blocking capability. Blocking is in force only
//! while a session is in focus. A list definition that points at a
//! deleted block list resolves to no blocking, not an error.

use crate::model::{BlockList, Session, SessionState};

/// The block list in force for `session` right now, if any.
pub fn active_block_list<'a>(
    session: Option<&Session>,
    block_lists: &'a [BlockList],
) -> Option<&'a BlockList> {
    let session = session?;
    if session.state != SessionState::Focus {
        return None;
    }
    block_lists
        .iter()
        .find(|bl| bl.id == session.list.block_list_id)
}
