//! Default focus and block lists seeded on first run.
//!
//! Seeding only happens when the keys are absent (fresh install). A
//! store that fails to read is never re-seeded.

use crate::model::{BlockKind, BlockList, FocusList};

pub(super) fn default_block_lists() -> Vec<BlockList> {
    vec![
        BlockList {
            id: "bl-social".into(),
            name: "Social Media".into(),
            sites: vec![
                "twitter.com".into(),
                "facebook.com".into(),
                "instagram.com".into(),
                "reddit.com".into(),
            ],
            kind: BlockKind::Block,
        },
        BlockList {
            id: "bl-news".into(),
            name: "News & Entertainment".into(),
            sites: vec!["youtube.com".into(), "netflix.com".into(), "cnn.com".into()],
            kind: BlockKind::Block,
        },
        BlockList {
            id: "bl-everything".into(),
            name: "Block Everything".into(),
            sites: vec!["*".into()],
            kind: BlockKind::Block,
        },
    ]
}

pub(super) fn default_focus_lists() -> Vec<FocusList> {
    vec![
        FocusList {
            id: "fl-study".into(),
            name: "Study 45 min".into(),
            focus_minutes: 45,
            break_minutes: 10,
            block_list_id: "bl-social".into(),
        },
        FocusList {
            id: "fl-deep".into(),
            name: "Deep Focus 60 min".into(),
            focus_minutes: 60,
            break_minutes: 15,
            block_list_id: "bl-news".into(),
        },
        FocusList {
            id: "fl-reading".into(),
            name: "Quick Reading 25/5".into(),
            focus_minutes: 25,
            break_minutes: 5,
            block_list_id: "bl-social".into(),
        },
        FocusList {
            id: "fl-light".into(),
            name: "Light Work 30 min".into(),
            focus_minutes: 30,
            break_minutes: 5,
            block_list_id: "bl-social".into(),
        },
    ]
}
