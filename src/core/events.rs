// Author: Dustin Pilgrim
// License: MIT

use std::collections::HashSet;

use crate::core::folder::FolderId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Keystroke, focus change, document edit: anything proving the user is present.
    UserActivity {
        now_ms: u64,
    },

    /// The host's set of open workspace folders changed.
    FolderSetChanged {
        open: HashSet<FolderId>,
        now_ms: u64,
    },

    /// Periodic checkpoint.
    SaveTick {
        now_ms: u64,
    },

    /// Periodic idle-window check.
    IdleTick {
        now_ms: u64,
    },

    /// The configured tracked-folder list was replaced (config reload).
    TrackedFoldersUpdated {
        folders: Vec<FolderId>,
        now_ms: u64,
    },

    /// Process is going away; fold and persist whatever is running.
    Shutdown {
        now_ms: u64,
    },
}

impl Event {
    pub fn now_ms(&self) -> u64 {
        match self {
            Event::UserActivity { now_ms }
            | Event::FolderSetChanged { now_ms, .. }
            | Event::SaveTick { now_ms }
            | Event::IdleTick { now_ms }
            | Event::TrackedFoldersUpdated { now_ms, .. }
            | Event::Shutdown { now_ms } => *now_ms,
        }
    }
}
