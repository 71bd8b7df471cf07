// Author: Dustin Pilgrim
// License: MIT

use std::collections::HashSet;

use crate::core::{error::Error, folder::FolderId};
use crate::sinfo;

use super::{CurrentTime, Membership, Tracker};

/// Drop empty ids and repeats, keeping the first occurrence's position.
pub fn dedupe_folders(folders: Vec<FolderId>) -> Vec<FolderId> {
    let mut seen = HashSet::new();
    folders
        .into_iter()
        .filter(|f| !f.is_empty())
        .filter(|f| seen.insert(f.clone()))
        .collect()
}

impl Tracker {
    pub fn add_tracked(&mut self, folder: FolderId, now_ms: u64) -> Result<Membership, Error> {
        if self.is_tracked(&folder) {
            return Ok(Membership::AlreadyTracked);
        }

        sinfo!("Tracker", "now tracking folder {}", folder);
        self.tracked.push(folder);

        let open = self.open.clone();
        self.reconcile(open, now_ms).map(|()| Membership::Added)
    }

    /// Removing the active folder stops (and persists) it, then lets another
    /// open tracked folder take over.
    pub fn remove_tracked(&mut self, folder: &FolderId, now_ms: u64) -> Result<Membership, Error> {
        let Some(pos) = self.tracked.iter().position(|f| f == folder) else {
            return Ok(Membership::NotTracked);
        };

        self.tracked.remove(pos);
        sinfo!("Tracker", "no longer tracking folder {}", folder);

        if self.active.as_ref() != Some(folder) {
            return Ok(Membership::Removed);
        }

        let stopped = self.stop_tracking(now_ms);

        let open = self.open.clone();
        let next = self.reconcile(open, now_ms);

        stopped.and(next).map(|()| Membership::Removed)
    }

    /// Replace the whole list (config reload) and reconcile against it.
    pub fn update_tracked_folders(
        &mut self,
        folders: Vec<FolderId>,
        now_ms: u64,
    ) -> Result<(), Error> {
        self.tracked = dedupe_folders(folders);

        let open = self.open.clone();
        self.reconcile(open, now_ms)
    }

    pub fn show_current_time(&self, now_ms: u64) -> CurrentTime {
        if self.tracked.is_empty() {
            return CurrentTime::NoFoldersTracked;
        }

        match (&self.active, self.current_elapsed(now_ms)) {
            (Some(folder), Some(elapsed_ms)) => CurrentTime::Tracking {
                folder: folder.clone(),
                elapsed_ms,
            },
            _ => CurrentTime::NotTracking,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedupe_keeps_first_position() {
        let list = vec![
            FolderId::new("/b"),
            FolderId::new("/a"),
            FolderId::new("/b/"),
            FolderId::new(""),
            FolderId::new("/c"),
        ];

        assert_eq!(
            dedupe_folders(list),
            vec![FolderId::new("/b"), FolderId::new("/a"), FolderId::new("/c")]
        );
    }
}
