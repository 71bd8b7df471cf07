// Author: Dustin Pilgrim
// License: MIT

use std::collections::HashSet;

use crate::core::{
    error::Error,
    events::Event,
    folder::FolderId,
    utils::format_elapsed,
};
use crate::{sdebug, sinfo};

use super::Tracker;

impl Tracker {
    pub fn handle_event(&mut self, event: Event) -> Result<(), Error> {
        match event {
            Event::UserActivity { now_ms } => self.on_activity(now_ms),

            Event::FolderSetChanged { open, now_ms } => self.on_folder_set_changed(open, now_ms),

            Event::SaveTick { now_ms } => self.on_save_tick(now_ms),

            Event::IdleTick { now_ms } => self.on_idle_tick(now_ms),

            Event::TrackedFoldersUpdated { folders, now_ms } => {
                self.update_tracked_folders(folders, now_ms)
            }

            Event::Shutdown { now_ms } => self.dispose(now_ms),
        }
    }

    /// Any sign of the user. Re-arms the idle window and, if an idle expiry
    /// paused tracking, picks it back up.
    pub fn on_activity(&mut self, now_ms: u64) -> Result<(), Error> {
        self.idle.reset(now_ms);

        if !self.idle_paused {
            return Ok(());
        }

        self.idle_paused = false;
        sinfo!("Tracker", "activity after idle, resuming");

        let open = self.open.clone();
        self.reconcile(open, now_ms)
    }

    /// Opening or closing folders is user activity too.
    pub fn on_folder_set_changed(
        &mut self,
        open: HashSet<FolderId>,
        now_ms: u64,
    ) -> Result<(), Error> {
        self.idle.reset(now_ms);
        self.idle_paused = false;
        self.reconcile(open, now_ms)
    }

    pub fn on_save_tick(&mut self, now_ms: u64) -> Result<(), Error> {
        self.flush(now_ms)
    }

    pub fn on_idle_tick(&mut self, now_ms: u64) -> Result<(), Error> {
        if !self.idle.check_expiry(now_ms) {
            return Ok(());
        }

        // Latched even with nothing running, so no later reconcile starts a
        // session before the user is seen again.
        self.idle_paused = true;

        let Some(folder) = self.active.clone() else {
            sdebug!("Tracker", "idle window expired with nothing tracked");
            return Ok(());
        };

        sinfo!(
            "Tracker",
            "no activity for {}, pausing {}",
            format_elapsed(self.idle.timeout_ms()),
            folder
        );

        self.stop_tracking(now_ms)
    }

    /// Final stop before the process exits. Safe to call more than once.
    pub fn dispose(&mut self, now_ms: u64) -> Result<(), Error> {
        self.idle.dispose();
        self.stop_tracking(now_ms)
    }
}
