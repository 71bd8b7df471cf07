// Author: Dustin Pilgrim
// License: MIT

pub mod engine;
pub mod folders;
pub mod snapshot;

use std::collections::{HashMap, HashSet};

pub use self::folders::dedupe_folders;

use crate::core::{
    error::Error,
    folder::FolderId,
    idle::IdleMonitor,
    session::TrackingSession,
    store::FolderStore,
    utils::{datetime_from_ms, format_elapsed},
};
use crate::{sdebug, sinfo, swarn};

/// Result of `add_tracked` / `remove_tracked`. Informational, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    Added,
    AlreadyTracked,
    Removed,
    NotTracked,
}

/// Result of `show_current_time`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentTime {
    NoFoldersTracked,
    NotTracking,
    Tracking { folder: FolderId, elapsed_ms: u64 },
}

/// Owns every session and the single active-folder slot.
///
/// All methods take an explicit `now_ms`; the tracker never reads a clock
/// or builds a timer itself.
///
/// Methods returning `Result<_, Error>` always apply their state change.
/// An `Err` only reports that a write to the store failed; the in-memory
/// total stays authoritative and the next checkpoint writes it again.
pub struct Tracker {
    store: Box<dyn FolderStore>,

    // Order is the tie-break for which open folder wins.
    tracked: Vec<FolderId>,
    open: HashSet<FolderId>,

    // Created on first activation, kept for the process lifetime.
    sessions: HashMap<FolderId, TrackingSession>,
    active: Option<FolderId>,

    idle: IdleMonitor,
    idle_paused: bool,
}

impl Tracker {
    pub fn new(
        store: Box<dyn FolderStore>,
        tracked: Vec<FolderId>,
        idle_timeout_ms: u64,
        now_ms: u64,
    ) -> Self {
        let mut idle = IdleMonitor::new(idle_timeout_ms);
        idle.reset(now_ms);

        Self {
            store,
            tracked: dedupe_folders(tracked),
            open: HashSet::new(),
            sessions: HashMap::new(),
            active: None,
            idle,
            idle_paused: false,
        }
    }

    pub fn active(&self) -> Option<&FolderId> {
        self.active.as_ref()
    }

    pub fn tracked(&self) -> &[FolderId] {
        &self.tracked
    }

    pub fn open_folders(&self) -> &HashSet<FolderId> {
        &self.open
    }

    pub fn session(&self, folder: &FolderId) -> Option<&TrackingSession> {
        self.sessions.get(folder)
    }

    pub fn idle(&self) -> &IdleMonitor {
        &self.idle
    }

    #[cfg(test)]
    pub fn is_idle_paused(&self) -> bool {
        self.idle_paused
    }

    pub fn set_idle_timeout_ms(&mut self, timeout_ms: u64) {
        self.idle.set_timeout_ms(timeout_ms);
    }

    pub fn is_tracked(&self, folder: &FolderId) -> bool {
        self.tracked.contains(folder)
    }

    /// Pick the folder that should be accruing given what is open.
    ///
    /// A still-valid active folder is kept even if a higher-priority tracked
    /// folder is also open; only when it stops being a candidate does the
    /// first open tracked folder (in configuration order) take over.
    pub fn reconcile(&mut self, open: HashSet<FolderId>, now_ms: u64) -> Result<(), Error> {
        self.open = open;

        if let Some(active) = &self.active {
            if self.is_candidate(active) {
                return Ok(());
            }
        }

        // Nothing runs while idle; the next activity re-runs reconcile.
        if self.idle_paused {
            return self.stop_tracking(now_ms);
        }

        match self.first_candidate() {
            Some(next) => self.start_tracking(&next, now_ms),
            None => self.stop_tracking(now_ms),
        }
    }

    pub fn start_tracking(&mut self, folder: &FolderId, now_ms: u64) -> Result<(), Error> {
        if !self.is_tracked(folder) {
            sdebug!("Tracker", "ignoring start for untracked folder {}", folder);
            return Ok(());
        }

        if self.active.as_ref() == Some(folder) {
            return Ok(());
        }

        // The previous folder is always stopped before the next one starts.
        let stopped = self.stop_tracking(now_ms);

        let session = self.session_entry(folder);
        session.start(now_ms);
        let total = session.accumulated_ms();

        self.active = Some(folder.clone());
        self.idle_paused = false;

        // A running session always has a deadline ahead of it.
        if !self.idle.is_armed() {
            self.idle.reset(now_ms);
        }

        sinfo!("Tracker", "tracking {} (total so far {})", folder, format_elapsed(total));

        stopped
    }

    pub fn stop_tracking(&mut self, now_ms: u64) -> Result<(), Error> {
        let Some(folder) = self.active.take() else {
            return Ok(());
        };

        let total = self
            .sessions
            .get_mut(&folder)
            .map(|s| s.stop(now_ms))
            .unwrap_or_default();

        sinfo!("Tracker", "stopped {} (total {})", folder, format_elapsed(total));

        self.persist(&folder, now_ms)
    }

    /// Checkpoint the running session without stopping it.
    pub fn flush(&mut self, now_ms: u64) -> Result<(), Error> {
        let Some(folder) = self.active.clone() else {
            return Ok(());
        };

        if let Some(session) = self.sessions.get_mut(&folder) {
            session.checkpoint(now_ms);
        }

        self.persist(&folder, now_ms)
    }

    pub fn current_elapsed(&self, now_ms: u64) -> Option<u64> {
        self.active
            .as_ref()
            .and_then(|f| self.sessions.get(f))
            .map(|s| s.elapsed_ms(now_ms))
    }

    fn is_candidate(&self, folder: &FolderId) -> bool {
        self.is_tracked(folder) && self.open.contains(folder)
    }

    fn first_candidate(&self) -> Option<FolderId> {
        self.tracked.iter().find(|f| self.open.contains(*f)).cloned()
    }

    fn session_entry(&mut self, folder: &FolderId) -> &mut TrackingSession {
        let store = &self.store;

        self.sessions.entry(folder.clone()).or_insert_with(|| {
            let initial = match store.load(folder) {
                Ok(Some(record)) => record.total_time_ms,
                Ok(None) => 0,
                Err(e) => {
                    swarn!("Tracker", "{e}; starting from zero");
                    0
                }
            };
            TrackingSession::new(folder.clone(), initial)
        })
    }

    fn persist(&mut self, folder: &FolderId, now_ms: u64) -> Result<(), Error> {
        let Some(session) = self.sessions.get(folder) else {
            return Ok(());
        };

        let record = session.record(datetime_from_ms(now_ms));
        sdebug!("Tracker", "saving {} ({} ms)", session.folder(), record.total_time_ms);

        self.store.save(folder, &record).inspect_err(|e| {
            swarn!("Tracker", "{e}; keeping {} ms in memory", record.total_time_ms);
        })
    }
}
