// Author: Dustin Pilgrim
// License: MIT

use chrono::{DateTime, Utc};

use crate::core::folder::{FolderId, FolderRecord};

/// In-memory accrual for one folder across any number of start/stop cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingSession {
    folder: FolderId,
    accumulated_ms: u64,
    running_since_ms: Option<u64>,
}

impl TrackingSession {
    pub fn new(folder: FolderId, accumulated_ms: u64) -> Self {
        Self {
            folder,
            accumulated_ms,
            running_since_ms: None,
        }
    }

    pub fn folder(&self) -> &FolderId {
        &self.folder
    }

    pub fn accumulated_ms(&self) -> u64 {
        self.accumulated_ms
    }

    pub fn running_since_ms(&self) -> Option<u64> {
        self.running_since_ms
    }

    pub fn is_running(&self) -> bool {
        self.running_since_ms.is_some()
    }

    /// Starting an already running session keeps the original start.
    pub fn start(&mut self, now_ms: u64) {
        if self.running_since_ms.is_none() {
            self.running_since_ms = Some(now_ms);
        }
    }

    pub fn stop(&mut self, now_ms: u64) -> u64 {
        self.fold(now_ms);
        self.running_since_ms = None;
        self.accumulated_ms
    }

    /// Fold the running span into the total and keep running from `now_ms`.
    pub fn checkpoint(&mut self, now_ms: u64) -> u64 {
        if self.is_running() {
            self.fold(now_ms);
            self.running_since_ms = Some(now_ms);
        }
        self.accumulated_ms
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        match self.running_since_ms {
            Some(since) => self.accumulated_ms + now_ms.saturating_sub(since),
            None => self.accumulated_ms,
        }
    }

    pub fn record(&self, updated_at: DateTime<Utc>) -> FolderRecord {
        FolderRecord::new(self.accumulated_ms, updated_at)
    }

    // A clock stepping backwards adds nothing rather than subtracting.
    fn fold(&mut self, now_ms: u64) {
        if let Some(since) = self.running_since_ms {
            self.accumulated_ms = self.accumulated_ms.saturating_add(now_ms.saturating_sub(since));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(acc: u64) -> TrackingSession {
        TrackingSession::new(FolderId::new("/work/alpha"), acc)
    }

    #[test]
    fn elapsed_includes_running_span() {
        let mut s = session(1000);
        assert_eq!(s.elapsed_ms(5000), 1000);

        s.start(5000);
        assert_eq!(s.elapsed_ms(7500), 3500);
        assert_eq!(s.accumulated_ms(), 1000);
    }

    #[test]
    fn stop_folds_and_clears() {
        let mut s = session(0);
        s.start(100);

        assert_eq!(s.stop(400), 300);
        assert!(!s.is_running());
        assert_eq!(s.elapsed_ms(10_000), 300);
    }

    #[test]
    fn checkpoint_keeps_running_from_now() {
        let mut s = session(5000);
        s.start(0);

        assert_eq!(s.checkpoint(2000), 7000);
        assert_eq!(s.running_since_ms(), Some(2000));
        assert_eq!(s.elapsed_ms(3000), 8000);
    }

    #[test]
    fn checkpoint_on_stopped_session_changes_nothing() {
        let mut s = session(5000);

        assert_eq!(s.checkpoint(9000), 5000);
        assert!(!s.is_running());
    }

    #[test]
    fn restart_does_not_reset_start() {
        let mut s = session(0);
        s.start(100);
        s.start(900);

        assert_eq!(s.running_since_ms(), Some(100));
    }

    #[test]
    fn clock_going_backwards_adds_nothing() {
        let mut s = session(500);
        s.start(10_000);

        assert_eq!(s.elapsed_ms(9_000), 500);
        assert_eq!(s.stop(9_000), 500);
    }
}
