// Author: Dustin Pilgrim
// License: MIT

/// Single-deadline inactivity watchdog.
///
/// There is never more than one pending deadline: `reset` replaces it,
/// expiry consumes it, and the monitor stays dormant until the next `reset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdleMonitor {
    timeout_ms: u64,
    last_activity_ms: u64,
    armed: bool,
}

impl IdleMonitor {
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            timeout_ms,
            last_activity_ms: 0,
            armed: false,
        }
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Applies to the pending deadline as well, since it is derived from the
    /// last activity.
    pub fn set_timeout_ms(&mut self, timeout_ms: u64) {
        self.timeout_ms = timeout_ms;
    }

    pub fn reset(&mut self, now_ms: u64) {
        self.last_activity_ms = now_ms;
        self.armed = true;
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.armed
            .then(|| self.last_activity_ms.saturating_add(self.timeout_ms))
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Returns true exactly once per armed window, when `now_ms` reaches the deadline.
    pub fn check_expiry(&mut self, now_ms: u64) -> bool {
        match self.deadline_ms() {
            Some(deadline) if now_ms >= deadline => {
                self.armed = false;
                true
            }
            _ => false,
        }
    }

    pub fn dispose(&mut self) {
        self.armed = false;
    }
}
