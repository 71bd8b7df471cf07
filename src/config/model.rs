// Author: Dustin Pilgrim
// License: MIT

use std::path::PathBuf;
use std::time::Duration;

use crate::core::folder::FolderId;

pub const DEFAULT_IDLE_TIMEOUT_MS: u64 = 5 * 60 * 1000;
pub const DEFAULT_SAVE_INTERVAL_MS: u64 = 30 * 1000;
pub const DEFAULT_DISPLAY_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_IDLE_CHECK_MS: u64 = 10 * 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Seed list, used until the first add/remove writes `tracked.json`.
    /// Order is the tie-break when several tracked folders are open.
    pub tracked_folders: Vec<FolderId>,

    pub idle_timeout_ms: u64,
    pub save_interval_ms: u64,
    pub display_interval_ms: u64,
    pub idle_check_ms: u64,

    /// Where per-folder time records and `tracked.json` live.
    pub data_dir: PathBuf,
}

/// Periods handed to the schedule driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intervals {
    pub save: Duration,
    pub display: Duration,
    pub idle_check: Duration,
}

impl Config {
    pub fn intervals(&self) -> Intervals {
        Intervals {
            save: Duration::from_millis(self.save_interval_ms),
            display: Duration::from_millis(self.display_interval_ms),
            // Checking less often than the window itself would miss it by a whole window.
            idle_check: Duration::from_millis(self.idle_check_ms.min(self.idle_timeout_ms)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tracked_folders: Vec::new(),
            idle_timeout_ms: DEFAULT_IDLE_TIMEOUT_MS,
            save_interval_ms: DEFAULT_SAVE_INTERVAL_MS,
            display_interval_ms: DEFAULT_DISPLAY_INTERVAL_MS,
            idle_check_ms: DEFAULT_IDLE_CHECK_MS,
            data_dir: default_data_dir(),
        }
    }
}

pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("foldtime")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_periods() {
        let cfg = Config::default();
        let iv = cfg.intervals();

        assert_eq!(iv.save, Duration::from_secs(30));
        assert_eq!(iv.display, Duration::from_secs(1));
        assert_eq!(iv.idle_check, Duration::from_secs(10));
        assert_eq!(cfg.idle_timeout_ms, 300_000);
    }

    #[test]
    fn idle_check_never_exceeds_idle_window() {
        let cfg = Config {
            idle_timeout_ms: 2_000,
            ..Config::default()
        };

        assert_eq!(cfg.intervals().idle_check, Duration::from_millis(2_000));
    }
}
