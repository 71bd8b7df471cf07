// Author: Dustin Pilgrim
// License: MIT

use serde::Serialize;

/// Snapshot returned from the daemon for `foldtime info`.
///
/// - `waybar` is the stable JSON contract for status bars.
/// - `pretty_text` is CLI-facing output.
#[derive(Debug, Clone, Serialize)]
pub struct InfoSnapshot {
    pub waybar: WaybarInfo,

    #[serde(skip_serializing)]
    pub pretty_text: String,

    pub idle_paused: bool,
}

/// Waybar JSON contract. `text` is empty when nothing is being tracked,
/// which hides the module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaybarInfo {
    pub text: String,
    pub alt: String,
    pub class: String,
    pub tooltip: String,
}

impl InfoSnapshot {
    pub fn new(waybar: WaybarInfo, pretty_text: impl Into<String>, idle_paused: bool) -> Self {
        Self {
            waybar,
            pretty_text: pretty_text.into(),
            idle_paused,
        }
    }

    pub fn not_running() -> Self {
        let waybar = WaybarInfo {
            text: String::new(),
            alt: "not_running".to_string(),
            class: "not_running".to_string(),
            tooltip: "foldtime not running".to_string(),
        };
        Self::new(waybar, "foldtime not running", false)
    }
}
