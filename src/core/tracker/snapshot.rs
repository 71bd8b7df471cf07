// Author: Dustin Pilgrim
// License: MIT

use std::fmt::Write;

use crate::core::{
    info::{InfoSnapshot, WaybarInfo},
    utils::format_elapsed,
};

use super::Tracker;

impl Tracker {
    /// Live status-bar text, or `None` when the widget should be hidden.
    pub fn display_text(&self, now_ms: u64) -> Option<String> {
        self.current_elapsed(now_ms).map(format_elapsed)
    }

    pub fn snapshot(&self, now_ms: u64) -> InfoSnapshot {
        let alt = if self.active.is_some() {
            "tracking"
        } else if self.idle_paused {
            "idle"
        } else {
            "not_tracking"
        };

        let text = self.display_text(now_ms).unwrap_or_default();

        let tooltip = match &self.active {
            Some(folder) => format!("{folder}\n{text}"),
            None if self.idle_paused => "Paused after inactivity".to_string(),
            None => "No tracked folder open".to_string(),
        };

        let waybar = WaybarInfo {
            text,
            alt: alt.to_string(),
            class: alt.to_string(),
            tooltip,
        };

        InfoSnapshot::new(waybar, self.render_pretty(now_ms), self.idle_paused)
    }

    fn render_pretty(&self, now_ms: u64) -> String {
        let mut out = String::new();

        match (&self.active, self.current_elapsed(now_ms)) {
            (Some(folder), Some(elapsed)) => {
                let _ = writeln!(out, "Tracking:     {folder}");
                let _ = writeln!(out, "Elapsed:      {}", format_elapsed(elapsed));
            }
            _ if self.idle_paused => {
                let _ = writeln!(out, "Tracking:     paused (idle)");
            }
            _ => {
                let _ = writeln!(out, "Tracking:     none");
            }
        }

        let _ = writeln!(out, "Idle timeout: {}", format_elapsed(self.idle.timeout_ms()));

        if let Some(deadline) = self.idle.deadline_ms() {
            let left = deadline.saturating_sub(now_ms);
            let _ = writeln!(out, "Idle in:      {}", format_elapsed(left));
        }

        let _ = writeln!(out, "Tracked folders:");
        if self.tracked.is_empty() {
            let _ = writeln!(out, "  (none)");
        }
        for folder in &self.tracked {
            let marker = if self.open.contains(folder) { "open" } else { "closed" };
            let _ = writeln!(out, "  {folder} [{marker}]");
        }

        out.trim_end().to_string()
    }
}
