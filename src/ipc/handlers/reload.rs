// Author: Dustin Pilgrim
// License: MIT

use tokio::sync::mpsc;

use crate::core::tracker_msg::TrackerMsg;

use super::ask;

/// Handle `foldtime reload` (no args).
///
/// Semantics:
/// - Re-read the config file and `tracked.json`.
/// - Apply the new tracked list, idle timeout and timer periods.
pub async fn handle_reload(tx: &mpsc::Sender<TrackerMsg>) -> String {
    ask(tx, |reply| TrackerMsg::ReloadConfig { reply }, "Configuration reloaded").await
}
