// Author: Dustin Pilgrim
// License: MIT

use tokio::sync::mpsc;

use crate::core::tracker_msg::TrackerMsg;

use super::ask;

/// Handle `foldtime stop` (no args).
///
/// The daemon saves the running session before it exits.
pub async fn handle_stop(tx: &mpsc::Sender<TrackerMsg>) -> String {
    ask(tx, |reply| TrackerMsg::StopDaemon { reply }, "Stopping foldtime daemon").await
}
