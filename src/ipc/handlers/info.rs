// Author: Dustin Pilgrim
// License: MIT

use tokio::sync::{mpsc, oneshot};

use crate::core::{info::InfoSnapshot, tracker_msg::TrackerMsg};

pub async fn handle_info(as_json: bool, tx: &mpsc::Sender<TrackerMsg>) -> String {
    let (reply_tx, reply_rx) = oneshot::channel();

    let snap = if tx.send(TrackerMsg::GetInfo { reply: reply_tx }).await.is_err() {
        InfoSnapshot::not_running()
    } else {
        reply_rx.await.unwrap_or_else(|_| InfoSnapshot::not_running())
    };

    render(&snap, as_json)
}

pub fn render(snap: &InfoSnapshot, as_json: bool) -> String {
    if as_json {
        serde_json::to_string(&snap.waybar).unwrap_or_else(|_| "{}".to_string())
    } else {
        snap.pretty_text.clone()
    }
}
