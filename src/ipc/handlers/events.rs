// Author: Dustin Pilgrim
// License: MIT

use std::collections::HashSet;

use tokio::sync::mpsc;

use crate::core::{events::Event, folder::FolderId, tracker_msg::TrackerMsg, utils::now_ms};

use super::NOT_RUNNING;

/// Fire-and-forget: activity pings arrive often and nobody reads a reply.
pub async fn handle_activity(tx: &mpsc::Sender<TrackerMsg>) -> String {
    forward(tx, Event::UserActivity { now_ms: now_ms() }).await
}

/// Replaces the whole open-folder set; an empty list means nothing is open.
pub async fn handle_open(open: Vec<FolderId>, tx: &mpsc::Sender<TrackerMsg>) -> String {
    let open: HashSet<FolderId> = open.into_iter().filter(|f| !f.is_empty()).collect();
    forward(
        tx,
        Event::FolderSetChanged {
            open,
            now_ms: now_ms(),
        },
    )
    .await
}

async fn forward(tx: &mpsc::Sender<TrackerMsg>, event: Event) -> String {
    match tx.send(TrackerMsg::Event(event)).await {
        Ok(()) => String::new(),
        Err(_) => NOT_RUNNING.to_string(),
    }
}
