// Author: Dustin Pilgrim
// License: MIT

use tokio::sync::mpsc;

use crate::core::{folder::FolderId, tracker_msg::TrackerMsg};

use super::ask;

pub async fn handle_add(folder: FolderId, tx: &mpsc::Sender<TrackerMsg>) -> String {
    ask(tx, |reply| TrackerMsg::AddFolder { folder, reply }, "add failed").await
}

pub async fn handle_remove(folder: FolderId, tx: &mpsc::Sender<TrackerMsg>) -> String {
    ask(tx, |reply| TrackerMsg::RemoveFolder { folder, reply }, "remove failed").await
}

pub async fn handle_show(tx: &mpsc::Sender<TrackerMsg>) -> String {
    ask(tx, |reply| TrackerMsg::ShowTime { reply }, "show failed").await
}

pub async fn handle_list(tx: &mpsc::Sender<TrackerMsg>) -> String {
    ask(tx, |reply| TrackerMsg::ListFolders { reply }, "list failed").await
}
