// Author: Dustin Pilgrim
// License: MIT

use tokio::sync::oneshot;

use crate::core::{events::Event, folder::FolderId, info::InfoSnapshot};

pub type Reply = oneshot::Sender<Result<String, String>>;

#[derive(Debug)]
pub enum TrackerMsg {
    Event(Event),

    /// Refresh the cached status snapshot.
    DisplayTick { now_ms: u64 },

    AddFolder { folder: FolderId, reply: Reply },

    RemoveFolder { folder: FolderId, reply: Reply },

    ShowTime { reply: Reply },

    ListFolders { reply: Reply },

    GetInfo { reply: oneshot::Sender<InfoSnapshot> },

    ReloadConfig { reply: Reply },

    StopDaemon { reply: Reply },
}
