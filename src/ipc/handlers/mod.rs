// Author: Dustin Pilgrim
// License: MIT

pub mod events;
pub mod folders;
pub mod info;
pub mod reload;
pub mod stop;

use tokio::sync::{mpsc, oneshot};

use crate::core::tracker_msg::{Reply, TrackerMsg};

pub const NOT_RUNNING: &str = "foldtime daemon not running";

/// Send a request that carries a reply slot and wait for the answer.
async fn ask(
    tx: &mpsc::Sender<TrackerMsg>,
    make: impl FnOnce(Reply) -> TrackerMsg,
    fallback: &str,
) -> String {
    let (reply_tx, reply_rx) = oneshot::channel();

    if tx.send(make(reply_tx)).await.is_err() {
        return NOT_RUNNING.to_string();
    }

    match reply_rx.await {
        Ok(Ok(msg)) => {
            let out = msg.trim_end();
            if out.is_empty() {
                fallback.to_string()
            } else {
                out.to_string()
            }
        }
        Ok(Err(e)) => {
            let out = e.trim_end();
            if out.is_empty() {
                format!("ERROR: {fallback}")
            } else {
                format!("ERROR: {out}")
            }
        }
        Err(_) => "ERROR: No response from daemon".to_string(),
    }
}
