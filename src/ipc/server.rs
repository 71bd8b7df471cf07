// Author: Dustin Pilgrim
// License: MIT

use std::io;

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{UnixListener, UnixStream},
    sync::mpsc,
    time::{Duration, timeout},
};

use crate::core::tracker_msg::TrackerMsg;
use crate::{sdebug, serror, sinfo};

use super::router::route_command;

// Requests are a command plus a handful of paths.
const MAX_REQUEST_BYTES: u64 = 64 * 1024;

/// Bind the control socket and serve it in the background.
pub async fn spawn_ipc_server(tx: mpsc::Sender<TrackerMsg>) -> Result<(), String> {
    let path = super::socket_path()?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create {}: {e}", parent.display()))?;
    }

    // The instance lock is already held, so anything here is a leftover.
    if path.exists() {
        let _ = std::fs::remove_file(&path);
    }

    let listener = UnixListener::bind(&path)
        .map_err(|e| format!("failed to bind {}: {e}", path.display()))?;

    sinfo!("Ipc", "listening on {}", path.display());

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut stream, _addr)) => {
                    let tx = tx.clone();

                    tokio::spawn(async move {
                        let result = timeout(Duration::from_secs(10), async {
                            if let Err(e) = handle_connection(&mut stream, &tx).await {
                                serror!("Ipc", "error handling connection: {}", e);
                            }
                        })
                        .await;

                        if result.is_err() {
                            serror!("Ipc", "connection timed out after 10 seconds");
                        }

                        let _ = stream.shutdown().await;
                    });
                }
                Err(e) => serror!("Ipc", "failed to accept connection: {}", e),
            }
        }
    });

    Ok(())
}

async fn handle_connection(
    stream: &mut UnixStream,
    tx: &mpsc::Sender<TrackerMsg>,
) -> io::Result<()> {
    let mut buf = Vec::new();
    (&mut *stream).take(MAX_REQUEST_BYTES).read_to_end(&mut buf).await?;

    if buf.is_empty() {
        return Ok(());
    }

    let request = String::from_utf8_lossy(&buf).to_string();

    if !request.starts_with("info") && !request.starts_with("activity") {
        sdebug!("Ipc", "received: {:?}", request);
    }

    let response = route_command(&request, tx).await;

    stream.write_all(response.as_bytes()).await?;
    stream.flush().await?;

    Ok(())
}
