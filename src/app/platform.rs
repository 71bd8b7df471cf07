// Author: Dustin Pilgrim
// License: MIT

use std::io;
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::PathBuf;

// ---------------- single-instance lock ----------------

fn lock_path() -> Result<PathBuf, String> {
    crate::ipc::runtime_dir()
        .map(|dir| dir.join("foldtime").join("foldtime.lock"))
        .map_err(|e| format!("{e} (cannot create instance lock)"))
}

/// Held for the daemon's lifetime; a second daemon fails to bind it.
pub fn acquire_single_instance_lock() -> Result<UnixListener, String> {
    let path = lock_path()?;
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    match UnixListener::bind(&path) {
        Ok(l) => Ok(l),
        Err(e) if e.kind() == io::ErrorKind::AddrInUse => match UnixStream::connect(&path) {
            Ok(_) => Err(format!(
                "foldtime is already running (another instance holds {})",
                path.display()
            )),
            Err(_) => {
                // Stale socket from a crashed run.
                let _ = std::fs::remove_file(&path);
                UnixListener::bind(&path)
                    .map_err(|e| format!("failed to bind instance lock {}: {e}", path.display()))
            }
        },
        Err(e) => Err(format!("failed to bind instance lock {}: {e}", path.display())),
    }
}

// ---------------- signals ----------------

/// Resolves on Ctrl+C or SIGTERM.
pub async fn wait_for_termination() -> &'static str {
    use tokio::signal::unix::{SignalKind, signal};

    let mut term = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            crate::swarn!("Platform", "SIGTERM handler unavailable: {}", e);
            let _ = tokio::signal::ctrl_c().await;
            return "Ctrl+C";
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => "Ctrl+C",
        _ = term.recv() => "SIGTERM",
    }
}
