// Author: Dustin Pilgrim
// License: MIT

use tokio::sync::{mpsc, watch};

use crate::core::{tracker_msg::TrackerMsg, utils::now_ms};
use crate::services::schedule::{self, ScheduleHandle};
use crate::{sinfo, swarn};

use super::{AnyError, Daemon};

impl Daemon {
    pub async fn run(
        &mut self,
        mut shutdown: watch::Receiver<bool>,
        shutdown_tx: watch::Sender<bool>,
    ) -> Result<(), AnyError> {
        sinfo!("Daemon", "daemon starting");

        let (tx, mut rx) = mpsc::channel::<TrackerMsg>(256);

        if let Err(e) = crate::ipc::server::spawn_ipc_server(tx.clone()).await {
            swarn!("Daemon", "ipc: failed to start: {}", e);
        }

        let mut schedule = schedule::spawn_schedule(tx.clone(), self.cfg.intervals());

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        sinfo!("Daemon", "daemon stopping (shutdown requested)");
                        break;
                    }
                }

                maybe = rx.recv() => {
                    let Some(msg) = maybe else {
                        sinfo!("Daemon", "daemon stopping (message channel closed)");
                        break;
                    };

                    if self.handle_msg(msg, &tx, &mut schedule, &shutdown_tx) {
                        break;
                    }
                }
            }
        }

        schedule.shutdown();
        self.shutdown();

        sinfo!("Daemon", "daemon stopped");
        Ok(())
    }

    /// Returns `true` when the loop should exit.
    fn handle_msg(
        &mut self,
        msg: TrackerMsg,
        tx: &mpsc::Sender<TrackerMsg>,
        schedule: &mut ScheduleHandle,
        shutdown_tx: &watch::Sender<bool>,
    ) -> bool {
        match msg {
            TrackerMsg::Event(event) => self.handle_event(event),

            TrackerMsg::DisplayTick { now_ms } => self.refresh_snapshot(now_ms),

            TrackerMsg::AddFolder { folder, reply } => {
                let _ = reply.send(self.add_folder(folder, now_ms()));
            }

            TrackerMsg::RemoveFolder { folder, reply } => {
                let _ = reply.send(self.remove_folder(folder, now_ms()));
            }

            TrackerMsg::ShowTime { reply } => {
                let _ = reply.send(Ok(self.show_time(now_ms())));
            }

            TrackerMsg::ListFolders { reply } => {
                let _ = reply.send(Ok(self.list_folders(now_ms())));
            }

            TrackerMsg::GetInfo { reply } => {
                let _ = reply.send(self.snapshot.clone());
            }

            TrackerMsg::ReloadConfig { reply } => {
                let out = self.reload(now_ms()).map(|(text, intervals_changed)| {
                    if intervals_changed {
                        let fresh = schedule::spawn_schedule(tx.clone(), self.cfg.intervals());
                        std::mem::replace(schedule, fresh).shutdown();
                        sinfo!("Daemon", "timer periods changed; schedule restarted");
                    }
                    text
                });
                let _ = reply.send(out);
            }

            TrackerMsg::StopDaemon { reply } => {
                sinfo!("Daemon", "daemon stopping (stop requested via IPC)");
                let _ = reply.send(Ok("Stopping foldtime daemon".to_string()));
                let _ = shutdown_tx.send(true);
                return true;
            }
        }

        false
    }
}
