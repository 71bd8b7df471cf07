// Author: Dustin Pilgrim
// License: MIT

use std::time::Duration;

use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::config::Intervals;
use crate::core::{events::Event, tracker_msg::TrackerMsg, utils::now_ms};
use crate::{sdebug, swarn};

/// The three periodic drivers: checkpoint, status refresh, idle check.
///
/// Dropping the handle does not stop the tasks; call `shutdown`.
pub struct ScheduleHandle {
    tasks: Vec<JoinHandle<()>>,
}

impl ScheduleHandle {
    pub fn shutdown(self) {
        for task in self.tasks {
            task.abort();
        }
    }
}

pub fn spawn_schedule(tx: Sender<TrackerMsg>, intervals: Intervals) -> ScheduleHandle {
    sdebug!(
        "Schedule",
        "save every {:?}, display every {:?}, idle check every {:?}",
        intervals.save,
        intervals.display,
        intervals.idle_check
    );

    let tasks = vec![
        spawn_ticker("save", tx.clone(), intervals.save, |now_ms| {
            TrackerMsg::Event(Event::SaveTick { now_ms })
        }),
        spawn_ticker("display", tx.clone(), intervals.display, |now_ms| {
            TrackerMsg::DisplayTick { now_ms }
        }),
        spawn_ticker("idle", tx, intervals.idle_check, |now_ms| {
            TrackerMsg::Event(Event::IdleTick { now_ms })
        }),
    ];

    ScheduleHandle { tasks }
}

fn spawn_ticker<F>(name: &'static str, tx: Sender<TrackerMsg>, period: Duration, make: F) -> JoinHandle<()>
where
    F: Fn(u64) -> TrackerMsg + Send + 'static,
{
    tokio::spawn(async move {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // First tick completes immediately.
        interval.tick().await;

        loop {
            interval.tick().await;

            // If the daemon is gone, stop.
            if tx.send(make(now_ms())).await.is_err() {
                swarn!("Schedule", "{name} ticker stopping (receiver dropped)");
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn intervals(ms: u64) -> Intervals {
        Intervals {
            save: Duration::from_millis(ms),
            display: Duration::from_millis(ms),
            idle_check: Duration::from_millis(ms),
        }
    }

    #[tokio::test]
    async fn every_driver_fires() {
        let (tx, mut rx) = mpsc::channel(16);
        let handle = spawn_schedule(tx, intervals(10));

        let mut saw_save = false;
        let mut saw_display = false;
        let mut saw_idle = false;

        while !(saw_save && saw_display && saw_idle) {
            match rx.recv().await {
                Some(TrackerMsg::Event(Event::SaveTick { .. })) => saw_save = true,
                Some(TrackerMsg::Event(Event::IdleTick { .. })) => saw_idle = true,
                Some(TrackerMsg::DisplayTick { .. }) => saw_display = true,
                other => panic!("unexpected message: {other:?}"),
            }
        }

        handle.shutdown();
    }

    #[tokio::test]
    async fn shutdown_stops_all_drivers() {
        let (tx, mut rx) = mpsc::channel(16);
        let handle = spawn_schedule(tx, intervals(60_000));

        handle.shutdown();

        // Aborted tasks drop their senders, closing the channel.
        assert!(rx.recv().await.is_none());
    }
}
