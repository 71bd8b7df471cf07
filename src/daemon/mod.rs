// Author: Dustin Pilgrim
// License: MIT

mod run;

use std::fmt::Write;
use std::path::PathBuf;

use crate::config::{self, Config, tracked::TrackedList};
use crate::core::{
    error::Error,
    events::Event,
    folder::FolderId,
    info::InfoSnapshot,
    store::JsonFileStore,
    tracker::{CurrentTime, Membership, Tracker},
    utils::{format_elapsed, now_ms},
};
use crate::{sdebug, serror, sinfo, swarn};

type AnyError = Box<dyn std::error::Error + Send + Sync>;

pub struct Daemon {
    tracker: Tracker,
    cfg: Config,
    config_path: PathBuf,
    tracked_list: TrackedList,

    // What `info` returns; rebuilt on every display tick and after each event.
    snapshot: InfoSnapshot,
}

impl Daemon {
    pub fn new(cfg: Config, config_path: PathBuf) -> Self {
        let now_ms = now_ms();

        let tracked = config::resolve_tracked(&cfg);
        let store = JsonFileStore::new(&cfg.data_dir);

        sdebug!(
            "Daemon",
            "data_dir={}, tracked={}, idle_timeout_ms={}, config_path={}",
            cfg.data_dir.display(),
            tracked.len(),
            cfg.idle_timeout_ms,
            config_path.display()
        );

        let tracker = Tracker::new(Box::new(store), tracked, cfg.idle_timeout_ms, now_ms);
        let snapshot = tracker.snapshot(now_ms);

        Self {
            tracker,
            tracked_list: TrackedList::in_dir(&cfg.data_dir),
            cfg,
            config_path,
            snapshot,
        }
    }

    fn handle_event(&mut self, event: Event) {
        let now_ms = event.now_ms();

        if !matches!(event, Event::SaveTick { .. } | Event::IdleTick { .. }) {
            sdebug!("Daemon", "incoming: {:?}", event);
        }

        if let Err(e) = self.tracker.handle_event(event) {
            serror!("Daemon", "handle_event failed: {}", e);
        }

        self.refresh_snapshot(now_ms);
    }

    fn refresh_snapshot(&mut self, now_ms: u64) {
        self.snapshot = self.tracker.snapshot(now_ms);
    }

    fn add_folder(&mut self, folder: FolderId, now_ms: u64) -> Result<String, String> {
        let shown = folder.to_string();
        let out = self.tracker.add_tracked(folder, now_ms);
        Ok(self.after_membership_change(out, Membership::Added, now_ms, |m| match m {
            Membership::AlreadyTracked => format!("Already tracking {shown}"),
            _ => format!("Now tracking {shown}"),
        }))
    }

    fn remove_folder(&mut self, folder: FolderId, now_ms: u64) -> Result<String, String> {
        let out = self.tracker.remove_tracked(&folder, now_ms);
        Ok(self.after_membership_change(out, Membership::Removed, now_ms, |m| match m {
            Membership::NotTracked => format!("{folder} is not being tracked"),
            _ => format!("Stopped tracking {folder}"),
        }))
    }

    /// The tracker applies a membership change even when a record write
    /// fails, so `Err` still means `changed` happened. The list on disk is
    /// rewritten either way; write failures ride along as warnings.
    fn after_membership_change(
        &mut self,
        out: Result<Membership, Error>,
        changed: Membership,
        now_ms: u64,
        confirm: impl FnOnce(Membership) -> String,
    ) -> String {
        self.refresh_snapshot(now_ms);

        let mut warnings = Vec::new();
        let membership = out.unwrap_or_else(|e| {
            warnings.push(e);
            changed
        });

        if matches!(membership, Membership::Added | Membership::Removed) {
            if let Err(e) = self.tracked_list.save(self.tracker.tracked()) {
                swarn!("Daemon", "{e}");
                warnings.push(e);
            }
        }

        let mut reply = confirm(membership);
        for w in warnings {
            let _ = write!(reply, "\nwarning: {w}");
        }
        reply
    }

    fn show_time(&self, now_ms: u64) -> String {
        match self.tracker.show_current_time(now_ms) {
            CurrentTime::NoFoldersTracked => {
                "No folders are being tracked. Add one with `foldtime add`".to_string()
            }
            CurrentTime::NotTracking => "Not tracking any folder right now".to_string(),
            CurrentTime::Tracking { folder, elapsed_ms } => {
                format!("Time spent on {folder}: {}", format_elapsed(elapsed_ms))
            }
        }
    }

    fn list_folders(&self, now_ms: u64) -> String {
        if self.tracker.tracked().is_empty() {
            return "No folders are being tracked".to_string();
        }

        let mut out = String::new();
        for folder in self.tracker.tracked() {
            let active = self.tracker.active() == Some(folder);
            let marker = if active {
                "tracking"
            } else if self.tracker.open_folders().contains(folder) {
                "open"
            } else {
                "closed"
            };

            let total = match self.tracker.session(folder) {
                Some(s) => format_elapsed(s.elapsed_ms(now_ms)),
                None => "-".to_string(),
            };

            let _ = writeln!(out, "{folder}  [{marker}]  {total}");
        }

        out.trim_end().to_string()
    }

    /// Re-read the config file and `tracked.json`. Returns whether the
    /// timer periods changed, so the caller can restart the schedule.
    fn reload(&mut self, now_ms: u64) -> Result<(String, bool), String> {
        let new_cfg = config::load_or_default(&self.config_path);

        if new_cfg.data_dir != self.cfg.data_dir {
            swarn!(
                "Daemon",
                "data_dir changed to {}; takes effect on restart",
                new_cfg.data_dir.display()
            );
        }

        let intervals_changed = new_cfg.intervals() != self.cfg.intervals();
        let folders = config::resolve_tracked(&Config {
            data_dir: self.cfg.data_dir.clone(),
            ..new_cfg.clone()
        });

        self.tracker.set_idle_timeout_ms(new_cfg.idle_timeout_ms);
        let applied = self.tracker.update_tracked_folders(folders, now_ms);

        self.cfg = Config {
            data_dir: self.cfg.data_dir.clone(),
            ..new_cfg
        };
        self.refresh_snapshot(now_ms);

        applied.map_err(|e| e.to_string())?;

        sinfo!("Daemon", "configuration reloaded from {}", self.config_path.display());
        Ok((
            format!("Reloaded ({} tracked folders)", self.tracker.tracked().len()),
            intervals_changed,
        ))
    }

    fn shutdown(&mut self) {
        let now_ms = now_ms();
        if let Err(e) = self.tracker.dispose(now_ms) {
            serror!("Daemon", "final save failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{TempDir, tempdir};

    fn daemon(seed: &[&str]) -> (Daemon, TempDir) {
        let dir = tempdir().unwrap();
        let cfg = Config {
            tracked_folders: seed.iter().map(|s| FolderId::new(*s)).collect(),
            data_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        let d = Daemon::new(cfg, dir.path().join("absent.rune"));
        (d, dir)
    }

    #[test]
    fn add_and_remove_persist_the_list() {
        let (mut d, dir) = daemon(&[]);

        assert_eq!(d.add_folder(FolderId::new("/a"), 0), Ok("Now tracking /a".to_string()));
        assert_eq!(d.add_folder(FolderId::new("/a"), 0), Ok("Already tracking /a".to_string()));

        let saved = TrackedList::in_dir(dir.path()).load().unwrap();
        assert_eq!(saved, Some(vec![FolderId::new("/a")]));

        assert_eq!(d.remove_folder(FolderId::new("/a"), 0), Ok("Stopped tracking /a".to_string()));
        assert_eq!(
            d.remove_folder(FolderId::new("/a"), 0),
            Ok("/a is not being tracked".to_string())
        );
        assert_eq!(TrackedList::in_dir(dir.path()).load().unwrap(), Some(Vec::new()));
    }

    #[test]
    fn failed_record_write_still_saves_the_removal() {
        let (mut d, dir) = daemon(&["/a", "/b"]);
        d.handle_event(Event::FolderSetChanged {
            open: [FolderId::new("/a")].into_iter().collect(),
            now_ms: 0,
        });

        let record = JsonFileStore::new(dir.path()).record_path(&FolderId::new("/a"));
        std::fs::create_dir_all(&record).unwrap();

        let reply = d.remove_folder(FolderId::new("/a"), 1_000).unwrap();

        assert!(reply.starts_with("Stopped tracking /a"));
        assert!(reply.contains("warning: failed to save time for /a"));
        assert_eq!(d.tracker.tracked(), &[FolderId::new("/b")]);
        assert_eq!(
            TrackedList::in_dir(dir.path()).load().unwrap(),
            Some(vec![FolderId::new("/b")])
        );
    }

    #[test]
    fn show_time_distinguishes_each_case() {
        let (mut d, _dir) = daemon(&[]);
        assert!(d.show_time(0).starts_with("No folders are being tracked"));

        d.add_folder(FolderId::new("/a"), 0).unwrap();
        assert_eq!(d.show_time(0), "Not tracking any folder right now");

        d.handle_event(Event::FolderSetChanged {
            open: [FolderId::new("/a")].into_iter().collect(),
            now_ms: 1_000,
        });
        assert_eq!(d.show_time(62_000), "Time spent on /a: 0h 1m 1s");
    }

    #[test]
    fn snapshot_follows_events() {
        let (mut d, _dir) = daemon(&["/a"]);
        assert_eq!(d.snapshot.waybar.alt, "not_tracking");

        d.handle_event(Event::FolderSetChanged {
            open: [FolderId::new("/a")].into_iter().collect(),
            now_ms: 0,
        });
        assert_eq!(d.snapshot.waybar.alt, "tracking");

        d.shutdown();
        assert!(d.tracker.active().is_none());
    }

    #[test]
    fn list_marks_state_of_each_folder() {
        let (mut d, _dir) = daemon(&["/a", "/b"]);
        d.handle_event(Event::FolderSetChanged {
            open: [FolderId::new("/b")].into_iter().collect(),
            now_ms: 0,
        });

        let out = d.list_folders(3_000);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines, vec!["/a  [closed]  -", "/b  [tracking]  0h 0m 3s"]);
    }

    #[test]
    fn reload_with_missing_file_keeps_saved_list() {
        let (mut d, _dir) = daemon(&["/a"]);
        d.add_folder(FolderId::new("/b"), 0).unwrap();

        let (msg, intervals_changed) = d.reload(0).unwrap();

        assert_eq!(msg, "Reloaded (2 tracked folders)");
        assert!(!intervals_changed);
        assert_eq!(d.tracker.tracked(), &[FolderId::new("/a"), FolderId::new("/b")]);
    }
}
