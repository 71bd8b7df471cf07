// Author: Dustin Pilgrim
// License: MIT

pub mod bootstrap;
pub mod model;
pub mod parser;
pub mod tracked;

use std::path::{Path, PathBuf};

pub use model::{Config, Intervals};

use crate::core::folder::FolderId;
use crate::{sdebug, sinfo, swarn};

use self::tracked::TrackedList;

pub fn resolve_default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("foldtime")
        .join("foldtime.rune")
}

/// Load the config, falling back to built-in defaults on any problem.
/// Configuration errors are logged, never fatal.
pub fn load_or_default(path: &Path) -> Config {
    if !path.exists() {
        sinfo!("Config", "{} not found, using defaults", path.display());
        return Config::default();
    }

    match parser::load_file(path) {
        Ok((cfg, warnings)) => {
            for w in warnings {
                swarn!("Config", "{w}");
            }
            sdebug!("Config", "loaded {}", path.display());
            cfg
        }
        Err(e) => {
            swarn!("Config", "{e:#}; using defaults");
            Config::default()
        }
    }
}

/// `tracked.json` wins once it exists; otherwise the config's seed list.
pub fn resolve_tracked(cfg: &Config) -> Vec<FolderId> {
    match TrackedList::in_dir(&cfg.data_dir).load() {
        Ok(Some(list)) => list,
        Ok(None) => cfg.tracked_folders.clone(),
        Err(e) => {
            swarn!("Config", "{e}; using tracked_folders from config");
            cfg.tracked_folders.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let cfg = load_or_default(&dir.path().join("absent.rune"));

        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn tracked_file_overrides_seed_list() {
        let dir = tempdir().unwrap();
        let cfg = Config {
            tracked_folders: vec![FolderId::new("/seed")],
            data_dir: dir.path().to_path_buf(),
            ..Config::default()
        };

        assert_eq!(resolve_tracked(&cfg), vec![FolderId::new("/seed")]);

        TrackedList::in_dir(dir.path())
            .save(&[FolderId::new("/saved")])
            .unwrap();

        assert_eq!(resolve_tracked(&cfg), vec![FolderId::new("/saved")]);
    }

    #[test]
    fn corrupt_tracked_file_falls_back_to_seed() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("tracked.json"), "[1, 2").unwrap();

        let cfg = Config {
            tracked_folders: vec![FolderId::new("/seed")],
            data_dir: dir.path().to_path_buf(),
            ..Config::default()
        };

        assert_eq!(resolve_tracked(&cfg), vec![FolderId::new("/seed")]);
    }
}
