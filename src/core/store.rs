// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::core::{
    error::Error,
    folder::{FolderId, FolderRecord},
    utils::write_atomic,
};

/// Durable storage consumed by the tracker.
///
/// `load` must not fail hard on a damaged record: it reports
/// `Error::PersistenceReadCorrupt` and the caller starts that folder from zero.
pub trait FolderStore: Send {
    fn load(&self, folder: &FolderId) -> Result<Option<FolderRecord>, Error>;

    fn save(&mut self, folder: &FolderId, record: &FolderRecord) -> Result<(), Error>;
}

/// One pretty-printed JSON file per folder, named by the SHA-256 of its path.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn record_path(&self, folder: &FolderId) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(folder.as_str().as_bytes());
        self.dir.join(format!("{:x}.json", hasher.finalize()))
    }

    fn read_optional(path: &Path) -> io::Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl FolderStore for JsonFileStore {
    fn load(&self, folder: &FolderId) -> Result<Option<FolderRecord>, Error> {
        let path = self.record_path(folder);

        let Some(text) =
            Self::read_optional(&path).map_err(|e| Error::read_corrupt(folder, e))?
        else {
            return Ok(None);
        };

        serde_json::from_str::<FolderRecord>(&text)
            .map(Some)
            .map_err(|e| Error::read_corrupt(folder, format!("{}: {e}", path.display())))
    }

    fn save(&mut self, folder: &FolderId, record: &FolderRecord) -> Result<(), Error> {
        let path = self.record_path(folder);
        let body = serde_json::to_string_pretty(record).map_err(|e| Error::write_failed(folder, e))?;

        write_atomic(&path, &body)
            .map_err(|e| Error::write_failed(folder, format!("{}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    fn record(ms: u64) -> FolderRecord {
        FolderRecord::new(ms, Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn save_then_load_returns_same_record() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path());
        let id = FolderId::new("/work/alpha");

        store.save(&id, &record(7000)).unwrap();

        assert_eq!(store.load(&id).unwrap(), Some(record(7000)));
    }

    #[test]
    fn missing_record_is_absent() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        assert_eq!(store.load(&FolderId::new("/nowhere")).unwrap(), None);
    }

    #[test]
    fn corrupt_record_reports_read_corrupt() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let id = FolderId::new("/work/broken");

        fs::write(store.record_path(&id), "{ totalTime: nope").unwrap();

        assert!(matches!(
            store.load(&id),
            Err(Error::PersistenceReadCorrupt { .. })
        ));
    }

    #[test]
    fn negative_total_is_corrupt() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let id = FolderId::new("/work/negative");

        fs::write(store.record_path(&id), r#"{ "totalTime": -5 }"#).unwrap();

        assert!(store.load(&id).is_err());
    }

    #[test]
    fn record_file_is_keyed_by_path_hash() {
        let store = JsonFileStore::new("/data");
        let a = store.record_path(&FolderId::new("/work/alpha"));
        let b = store.record_path(&FolderId::new("/work/alpha/"));
        let c = store.record_path(&FolderId::new("/work/beta"));

        assert_eq!(a, b);
        assert_ne!(a, c);

        let name = a.file_stem().unwrap().to_str().unwrap();
        assert_eq!(name.len(), 64);
        assert!(name.chars().all(|ch| ch.is_ascii_hexdigit()));
    }

    #[test]
    fn save_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("nested").join("logs"));
        let id = FolderId::new("/work/alpha");

        store.save(&id, &record(1)).unwrap();

        assert!(store.record_path(&id).exists());
    }

    #[test]
    fn save_into_a_file_path_fails() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let mut store = JsonFileStore::new(&blocker);
        let err = store.save(&FolderId::new("/work/alpha"), &record(1)).unwrap_err();

        assert!(matches!(err, Error::PersistenceWriteFailed { .. }));
    }
}
