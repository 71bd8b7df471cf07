// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};

pub fn now_ms() -> u64 {
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    d.as_millis() as u64
}

pub fn datetime_from_ms(ms: u64) -> DateTime<Utc> {
    i64::try_from(ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .unwrap_or_else(Utc::now)
}

/// `{hours}h {minutes}m {seconds}s`, sub-second remainder dropped.
pub fn format_elapsed(ms: u64) -> String {
    let total_secs = ms / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{hours}h {minutes}m {seconds}s")
}

/// Write through a sibling `<name>.tmp` and rename it over `path`, so a
/// crash never leaves half a file. Creates the parent directory.
pub fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_hours_minutes_seconds() {
        assert_eq!(format_elapsed(0), "0h 0m 0s");
        assert_eq!(format_elapsed(999), "0h 0m 0s");
        assert_eq!(format_elapsed(61_500), "0h 1m 1s");
        assert_eq!(format_elapsed(3_600_000), "1h 0m 0s");
        assert_eq!(format_elapsed(100 * 3_600_000 + 59 * 60_000 + 59_000), "100h 59m 59s");
    }

    #[test]
    fn millis_convert_to_utc() {
        assert_eq!(datetime_from_ms(0), DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(datetime_from_ms(1_500).timestamp_millis(), 1_500);
    }

    #[test]
    fn atomic_write_replaces_and_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("list.json");

        write_atomic(&path, "one").unwrap();
        write_atomic(&path, "two").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "two");
        assert!(!dir.path().join("nested").join("list.json.tmp").exists());
    }
}
