// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::io;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"@author "foldtime"
@description "foldtime configuration"

foldtime:
  # Folders to account time for, highest priority first. Used until the
  # first `foldtime add` / `foldtime remove`, which write tracked.json.
  # tracked_folders [
  #   "~/src/my-project"
  # ]

  # Stop the clock after this long without activity (ms).
  idle_timeout_ms 300000

  # Checkpoint running time to disk this often (ms).
  save_interval_ms 30000

  # Status-bar refresh period (ms).
  display_interval_ms 1000

  # How often the idle window is checked (ms).
  idle_check_ms 10000
end
"#;

/// Write the commented default config if nothing exists at `path` yet.
pub fn ensure_config_exists(path: &Path) -> io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, DEFAULT_CONFIG)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_once_and_never_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("foldtime").join("foldtime.rune");

        assert!(ensure_config_exists(&path).unwrap());
        assert!(fs::read_to_string(&path).unwrap().contains("idle_timeout_ms 300000"));

        fs::write(&path, "custom").unwrap();
        assert!(!ensure_config_exists(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "custom");
    }
}
