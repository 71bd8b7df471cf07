// Author: Dustin Pilgrim
// License: MIT

use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use rune_cfg::{RuneConfig, Value};

use crate::config::model::*;
use crate::core::{error::Error, folder::FolderId};

const ROOT: &str = "foldtime";

/// Parse a config file. Individual bad values degrade to defaults and are
/// returned as warnings; only an unreadable/unparsable file is an `Err`.
pub fn load_file(path: &Path) -> Result<(Config, Vec<Error>)> {
    let rune = RuneConfig::from_file(path)
        .wrap_err_with(|| format!("failed to load config from {}", path.display()))?;

    Ok(parse_config(&rune))
}

pub fn parse_config(config: &RuneConfig) -> (Config, Vec<Error>) {
    let mut warnings = Vec::new();
    let defaults = Config::default();

    let tracked_folders = match config
        .get_value(&key("tracked_folders"))
        .or_else(|_| config.get_value(&kebab("tracked_folders")))
    {
        Ok(Value::Array(items)) => {
            let items = items
                .iter()
                .map(|v| match v {
                    Value::String(s) => Some(s.clone()),
                    _ => None,
                })
                .collect();
            folders_from_items(items).unwrap_or_else(|e| {
                warnings.push(e);
                Vec::new()
            })
        }
        Ok(_) => {
            warnings.push(Error::ConfigInvalid(
                "tracked_folders must be a list of paths".to_string(),
            ));
            Vec::new()
        }
        Err(_) => Vec::new(),
    };

    let data_dir = config
        .get::<String>(&key("data_dir"))
        .or_else(|_| config.get::<String>(&kebab("data_dir")))
        .ok()
        .map(|s| expand_home(s.trim()))
        .unwrap_or(defaults.data_dir);

    let cfg = Config {
        tracked_folders,
        idle_timeout_ms: interval_or_default(get_u64(config, "idle_timeout_ms"), DEFAULT_IDLE_TIMEOUT_MS),
        save_interval_ms: interval_or_default(get_u64(config, "save_interval_ms"), DEFAULT_SAVE_INTERVAL_MS),
        display_interval_ms: interval_or_default(
            get_u64(config, "display_interval_ms"),
            DEFAULT_DISPLAY_INTERVAL_MS,
        ),
        idle_check_ms: interval_or_default(get_u64(config, "idle_check_ms"), DEFAULT_IDLE_CHECK_MS),
        data_dir,
    };

    (cfg, warnings)
}

/// Any non-string entry poisons the whole list.
pub fn folders_from_items(items: Vec<Option<String>>) -> Result<Vec<FolderId>, Error> {
    let mut out = Vec::with_capacity(items.len());

    for (idx, item) in items.into_iter().enumerate() {
        match item {
            Some(s) if !s.trim().is_empty() => out.push(FolderId::new(expand_home(s.trim()).to_string_lossy())),
            Some(_) => {
                return Err(Error::ConfigInvalid(format!("tracked_folders[{idx}] is empty")));
            }
            None => {
                return Err(Error::ConfigInvalid(format!(
                    "tracked_folders[{idx}] is not a string"
                )));
            }
        }
    }

    Ok(crate::core::tracker::dedupe_folders(out))
}

/// Zero would spin a timer; treat it like "unset".
pub fn interval_or_default(raw: Option<u64>, default: u64) -> u64 {
    match raw {
        Some(0) | None => default,
        Some(v) => v,
    }
}

pub fn expand_home(raw: &str) -> PathBuf {
    if raw == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(raw));
    }
    match (raw.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(raw),
    }
}

fn get_u64(config: &RuneConfig, name: &str) -> Option<u64> {
    config
        .get::<u64>(&key(name))
        .or_else(|_| config.get::<u64>(&kebab(name)))
        .ok()
}

fn key(name: &str) -> String {
    format!("{ROOT}.{name}")
}

fn kebab(name: &str) -> String {
    format!("{ROOT}.{}", name.replace('_', "-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_items_keep_order_and_drop_repeats() {
        let items = vec![
            Some("/work/b".to_string()),
            Some("/work/a/".to_string()),
            Some("/work/b".to_string()),
        ];

        assert_eq!(
            folders_from_items(items).unwrap(),
            vec![FolderId::new("/work/b"), FolderId::new("/work/a")]
        );
    }

    #[test]
    fn non_string_entry_is_config_invalid() {
        let items = vec![Some("/work/a".to_string()), None];

        assert!(matches!(folders_from_items(items), Err(Error::ConfigInvalid(_))));
    }

    #[test]
    fn blank_entry_is_config_invalid() {
        let items = vec![Some("   ".to_string())];

        assert!(folders_from_items(items).is_err());
    }

    #[test]
    fn zero_or_missing_interval_uses_default() {
        assert_eq!(interval_or_default(None, 30_000), 30_000);
        assert_eq!(interval_or_default(Some(0), 30_000), 30_000);
        assert_eq!(interval_or_default(Some(5), 30_000), 5);
    }

    #[test]
    fn tilde_expands_to_home() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/src/app"), home.join("src/app"));
        }
        assert_eq!(expand_home("/abs/path"), PathBuf::from("/abs/path"));
    }
}
