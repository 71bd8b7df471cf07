// Author: Dustin Pilgrim
// License: MIT

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable key for a workspace folder: its absolute path, without a trailing separator.
///
/// Deserialization goes through `FolderId::new`, so hand-edited files get the
/// same normalization as CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct FolderId(String);

impl FolderId {
    pub fn new(path: impl Into<String>) -> Self {
        let raw: String = path.into();
        let trimmed = raw.trim();

        let key = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };

        // "///" trims down to nothing; that is still the root.
        if key.is_empty() && !trimmed.is_empty() {
            return Self("/".to_string());
        }

        Self(key.to_string())
    }

    pub fn from_path(path: &Path) -> Self {
        Self::new(path.to_string_lossy().into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FolderId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for FolderId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<FolderId> for String {
    fn from(id: FolderId) -> Self {
        id.0
    }
}

/// Persisted time record for one folder.
///
/// On disk this is `{ "totalTime": <ms>, "updated": "<RFC 3339>" }`.
/// Missing fields fall back to zero / the epoch rather than failing the read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderRecord {
    #[serde(rename = "totalTime", default)]
    pub total_time_ms: u64,

    #[serde(rename = "updated", default)]
    pub updated_at: DateTime<Utc>,
}

impl FolderRecord {
    pub fn new(total_time_ms: u64, updated_at: DateTime<Utc>) -> Self {
        Self {
            total_time_ms,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_id_strips_trailing_separator() {
        assert_eq!(FolderId::new("/home/me/proj/").as_str(), "/home/me/proj");
        assert_eq!(FolderId::new("  /home/me/proj  ").as_str(), "/home/me/proj");
    }

    #[test]
    fn folder_id_keeps_root() {
        assert_eq!(FolderId::new("/").as_str(), "/");
        assert_eq!(FolderId::new("///").as_str(), "/");
    }

    #[test]
    fn deserialized_ids_are_normalized() {
        let ids: Vec<FolderId> = serde_json::from_str(r#"["/a/", "  /b  "]"#).unwrap();

        assert_eq!(ids, vec![FolderId::new("/a"), FolderId::new("/b")]);
        assert_eq!(serde_json::to_string(&ids).unwrap(), r#"["/a","/b"]"#);
    }

    #[test]
    fn record_uses_wire_field_names() {
        let rec = FolderRecord::new(5000, DateTime::<Utc>::UNIX_EPOCH);
        let v = serde_json::to_value(&rec).unwrap();

        assert_eq!(v["totalTime"], 5000);
        assert!(v["updated"].as_str().unwrap().starts_with("1970-01-01T00:00:00"));
    }

    #[test]
    fn record_tolerates_missing_timestamp() {
        let rec: FolderRecord = serde_json::from_str(r#"{ "totalTime": 42 }"#).unwrap();
        assert_eq!(rec.total_time_ms, 42);
        assert_eq!(rec.updated_at, DateTime::<Utc>::UNIX_EPOCH);
    }
}
