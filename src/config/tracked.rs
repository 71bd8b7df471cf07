// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::{error::Error, folder::FolderId, utils::write_atomic};

const TRACKED_FILE: &str = "tracked.json";
const LABEL: &str = "tracked folder list";

/// The user's ordered tracked-folder list, stored as a JSON array of paths
/// next to the time records. Written on every add/remove.
#[derive(Debug, Clone)]
pub struct TrackedList {
    path: PathBuf,
}

impl TrackedList {
    pub fn in_dir(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(TRACKED_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when the list was never saved.
    pub fn load(&self) -> Result<Option<Vec<FolderId>>, Error> {
        let text = match fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::ConfigInvalid(format!("{}: {e}", self.path.display()))),
        };

        serde_json::from_str::<Vec<FolderId>>(&text)
            .map(|list| Some(crate::core::tracker::dedupe_folders(list)))
            .map_err(|e| Error::ConfigInvalid(format!("{}: {e}", self.path.display())))
    }

    pub fn save(&self, folders: &[FolderId]) -> Result<(), Error> {
        let body = serde_json::to_string_pretty(folders).map_err(|e| Error::write_failed(LABEL, e))?;

        write_atomic(&self.path, &body)
            .map_err(|e| Error::write_failed(LABEL, format!("{}: {e}", self.path.display())))
    }
}
