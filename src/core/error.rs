// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

/// Failures the tracker can observe. None of them are fatal: the engine
/// always degrades to "no active folder" or keeps its in-memory totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Configuration could not be used as written.
    ///
    /// Examples:
    /// - `tracked_folders` is not a list of strings
    /// - the config file does not parse
    ConfigInvalid(String),

    /// A stored record exists but cannot be read back.
    /// The folder starts from zero instead.
    PersistenceReadCorrupt { folder: String, reason: String },

    /// A record could not be written. The in-memory total is kept and the
    /// next checkpoint writes it again.
    PersistenceWriteFailed { folder: String, reason: String },
}

impl Error {
    pub fn read_corrupt(folder: impl fmt::Display, reason: impl fmt::Display) -> Self {
        Error::PersistenceReadCorrupt {
            folder: folder.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn write_failed(folder: impl fmt::Display, reason: impl fmt::Display) -> Self {
        Error::PersistenceWriteFailed {
            folder: folder.to_string(),
            reason: reason.to_string(),
        }
    }
}

// ---------------- Display ----------------

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ConfigInvalid(msg) =>
                write!(f, "invalid configuration: {msg}"),
            Error::PersistenceReadCorrupt { folder, reason } =>
                write!(f, "unreadable record for {folder}: {reason}"),
            Error::PersistenceWriteFailed { folder, reason } =>
                write!(f, "failed to save time for {folder}: {reason}"),
        }
    }
}

impl std::error::Error for Error {}
