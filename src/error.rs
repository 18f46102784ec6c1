//! Error types shared by the dock core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the dock core. None of them is fatal to the process.
#[derive(Debug, Error)]
pub enum DockError {
    /// A persisted document exists but could not be read.
    #[error("I/O error reading {path}: {source}")]
    ConfigRead {
        /// Path to the document.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A persisted document is malformed. Recovered by substituting defaults.
    #[error("malformed document {path}: {source}")]
    ConfigParse {
        /// Path to the document.
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Writing a document failed. In-memory state stays authoritative.
    #[error("failed to write {path}: {source}")]
    ConfigWrite {
        /// Path to the document.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A button-list index was past the end of the list.
    #[error("button index {index} out of range (list has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Every launch strategy for an action failed.
    #[error("could not launch '{action}': {reason}")]
    ActionLaunch { action: String, reason: String },
}

impl DockError {
    /// True for the config errors that were recovered by falling back to defaults.
    pub fn is_recovered(&self) -> bool {
        matches!(self, DockError::ConfigRead { .. } | DockError::ConfigParse { .. })
    }
}
