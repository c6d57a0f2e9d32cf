//! Error types for the universe codecs.

use thiserror::Error;

/// Errors that abort a whole decode or encode.
///
/// Problems with a single character entry never surface here; they are
/// collected as [`SkippedEntry`] values instead.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid universe file: {0}")]
    InvalidUniverse(String),
}

pub type Result<T> = std::result::Result<T, CodecError>;

/// A `characters/*.json` entry that could not be turned into a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Path of the entry inside the archive.
    pub path: String,
    /// Why the entry was skipped.
    pub reason: String,
}

impl SkippedEntry {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for SkippedEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}
