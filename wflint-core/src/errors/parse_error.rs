//! Workflow document parse errors.

use std::path::PathBuf;

/// Errors from parsing a single workflow document.
///
/// Both variants are non-fatal to a scan: the caller skips the file and
/// continues.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("malformed workflow document {path}: {message}")]
    Malformed { path: PathBuf, message: String },

    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    /// The path of the file that failed.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Malformed { path, .. } | Self::Io { path, .. } => path,
        }
    }
}
