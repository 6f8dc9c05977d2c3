//! Project scan errors.

use std::path::PathBuf;

/// Errors from enumerating workflow files under a project root.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("scan root {path} does not exist or is not a directory")]
    RootNotFound { path: PathBuf },

    #[error("failed to walk {path}")]
    Walk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
