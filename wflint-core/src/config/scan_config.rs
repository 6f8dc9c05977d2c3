//! Scanner configuration.

use serde::{Deserialize, Serialize};

/// Configuration for workflow file discovery.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanConfig {
    /// Maximum file size in bytes. Default: 4MB (4_194_304).
    pub max_file_size: Option<u64>,
    /// Additional ignore patterns beyond the built-in defaults.
    #[serde(default)]
    pub extra_ignore: Vec<String>,
    /// Follow symbolic links. Default: false.
    pub follow_symlinks: Option<bool>,
}

impl ScanConfig {
    /// Returns the effective max file size, defaulting to 4MB.
    pub fn effective_max_file_size(&self) -> u64 {
        self.max_file_size.unwrap_or(4_194_304)
    }

    /// Returns whether symlinks are followed, defaulting to false.
    pub fn effective_follow_symlinks(&self) -> bool {
        self.follow_symlinks.unwrap_or(false)
    }
}
