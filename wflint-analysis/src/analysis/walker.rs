//! Workflow file discovery.
//!
//! Depth-first walk over the project root via the `ignore` crate,
//! skipping version-control and local-cache directories. Output is
//! sorted by path for deterministic scans.

use std::path::{Path, PathBuf};

use wflint_core::{ScanConfig, ScanError};

/// Directories never scanned: version control plus studio-local caches.
pub const DEFAULT_IGNORES: &[&str] = &[
    ".git",
    ".svn",
    ".hg",
    ".local",
    ".settings",
    ".objects",
    ".tmh",
    ".screenshots",
];

/// Collect all workflow (`.xaml`) files under `root`.
pub fn walk_workflows(root: &Path, config: &ScanConfig) -> Result<Vec<PathBuf>, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::RootNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut builder = ignore::WalkBuilder::new(root);
    builder
        .hidden(false)
        .git_ignore(true)
        .follow_links(config.effective_follow_symlinks())
        .max_filesize(Some(config.effective_max_file_size()));

    // Default ignores plus user-configured extras, as negated overrides.
    let mut overrides = ignore::overrides::OverrideBuilder::new(root);
    for pattern in DEFAULT_IGNORES {
        let _ = overrides.add(&format!("!{pattern}/**"));
        let _ = overrides.add(&format!("!{pattern}"));
    }
    for pattern in &config.extra_ignore {
        let _ = overrides.add(&format!("!{pattern}"));
    }
    if let Ok(built) = overrides.build() {
        builder.overrides(built);
    }

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in builder.build() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().map_or(false, |ft| ft.is_file()) {
            continue;
        }
        let path = entry.path();
        let is_workflow = path
            .extension()
            .and_then(|e| e.to_str())
            .map_or(false, |e| e.eq_ignore_ascii_case("xaml"));
        if is_workflow {
            files.push(path.to_path_buf());
        }
    }

    // Sort for deterministic output
    files.sort();
    Ok(files)
}
