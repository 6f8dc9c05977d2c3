//! Project manifest (`project.json`) reading.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Project-level metadata consumed by the project checks.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectMetadata {
    pub name: String,
    pub description: String,
    /// package name → declared version (possibly decorated, e.g. `[2.12.3]`).
    pub dependencies: BTreeMap<String, String>,
    /// Path of the manifest file.
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ManifestDoc {
    name: String,
    description: String,
    dependencies: BTreeMap<String, String>,
}

/// Read `project.json` under the scan root. Absence is not an error,
/// project-level checks are simply skipped; a malformed manifest is
/// logged and treated the same.
pub fn load(root: &Path) -> Option<ProjectMetadata> {
    let path = root.join("project.json");
    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(_) => return None,
    };
    match serde_json::from_str::<ManifestDoc>(&raw) {
        Ok(doc) => Some(ProjectMetadata {
            name: doc.name,
            description: doc.description,
            dependencies: doc.dependencies,
            path,
        }),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "skipping malformed project manifest");
            None
        }
    }
}
