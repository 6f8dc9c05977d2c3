//! Project-level checks: dependency versions and project naming.
//!
//! Pure functions over the project metadata. Caller-owned state is
//! never mutated; classification results come back as new structures.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use regex::Regex;
use serde_json::json;

use super::types::{detail, Finding};
use super::{params, versions};
use crate::catalog::Rule;
use crate::metadata::ProjectMetadata;

const DEFAULT_NAME_PATTERNS: &[&str] = &[r"^[A-Z][A-Za-z0-9]*([._-][A-Za-z0-9]+)*$"];

/// Status of one declared or required package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyStatus {
    Ok,
    Outdated,
    Missing,
    Additional,
}

impl DependencyStatus {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Outdated => "outdated",
            Self::Missing => "missing",
            Self::Additional => "additional",
        }
    }
}

/// One classified package.
#[derive(Debug, Clone)]
pub struct DependencyEntry {
    pub required: Option<String>,
    pub declared: Option<String>,
    pub status: DependencyStatus,
}

/// Classify every required and declared package. Pure; returns a new
/// map instead of enriching the input.
pub fn classify_dependencies(
    declared: &BTreeMap<String, String>,
    required: &BTreeMap<String, String>,
) -> BTreeMap<String, DependencyEntry> {
    let mut report = BTreeMap::new();

    for (pkg, min_version) in required {
        let entry = match declared.get(pkg) {
            None => DependencyEntry {
                required: Some(min_version.clone()),
                declared: None,
                status: DependencyStatus::Missing,
            },
            Some(version) => DependencyEntry {
                required: Some(min_version.clone()),
                declared: Some(version.clone()),
                status: if versions::compare(version, min_version) == Ordering::Less {
                    DependencyStatus::Outdated
                } else {
                    DependencyStatus::Ok
                },
            },
        };
        report.insert(pkg.clone(), entry);
    }

    for (pkg, version) in declared {
        report.entry(pkg.clone()).or_insert_with(|| DependencyEntry {
            required: None,
            declared: Some(version.clone()),
            status: DependencyStatus::Additional,
        });
    }

    report
}

/// Findings for missing and outdated packages only.
pub fn check_dependencies(
    rule: &Rule,
    project: &ProjectMetadata,
    required: &BTreeMap<String, String>,
) -> Vec<Finding> {
    let report = classify_dependencies(&project.dependencies, required);

    let offending: Vec<(&String, &DependencyEntry)> = report
        .iter()
        .filter(|(_, e)| {
            matches!(
                e.status,
                DependencyStatus::Missing | DependencyStatus::Outdated
            )
        })
        .collect();

    let file = project.path.display().to_string();
    let total = offending.len();
    offending
        .into_iter()
        .map(|(pkg, entry)| {
            Finding::of_rule(
                rule,
                &file,
                format!("dependency {pkg}"),
                match entry.status {
                    DependencyStatus::Missing => format!(
                        "package '{pkg}' is required (>= {}) but not declared",
                        entry.required.as_deref().unwrap_or("?")
                    ),
                    _ => format!(
                        "package '{pkg}' is outdated: declared {}, required >= {}",
                        entry.declared.as_deref().unwrap_or("?"),
                        entry.required.as_deref().unwrap_or("?")
                    ),
                },
                detail(&[
                    ("package", json!(pkg)),
                    ("required", json!(entry.required)),
                    ("declared", json!(entry.declared)),
                    ("status", json!(entry.status.name())),
                ]),
                total,
            )
        })
        .collect()
}

/// The project name must match one of the configured patterns, tried in
/// order; first match wins. No match reports the reason and any missing
/// required segments.
pub fn check_project_naming(rule: &Rule, project: &ProjectMetadata) -> Vec<Finding> {
    let patterns = params::string_list(rule, "patterns", DEFAULT_NAME_PATTERNS);
    let required_segments = params::string_list(rule, "required_segments", &[]);

    let name = project.name.as_str();
    let matched = patterns.iter().any(|p| match Regex::new(p) {
        Ok(re) => re.is_match(name),
        Err(e) => {
            tracing::warn!(rule_id = %rule.id, pattern = %p, error = %e, "skipping invalid pattern");
            false
        }
    });
    if matched {
        return Vec::new();
    }

    let missing_segments: Vec<&String> = required_segments
        .iter()
        .filter(|seg| !name.contains(seg.as_str()))
        .collect();

    let mut d = detail(&[
        ("name", json!(name)),
        ("patterns", json!(patterns)),
        ("reason", json!("no pattern matched")),
    ]);
    if !missing_segments.is_empty() {
        d.insert("missing_segments".to_string(), json!(missing_segments));
    }

    vec![Finding::of_rule(
        rule,
        &project.path.display().to_string(),
        format!("project {name}"),
        format!("project name '{name}' matches none of the configured patterns"),
        d,
        1,
    )]
}
