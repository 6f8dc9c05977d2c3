//! Structural checks: If nesting depth, long sequences, modularization,
//! and empty catch blocks.

use serde_json::json;
use wflint_core::constants::NESTING_REPORT_LIMIT;

use super::params;
use super::types::{detail, Finding};
use crate::catalog::Rule;
use crate::parser::{WorkflowDocument, WorkflowKind};

/// Reports when the deepest If chain exceeds the configured threshold.
/// One finding per document, carrying up to five representative
/// offenders plus the maximum/threshold pair.
pub fn check_if_nesting(rule: &Rule, doc: &WorkflowDocument) -> Vec<Finding> {
    let threshold = params::number(rule, "max_depth", 3.0) as usize;

    let max_found = doc.ifs.iter().map(|i| i.depth).max().unwrap_or(0);
    if max_found <= threshold {
        return Vec::new();
    }

    let offenders: Vec<_> = doc
        .ifs
        .iter()
        .filter(|i| i.depth > threshold)
        .take(NESTING_REPORT_LIMIT)
        .map(|i| json!({ "display_name": i.display_name, "depth": i.depth }))
        .collect();

    vec![Finding::of_rule(
        rule,
        &doc.path.display().to_string(),
        format!("workflow {}", doc.file_name()),
        format!("If nesting reaches depth {max_found}, threshold is {threshold}"),
        detail(&[
            ("max_nesting_found", json!(max_found)),
            ("threshold", json!(threshold)),
            ("offenders", json!(offenders)),
        ]),
        1,
    )]
}

/// Applies only to Sequence-kind documents: activity count over the
/// configured threshold.
pub fn check_long_sequence(rule: &Rule, doc: &WorkflowDocument) -> Vec<Finding> {
    if doc.kind != WorkflowKind::Sequence {
        return Vec::new();
    }
    let threshold = params::number(rule, "max_activities", 20.0) as usize;
    let count = doc.activity_count();
    if count <= threshold {
        return Vec::new();
    }

    vec![Finding::of_rule(
        rule,
        &doc.path.display().to_string(),
        format!("workflow {}", doc.file_name()),
        format!("sequence holds {count} activities, threshold is {threshold}"),
        detail(&[
            ("activity_count", json!(count)),
            ("threshold", json!(threshold)),
        ]),
        1,
    )]
}

/// Large workflow with zero sub-workflow invocations.
pub fn check_modularization(rule: &Rule, doc: &WorkflowDocument) -> Vec<Finding> {
    let threshold = params::number(rule, "max_activities", 30.0) as usize;
    let count = doc.activity_count();
    let invocations = doc.kind_count("InvokeWorkflowFile");
    if count <= threshold || invocations > 0 {
        return Vec::new();
    }

    vec![Finding::of_rule(
        rule,
        &doc.path.display().to_string(),
        format!("workflow {}", doc.file_name()),
        format!("{count} activities and no sub-workflow invocations, threshold is {threshold}"),
        detail(&[
            ("activity_count", json!(count)),
            ("threshold", json!(threshold)),
            ("invocations", json!(invocations)),
        ]),
        1,
    )]
}

/// Catch branches that are structurally empty per the parser heuristic.
pub fn check_empty_catch(rule: &Rule, doc: &WorkflowDocument) -> Vec<Finding> {
    let cases: Vec<&str> = doc
        .try_catches
        .iter()
        .filter(|tc| tc.has_catch && tc.catch_empty)
        .filter(|tc| !rule.exceptions.contains(&tc.display_name))
        .map(|tc| tc.display_name.as_str())
        .collect();

    let file = doc.path.display().to_string();
    let total = cases.len();
    cases
        .into_iter()
        .map(|name| {
            Finding::of_rule(
                rule,
                &file,
                format!("trycatch {name}"),
                format!("TryCatch '{name}' has an empty catch branch"),
                detail(&[("display_name", json!(name))]),
                total,
            )
        })
        .collect()
}
