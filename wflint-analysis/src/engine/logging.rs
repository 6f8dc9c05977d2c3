//! Log-coverage and commented-code ratio checks.

use serde_json::json;

use super::params;
use super::types::{detail, Finding};
use crate::catalog::Rule;
use crate::parser::WorkflowDocument;

/// Round to one decimal for reporting.
fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// `activities / max(logs, 1)`; zero logs makes the ratio equal the
/// activity count rather than infinity. Reports when the ratio exceeds
/// the configured ceiling.
pub fn check_logging_ratio(rule: &Rule, doc: &WorkflowDocument) -> Vec<Finding> {
    let ceiling = params::number(rule, "max_ratio", 10.0);

    let activities = doc.activity_count();
    let logs = doc.log_count();
    let ratio = activities as f64 / logs.max(1) as f64;
    if ratio <= ceiling {
        return Vec::new();
    }

    vec![Finding::of_rule(
        rule,
        &doc.path.display().to_string(),
        format!("workflow {}", doc.file_name()),
        format!(
            "one log message per {} activities, ceiling is {ceiling}",
            round1(ratio)
        ),
        detail(&[
            ("activities", json!(activities)),
            ("logs", json!(logs)),
            ("ratio", json!(round1(ratio))),
            ("ceiling", json!(ceiling)),
        ]),
        1,
    )]
}

/// `commented_activities / total_activities * 100` against a percentage
/// threshold.
pub fn check_commented_code(rule: &Rule, doc: &WorkflowDocument) -> Vec<Finding> {
    let threshold = params::number(rule, "max_percent", 10.0);

    let total = doc.activity_count();
    if total == 0 {
        return Vec::new();
    }
    let commented = doc.comments.commented_activities;
    let percent = commented as f64 / total as f64 * 100.0;
    if percent <= threshold {
        return Vec::new();
    }

    vec![Finding::of_rule(
        rule,
        &doc.path.display().to_string(),
        format!("workflow {}", doc.file_name()),
        format!(
            "{}% of activities are commented out, threshold is {threshold}%",
            round1(percent)
        ),
        detail(&[
            ("commented_activities", json!(commented)),
            ("total_activities", json!(total)),
            ("percent", json!(round1(percent))),
            ("threshold", json!(threshold)),
            ("commented_lines", json!(doc.comments.commented_lines())),
        ]),
        1,
    )]
}
