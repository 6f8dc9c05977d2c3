//! Structural-containment checks over recorded activity metadata.
//!
//! These read the parse-time ancestor kinds and property bags; the tree
//! is never re-walked at evaluation time.

use regex::Regex;
use serde_json::json;

use super::params;
use super::types::{detail, Finding};
use crate::catalog::Rule;
use crate::parser::{Activity, WorkflowDocument};

const DEFAULT_RISKY: &[&str] = &["InvokeWorkflowFile", "InvokeCode", "StartProcess", "KillProcess"];
const DEFAULT_SELECTOR_PATTERNS: &[&str] = &[r#"idx\s*=\s*['"]?\d+"#];
const DEFAULT_TIMEOUT_ACTIVITIES: &[&str] = &["Click", "TypeInto", "GetText", "ElementExists"];

/// Failure-prone activities must live inside a TryCatch.
pub fn check_risky_without_trycatch(rule: &Rule, doc: &WorkflowDocument) -> Vec<Finding> {
    let risky = params::string_list(rule, "risky_activities", DEFAULT_RISKY);

    let cases: Vec<&Activity> = doc
        .activities
        .iter()
        .filter(|a| !rule.exceptions.contains(&a.display_name))
        .filter(|a| risky.iter().any(|r| a.kind.contains(r.as_str())))
        .filter(|a| !a.has_ancestor("TryCatch"))
        .collect();

    let file = doc.path.display().to_string();
    let total = cases.len();
    cases
        .into_iter()
        .map(|a| {
            Finding::of_rule(
                rule,
                &file,
                format!("activity {}", a.display_name),
                format!(
                    "'{}' ({}) runs outside any TryCatch",
                    a.display_name, a.kind
                ),
                detail(&[
                    ("activity", json!(a.display_name)),
                    ("kind", json!(a.kind)),
                    ("parent_kind", json!(a.parent_kind())),
                ]),
                total,
            )
        })
        .collect()
}

/// Selectors must not encode a positional index.
pub fn check_selector_index(rule: &Rule, doc: &WorkflowDocument) -> Vec<Finding> {
    let patterns = params::string_list(rule, "patterns", DEFAULT_SELECTOR_PATTERNS);
    let compiled: Vec<Regex> = patterns
        .iter()
        .filter_map(|p| match Regex::new(p) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::warn!(rule_id = %rule.id, pattern = %p, error = %e, "skipping invalid pattern");
                None
            }
        })
        .collect();

    let mut cases: Vec<(&Activity, &str)> = Vec::new();
    for activity in &doc.activities {
        if rule.exceptions.contains(&activity.display_name) {
            continue;
        }
        let Some(selector) = activity.property("Selector") else {
            continue;
        };
        if compiled.iter().any(|re| re.is_match(selector)) {
            cases.push((activity, selector));
        }
    }

    let file = doc.path.display().to_string();
    let total = cases.len();
    cases
        .into_iter()
        .map(|(a, selector)| {
            Finding::of_rule(
                rule,
                &file,
                format!("activity {}", a.display_name),
                format!("'{}' uses a positional selector index", a.display_name),
                detail(&[
                    ("activity", json!(a.display_name)),
                    ("kind", json!(a.kind)),
                    ("selector", json!(selector)),
                ]),
                total,
            )
        })
        .collect()
}

/// Listed activity kinds must declare an explicit timeout property.
pub fn check_missing_timeout(rule: &Rule, doc: &WorkflowDocument) -> Vec<Finding> {
    let kinds = params::string_list(rule, "activities", DEFAULT_TIMEOUT_ACTIVITIES);

    let cases: Vec<&Activity> = doc
        .activities
        .iter()
        .filter(|a| !rule.exceptions.contains(&a.display_name))
        .filter(|a| kinds.iter().any(|k| k == &a.kind))
        .filter(|a| {
            let timeout = a
                .property("Timeout")
                .or_else(|| a.property("TimeoutMS"))
                .unwrap_or("");
            timeout.is_empty()
        })
        .collect();

    let file = doc.path.display().to_string();
    let total = cases.len();
    cases
        .into_iter()
        .map(|a| {
            Finding::of_rule(
                rule,
                &file,
                format!("activity {}", a.display_name),
                format!("'{}' ({}) has no explicit timeout", a.display_name, a.kind),
                detail(&[
                    ("activity", json!(a.display_name)),
                    ("kind", json!(a.kind)),
                ]),
                total,
            )
        })
        .collect()
}
