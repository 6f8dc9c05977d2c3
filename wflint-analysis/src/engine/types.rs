//! Finding types, the universal output of rule evaluation.

use serde::Serialize;
use serde_json::{Map, Value};
use wflint_core::Severity;

use crate::catalog::{PenaltyMode, Rule};

/// Penalty audit block carried by every finding.
#[derive(Debug, Clone, Serialize)]
pub struct PenaltyAudit {
    pub penalty_mode: PenaltyMode,
    pub base_penalty: f64,
    /// Total cases the rule found in the evaluated scope.
    pub cases_found: usize,
    pub actual_penalty: f64,
}

impl PenaltyAudit {
    /// `total` mode charges the base penalty once regardless of count;
    /// `individual` multiplies by occurrence count. Never negative.
    pub fn compute(rule: &Rule, cases_found: usize) -> Self {
        let base = rule.penalty.max(0.0);
        let actual = match rule.penalty_mode {
            PenaltyMode::Total => base,
            PenaltyMode::Individual => base * cases_found as f64,
        };
        Self {
            penalty_mode: rule.penalty_mode,
            base_penalty: base,
            cases_found,
            actual_penalty: actual,
        }
    }
}

/// One detected violation of a rule. Immutable once created; owned by
/// the caller, which aggregates findings into statistics.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub category: String,
    pub severity: Severity,
    pub rule_id: String,
    pub rule_name: String,
    pub description: String,
    pub file: String,
    /// Free-text location, e.g. `variable userName` or `activity Click OK`.
    pub location: String,
    /// Structured per-check detail.
    pub detail: Map<String, Value>,
    pub penalty: PenaltyAudit,
}

impl Finding {
    /// Build a finding for one case of a rule. `cases_found` is the
    /// rule's total case count in the evaluated scope, shared by all of
    /// its findings for auditability.
    pub fn of_rule(
        rule: &Rule,
        file: &str,
        location: String,
        description: String,
        detail: Map<String, Value>,
        cases_found: usize,
    ) -> Self {
        Self {
            category: rule.category.clone(),
            severity: rule.severity,
            rule_id: rule.id.clone(),
            rule_name: rule.name.clone(),
            description,
            file: file.to_string(),
            location,
            detail,
            penalty: PenaltyAudit::compute(rule, cases_found),
        }
    }
}

/// Shorthand for building a JSON detail map.
pub fn detail(entries: &[(&str, Value)]) -> Map<String, Value> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}
