//! Typed parameter reads with soft fallback.
//!
//! A malformed parameter (wrong type, out of its declared range) must
//! degrade that single check to its hardcoded default, never abort the
//! evaluation.

use crate::catalog::{ParameterValue, Rule};

/// Read a numeric parameter, falling back to `default` when the
/// parameter is absent, of the wrong type, or outside its own declared
/// bounds.
pub fn number(rule: &Rule, name: &str, default: f64) -> f64 {
    match rule.parameters.get(name).map(|p| &p.value) {
        Some(ParameterValue::Number { value, min, max }) => {
            if *value < *min || *value > *max {
                tracing::warn!(
                    rule_id = %rule.id,
                    parameter = name,
                    value = *value,
                    "parameter outside its declared bounds, using default"
                );
                default
            } else {
                *value
            }
        }
        Some(other) => {
            tracing::warn!(
                rule_id = %rule.id,
                parameter = name,
                found = other.type_name(),
                "parameter has wrong type, using default"
            );
            default
        }
        None => default,
    }
}

/// Read a boolean parameter with fallback.
pub fn boolean(rule: &Rule, name: &str, default: bool) -> bool {
    match rule.parameters.get(name).map(|p| &p.value) {
        Some(ParameterValue::Bool { value }) => *value,
        Some(other) => {
            tracing::warn!(
                rule_id = %rule.id,
                parameter = name,
                found = other.type_name(),
                "parameter has wrong type, using default"
            );
            default
        }
        None => default,
    }
}

/// Read a string-list parameter with fallback.
pub fn string_list(rule: &Rule, name: &str, default: &[&str]) -> Vec<String> {
    match rule.parameters.get(name).map(|p| &p.value) {
        Some(ParameterValue::StringList { value }) => value.clone(),
        Some(other) => {
            tracing::warn!(
                rule_id = %rule.id,
                parameter = name,
                found = other.type_name(),
                "parameter has wrong type, using default"
            );
            default.iter().map(|s| s.to_string()).collect()
        }
        None => default.iter().map(|s| s.to_string()).collect(),
    }
}
