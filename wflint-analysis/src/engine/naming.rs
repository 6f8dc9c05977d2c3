//! Identifier naming checks: variable case, argument direction prefix,
//! and generic-name detection.
//!
//! Every routine skips exception-listed identifiers before any pattern
//! logic runs, and skips identifiers shorter than two characters.

use regex::Regex;
use serde_json::json;
use wflint_core::constants::MIN_IDENTIFIER_LEN;

use super::types::{detail, Finding};
use super::params;
use crate::catalog::Rule;
use crate::parser::{ArgumentDirection, WorkflowDocument};

const DEFAULT_TYPE_PREFIXES: &[&str] = &["str", "int", "dbl", "bool", "dt", "arr", "lst", "dict"];
const DEFAULT_FORBIDDEN_NAMES: &[&str] = &[
    "test", "temp", "tmp", "var", "data", "value", "item", "foo", "bar",
];
const DEFAULT_FORBIDDEN_PATTERNS: &[&str] = &[r"\d+$"];

/// camelCase: lowercase first letter, no underscores, not ALL-CAPS.
pub fn is_camel_case(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_lowercase() && !name.contains('_')
}

/// PascalCase: uppercase first letter, no underscores, not ALL-CAPS.
pub fn is_pascal_case(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_uppercase() || name.contains('_') {
        return false;
    }
    // Reject ALL-CAPS identifiers longer than one character.
    !(name.len() > 1 && name.chars().all(|c| !c.is_ascii_lowercase()))
}

/// Generate a camelCase rename suggestion.
pub fn suggest_camel(name: &str) -> String {
    if name.contains('_') {
        let mut out = String::new();
        for (i, seg) in name.split('_').filter(|s| !s.is_empty()).enumerate() {
            if i == 0 {
                out.push_str(&seg.to_ascii_lowercase());
            } else {
                out.push_str(&capitalize(seg));
            }
        }
        return out;
    }
    if name.chars().all(|c| !c.is_ascii_lowercase()) {
        return name.to_ascii_lowercase();
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Generate a PascalCase rename suggestion.
pub fn suggest_pascal(name: &str) -> String {
    if name.contains('_') {
        return name
            .split('_')
            .filter(|s| !s.is_empty())
            .map(capitalize)
            .collect();
    }
    if name.len() > 1 && name.chars().all(|c| !c.is_ascii_lowercase()) {
        return capitalize(&name.to_ascii_lowercase());
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

fn capitalize(seg: &str) -> String {
    let mut chars = seg.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
        None => String::new(),
    }
}

/// Strip the longest configured type prefix, keeping the name intact
/// when stripping would leave it empty.
pub fn strip_type_prefix<'a>(name: &'a str, prefixes: &[String]) -> &'a str {
    let mut best: Option<&str> = None;
    for prefix in prefixes {
        if name.len() > prefix.len() && name.starts_with(prefix.as_str()) {
            let longer = best.map_or(true, |b| prefix.len() > name.len() - b.len());
            if longer {
                best = Some(&name[prefix.len()..]);
            }
        }
    }
    best.unwrap_or(name)
}

/// Variables must be camelCase (after optional type-prefix stripping).
pub fn check_variable_naming(rule: &Rule, doc: &WorkflowDocument) -> Vec<Finding> {
    let allow_prefixes = params::boolean(rule, "allow_type_prefixes", false);
    let prefixes = params::string_list(rule, "type_prefixes", DEFAULT_TYPE_PREFIXES);

    let cases: Vec<(&str, String)> = doc
        .variables
        .iter()
        .map(|v| v.name.as_str())
        .filter(|name| !rule.exceptions.contains(*name))
        .filter(|name| name.chars().count() >= MIN_IDENTIFIER_LEN)
        .filter_map(|name| {
            let candidate = if allow_prefixes {
                strip_type_prefix(name, &prefixes)
            } else {
                name
            };
            if is_camel_case(candidate) {
                None
            } else {
                Some((name, suggest_camel(candidate)))
            }
        })
        .collect();

    let file = doc.path.display().to_string();
    let total = cases.len();
    cases
        .into_iter()
        .map(|(name, suggestion)| {
            Finding::of_rule(
                rule,
                &file,
                format!("variable {name}"),
                format!("variable '{name}' is not camelCase"),
                detail(&[
                    ("identifier", json!(name)),
                    ("suggestion", json!(suggestion)),
                ]),
                total,
            )
        })
        .collect()
}

/// Arguments must carry the direction prefix for their direction and a
/// PascalCase residual.
pub fn check_argument_naming(rule: &Rule, doc: &WorkflowDocument) -> Vec<Finding> {
    let in_prefixes = params::string_list(rule, "in_prefixes", &["in_"]);
    let out_prefixes = params::string_list(rule, "out_prefixes", &["out_"]);
    let inout_prefixes = params::string_list(rule, "inout_prefixes", &["io_"]);

    struct Case<'a> {
        name: &'a str,
        direction: ArgumentDirection,
        suggestion: String,
        reason: &'static str,
    }

    let mut cases: Vec<Case<'_>> = Vec::new();
    for arg in &doc.arguments {
        let name = arg.name.as_str();
        if rule.exceptions.contains(name) || name.chars().count() < MIN_IDENTIFIER_LEN {
            continue;
        }
        let expected = match arg.direction {
            ArgumentDirection::In => &in_prefixes,
            ArgumentDirection::Out => &out_prefixes,
            ArgumentDirection::InOut => &inout_prefixes,
        };
        let fallback_prefix = expected.first().cloned().unwrap_or_default();

        match expected.iter().find(|p| name.starts_with(p.as_str())) {
            None => cases.push(Case {
                name,
                direction: arg.direction,
                suggestion: format!("{fallback_prefix}{}", suggest_pascal(name)),
                reason: "missing direction prefix",
            }),
            Some(prefix) => {
                let residual = &name[prefix.len()..];
                if !is_pascal_case(residual) {
                    cases.push(Case {
                        name,
                        direction: arg.direction,
                        suggestion: format!("{prefix}{}", suggest_pascal(residual)),
                        reason: "residual is not PascalCase",
                    });
                }
            }
        }
    }

    let file = doc.path.display().to_string();
    let total = cases.len();
    cases
        .into_iter()
        .map(|case| {
            Finding::of_rule(
                rule,
                &file,
                format!("argument {}", case.name),
                format!(
                    "argument '{}' ({}) violates the naming convention: {}",
                    case.name,
                    case.direction.name(),
                    case.reason
                ),
                detail(&[
                    ("identifier", json!(case.name)),
                    ("direction", json!(case.direction.name())),
                    ("suggestion", json!(case.suggestion)),
                    ("reason", json!(case.reason)),
                ]),
                total,
            )
        })
        .collect()
}

/// Identifiers matching the forbidden-name set or one of the forbidden
/// patterns. First match wins and records the reason.
pub fn check_generic_names(rule: &Rule, doc: &WorkflowDocument) -> Vec<Finding> {
    let forbidden = params::string_list(rule, "forbidden_names", DEFAULT_FORBIDDEN_NAMES);
    let patterns = params::string_list(rule, "forbidden_patterns", DEFAULT_FORBIDDEN_PATTERNS);

    let compiled: Vec<(String, Regex)> = patterns
        .into_iter()
        .filter_map(|p| match Regex::new(&p) {
            Ok(re) => Some((p, re)),
            Err(e) => {
                tracing::warn!(rule_id = %rule.id, pattern = %p, error = %e, "skipping invalid pattern");
                None
            }
        })
        .collect();

    let identifiers = doc
        .variables
        .iter()
        .map(|v| ("variable", v.name.as_str()))
        .chain(doc.arguments.iter().map(|a| ("argument", a.name.as_str())));

    let mut cases: Vec<(&str, &str, String)> = Vec::new();
    for (slot, name) in identifiers {
        if rule.exceptions.contains(name) {
            continue;
        }
        let lowered = name.to_ascii_lowercase();
        if forbidden.iter().any(|f| f.to_ascii_lowercase() == lowered) {
            cases.push((slot, name, "forbidden name".to_string()));
            continue;
        }
        if let Some((pattern, _)) = compiled.iter().find(|(_, re)| re.is_match(name)) {
            cases.push((slot, name, format!("matches pattern {pattern}")));
        }
    }

    let file = doc.path.display().to_string();
    let total = cases.len();
    cases
        .into_iter()
        .map(|(slot, name, reason)| {
            Finding::of_rule(
                rule,
                &file,
                format!("{slot} {name}"),
                format!("{slot} '{name}' has a generic name ({reason})"),
                detail(&[("identifier", json!(name)), ("reason", json!(reason))]),
                total,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_predicate() {
        assert!(is_camel_case("userName"));
        assert!(is_camel_case("a1"));
        assert!(!is_camel_case("UserName"));
        assert!(!is_camel_case("USERNAME"));
        assert!(!is_camel_case("user_name"));
        assert!(!is_camel_case("_user"));
    }

    #[test]
    fn test_pascal_case_predicate() {
        assert!(is_pascal_case("UserName"));
        assert!(is_pascal_case("A"));
        assert!(!is_pascal_case("userName"));
        assert!(!is_pascal_case("USERNAME"));
        assert!(!is_pascal_case("User_Name"));
    }

    #[test]
    fn test_suggestions() {
        assert_eq!(suggest_camel("UserName"), "userName");
        assert_eq!(suggest_camel("user_name"), "userName");
        assert_eq!(suggest_camel("USERNAME"), "username");
        assert_eq!(suggest_pascal("userName"), "UserName");
        assert_eq!(suggest_pascal("user_name"), "UserName");
        // Mixed case past the first letter is preserved.
        assert_eq!(suggest_pascal("OrderId"), "OrderId");
    }

    #[test]
    fn test_prefix_stripping_keeps_nonempty_residual() {
        let prefixes = vec!["str".to_string(), "dt".to_string()];
        assert_eq!(strip_type_prefix("strName", &prefixes), "Name");
        assert_eq!(strip_type_prefix("dtWhen", &prefixes), "When");
        // Stripping everything would leave nothing; keep the name.
        assert_eq!(strip_type_prefix("str", &prefixes), "str");
        assert_eq!(strip_type_prefix("other", &prefixes), "other");
    }
}
