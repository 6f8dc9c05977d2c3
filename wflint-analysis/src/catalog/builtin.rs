//! The default shipped rule catalog.
//!
//! Parameter defaults here mirror the hardcoded fallbacks in the check
//! routines, so a rule with a damaged parameter behaves exactly like the
//! builtin one.

use std::collections::BTreeMap;

use wflint_core::Severity;

use super::catalog::Catalog;
use super::types::{CatalogDocument, CatalogMetadata, PenaltyMode, Rule, RuleKind, RuleSet};

/// Build the builtin catalog. Infallible by construction; the expect
/// would only fire on a programming error in this module.
pub fn builtin() -> Catalog {
    Catalog::from_document(builtin_document()).expect("builtin catalog is well-formed")
}

fn builtin_document() -> CatalogDocument {
    let mut sets = BTreeMap::new();
    sets.insert(
        "default".to_string(),
        RuleSet {
            display_name: "Default rules".to_string(),
            enabled: true,
            dependencies: [
                ("UiPath.System.Activities", "20.10.1"),
                ("UiPath.UIAutomation.Activities", "20.10.6"),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        },
    );
    sets.insert(
        "strict".to_string(),
        RuleSet {
            display_name: "Strict rules".to_string(),
            enabled: true,
            dependencies: [("UiPath.System.Activities", "21.4.0")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        },
    );

    let rules = vec![
        Rule::new(
            "naming/variable-case",
            "Variable naming",
            RuleKind::VariableNaming,
            Severity::Warning,
            1.0,
        )
        .with_description("Variables should use camelCase")
        .with_penalty_mode(PenaltyMode::Individual)
        .with_bool("allow_type_prefixes", false)
        .with_string_list(
            "type_prefixes",
            &["str", "int", "dbl", "bool", "dt", "arr", "lst", "dict"],
        )
        .with_exceptions(&["Config", "TransactionItem"])
        .in_sets(&["default"]),
        Rule::new(
            "naming/argument-prefix",
            "Argument naming",
            RuleKind::ArgumentNaming,
            Severity::Warning,
            1.0,
        )
        .with_description("Arguments should carry a direction prefix followed by PascalCase")
        .with_penalty_mode(PenaltyMode::Individual)
        .with_string_list("in_prefixes", &["in_"])
        .with_string_list("out_prefixes", &["out_"])
        .with_string_list("inout_prefixes", &["io_"])
        .in_sets(&["default"]),
        Rule::new(
            "naming/generic-names",
            "Generic identifier names",
            RuleKind::GenericNames,
            Severity::Info,
            0.5,
        )
        .with_description("Identifiers should describe their content, not a placeholder")
        .with_penalty_mode(PenaltyMode::Individual)
        .with_string_list(
            "forbidden_names",
            &["test", "temp", "tmp", "var", "data", "value", "item", "foo", "bar"],
        )
        .with_string_list("forbidden_patterns", &[r"\d+$"])
        .in_sets(&["default"]),
        Rule::new(
            "structure/if-nesting",
            "Deeply nested conditions",
            RuleKind::IfNesting,
            Severity::Warning,
            2.0,
        )
        .with_description("If activities should not nest deeper than the configured threshold")
        .with_number("max_depth", 3.0, 1.0, 10.0)
        .in_sets(&["default"]),
        Rule::new(
            "structure/long-sequence",
            "Long sequence",
            RuleKind::LongSequence,
            Severity::Warning,
            2.0,
        )
        .with_description("Sequence workflows should stay below the configured activity count")
        .with_number("max_activities", 20.0, 5.0, 200.0)
        .in_sets(&["default"]),
        Rule::new(
            "structure/modularize",
            "Missing modularization",
            RuleKind::Modularization,
            Severity::Info,
            1.0,
        )
        .with_description("Large workflows should delegate to sub-workflows")
        .with_number("max_activities", 30.0, 10.0, 500.0)
        .in_sets(&["default"]),
        Rule::new(
            "structure/empty-catch",
            "Empty catch block",
            RuleKind::EmptyCatch,
            Severity::Error,
            3.0,
        )
        .with_description("Catch branches must handle the exception, not swallow it")
        .with_penalty_mode(PenaltyMode::Individual)
        .in_sets(&["default", "strict"]),
        Rule::new(
            "reliability/risky-outside-trycatch",
            "Risky activity outside Try/Catch",
            RuleKind::RiskyWithoutTryCatch,
            Severity::Warning,
            2.0,
        )
        .with_description("Failure-prone activities belong inside a TryCatch")
        .with_penalty_mode(PenaltyMode::Individual)
        .with_string_list(
            "risky_activities",
            &["InvokeWorkflowFile", "InvokeCode", "StartProcess", "KillProcess"],
        )
        .in_sets(&["strict"]),
        Rule::new(
            "ui/selector-index",
            "Positional selector index",
            RuleKind::SelectorIndex,
            Severity::Warning,
            2.0,
        )
        .with_description("Selectors should not rely on positional idx attributes")
        .with_penalty_mode(PenaltyMode::Individual)
        .with_string_list("patterns", &[r#"idx\s*=\s*['"]?\d+"#])
        .in_sets(&["default", "strict"]),
        Rule::new(
            "ui/missing-timeout",
            "Missing explicit timeout",
            RuleKind::MissingTimeout,
            Severity::Info,
            0.5,
        )
        .with_description("UI activities should declare an explicit timeout")
        .with_penalty_mode(PenaltyMode::Individual)
        .with_string_list(
            "activities",
            &["Click", "TypeInto", "GetText", "ElementExists"],
        )
        .in_sets(&["strict"]),
        Rule::new(
            "logging/log-ratio",
            "Insufficient logging",
            RuleKind::LoggingRatio,
            Severity::Warning,
            1.0,
        )
        .with_description("Workflows should log at least once per N activities")
        .with_number("max_ratio", 10.0, 1.0, 100.0)
        .in_sets(&["default"]),
        Rule::new(
            "hygiene/commented-code",
            "Commented-out code",
            RuleKind::CommentedCode,
            Severity::Info,
            0.5,
        )
        .with_description("Disabled activities should be removed before publishing")
        .with_number("max_percent", 10.0, 0.0, 100.0)
        .in_sets(&["default"]),
        Rule::new(
            "project/dependencies",
            "Outdated or missing dependencies",
            RuleKind::ProjectDependencies,
            Severity::Error,
            3.0,
        )
        .with_description("Declared packages must satisfy the rule sets' minimum versions")
        .with_penalty_mode(PenaltyMode::Individual)
        .in_sets(&["default", "strict"]),
        Rule::new(
            "project/naming",
            "Project naming",
            RuleKind::ProjectNaming,
            Severity::Warning,
            1.0,
        )
        .with_description("The project name must match one of the configured patterns")
        .with_string_list("patterns", &[r"^[A-Z][A-Za-z0-9]*([._-][A-Za-z0-9]+)*$"])
        .with_string_list("required_segments", &[])
        .in_sets(&["default"]),
    ];

    CatalogDocument {
        metadata: CatalogMetadata {
            name: "wflint builtin".to_string(),
            version: "1".to_string(),
            description: "Default workflow best-practice rules".to_string(),
        },
        sets,
        rules,
    }
}
