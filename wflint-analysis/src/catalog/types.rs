//! Rule and rule-set types for the catalog document.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use wflint_core::Severity;

/// Closed discriminator that drives dispatch in the rule engine.
/// Exactly one check routine exists per variant; unknown or legacy
/// discriminators in a document map to [`RuleKind::Unimplemented`]
/// instead of being silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    VariableNaming,
    ArgumentNaming,
    GenericNames,
    IfNesting,
    LongSequence,
    Modularization,
    LoggingRatio,
    CommentedCode,
    EmptyCatch,
    RiskyWithoutTryCatch,
    SelectorIndex,
    MissingTimeout,
    ProjectDependencies,
    ProjectNaming,
    #[serde(other)]
    Unimplemented,
}

/// Whether a rule's score impact is fixed per violation type or
/// multiplied by occurrence count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyMode {
    #[default]
    Total,
    Individual,
}

/// Closed set of parameter value types, validated at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParameterValue {
    Number { value: f64, min: f64, max: f64 },
    Bool { value: bool },
    StringList { value: Vec<String> },
}

impl ParameterValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Number { .. } => "number",
            Self::Bool { .. } => "bool",
            Self::StringList { .. } => "string_list",
        }
    }
}

/// One named rule parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(flatten)]
    pub value: ParameterValue,
    #[serde(default)]
    pub description: String,
}

/// One configurable best-practice rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub severity: Severity,
    /// Base penalty; always non-negative (validated on load).
    pub penalty: f64,
    pub enabled: bool,
    #[serde(rename = "rule_type")]
    pub kind: RuleKind,
    #[serde(default)]
    pub penalty_mode: PenaltyMode,
    #[serde(default)]
    pub parameters: BTreeMap<String, Parameter>,
    /// Identifiers this rule never flags, checked before any pattern logic.
    #[serde(default)]
    pub exceptions: BTreeSet<String>,
    /// Rule-set memberships.
    #[serde(default)]
    pub sets: BTreeSet<String>,
}

impl Rule {
    /// Minimal rule with everything else defaulted; used by the builtin
    /// catalog and by tests.
    pub fn new(id: &str, name: &str, kind: RuleKind, severity: Severity, penalty: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            category: id.split('/').next().unwrap_or("general").to_string(),
            severity,
            penalty,
            enabled: true,
            kind,
            penalty_mode: PenaltyMode::Total,
            parameters: BTreeMap::new(),
            exceptions: BTreeSet::new(),
            sets: BTreeSet::new(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_penalty_mode(mut self, mode: PenaltyMode) -> Self {
        self.penalty_mode = mode;
        self
    }

    pub fn with_number(mut self, name: &str, value: f64, min: f64, max: f64) -> Self {
        self.parameters.insert(
            name.to_string(),
            Parameter {
                value: ParameterValue::Number { value, min, max },
                description: String::new(),
            },
        );
        self
    }

    pub fn with_bool(mut self, name: &str, value: bool) -> Self {
        self.parameters.insert(
            name.to_string(),
            Parameter {
                value: ParameterValue::Bool { value },
                description: String::new(),
            },
        );
        self
    }

    pub fn with_string_list(mut self, name: &str, values: &[&str]) -> Self {
        self.parameters.insert(
            name.to_string(),
            Parameter {
                value: ParameterValue::StringList {
                    value: values.iter().map(|s| s.to_string()).collect(),
                },
                description: String::new(),
            },
        );
        self
    }

    pub fn with_exceptions(mut self, names: &[&str]) -> Self {
        self.exceptions = names.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn in_sets(mut self, sets: &[&str]) -> Self {
        self.sets = sets.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// A named, independently toggleable group of rules with dependency
/// requirements a project is expected to declare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub display_name: String,
    pub enabled: bool,
    /// package name → minimum required version.
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
}

/// Global catalog metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CatalogMetadata {
    pub name: String,
    pub version: String,
    pub description: String,
}

/// The full catalog document as serialized to/from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub metadata: CatalogMetadata,
    #[serde(default)]
    pub sets: BTreeMap<String, RuleSet>,
    pub rules: Vec<Rule>,
}
