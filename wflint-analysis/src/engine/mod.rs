//! Rule evaluation engine.
//!
//! Dispatches each rule to exactly one check routine by its closed
//! `RuleKind` discriminator, so a violation is never penalized twice
//! under two code paths. Disabled rules produce nothing.

pub mod containment;
pub mod logging;
pub mod naming;
pub mod params;
pub mod project;
pub mod structure;
pub mod types;
pub mod versions;

use std::collections::BTreeMap;

use crate::catalog::{Rule, RuleKind};
use crate::metadata::ProjectMetadata;
use crate::parser::WorkflowDocument;

pub use types::{Finding, PenaltyAudit};

/// Stateless evaluator over a parsed document (or project metadata)
/// and a list of active rules.
#[derive(Debug, Default)]
pub struct RuleEngine;

impl RuleEngine {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate all document-scoped rules against one workflow.
    pub fn evaluate(&self, document: &WorkflowDocument, rules: &[Rule]) -> Vec<Finding> {
        let mut findings = Vec::new();
        for rule in rules.iter().filter(|r| r.enabled) {
            findings.extend(self.dispatch_document(rule, document));
        }
        findings
    }

    /// Evaluate the project-scoped rules once per scan. `required` is
    /// the merged dependency requirement map of the selected rule sets.
    pub fn evaluate_project(
        &self,
        project: &ProjectMetadata,
        rules: &[Rule],
        required: &BTreeMap<String, String>,
    ) -> Vec<Finding> {
        let mut findings = Vec::new();
        for rule in rules.iter().filter(|r| r.enabled) {
            match rule.kind {
                RuleKind::ProjectDependencies => {
                    findings.extend(project::check_dependencies(rule, project, required));
                }
                RuleKind::ProjectNaming => {
                    findings.extend(project::check_project_naming(rule, project));
                }
                _ => {}
            }
        }
        findings
    }

    fn dispatch_document(&self, rule: &Rule, doc: &WorkflowDocument) -> Vec<Finding> {
        match rule.kind {
            RuleKind::VariableNaming => naming::check_variable_naming(rule, doc),
            RuleKind::ArgumentNaming => naming::check_argument_naming(rule, doc),
            RuleKind::GenericNames => naming::check_generic_names(rule, doc),
            RuleKind::IfNesting => structure::check_if_nesting(rule, doc),
            RuleKind::LongSequence => structure::check_long_sequence(rule, doc),
            RuleKind::Modularization => structure::check_modularization(rule, doc),
            RuleKind::EmptyCatch => structure::check_empty_catch(rule, doc),
            RuleKind::LoggingRatio => logging::check_logging_ratio(rule, doc),
            RuleKind::CommentedCode => logging::check_commented_code(rule, doc),
            RuleKind::RiskyWithoutTryCatch => containment::check_risky_without_trycatch(rule, doc),
            RuleKind::SelectorIndex => containment::check_selector_index(rule, doc),
            RuleKind::MissingTimeout => containment::check_missing_timeout(rule, doc),
            // Project-scoped rules run once per scan, not per document.
            RuleKind::ProjectDependencies | RuleKind::ProjectNaming => Vec::new(),
            RuleKind::Unimplemented => {
                tracing::debug!(rule_id = %rule.id, "skipping rule with unimplemented type");
                Vec::new()
            }
        }
    }
}
