//! Aggregate statistics over a scan.

use std::collections::BTreeMap;

use serde::Serialize;
use wflint_core::Severity;

use crate::engine::Finding;
use crate::parser::WorkflowDocument;

/// Counts by severity and category plus aggregate totals across all
/// parsed documents.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Statistics {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub by_category: BTreeMap<String, usize>,
    pub total_activities: usize,
    pub total_variables: usize,
    pub total_arguments: usize,
    pub total_try_catches: usize,
    pub total_logs: usize,
    pub total_commented_lines: usize,
    pub files_parsed: usize,
    pub files_skipped: usize,
}

impl Statistics {
    /// Fold one parsed document into the totals.
    pub fn record_document(&mut self, doc: &WorkflowDocument) {
        self.files_parsed += 1;
        self.total_activities += doc.activity_count();
        self.total_variables += doc.variables.len();
        self.total_arguments += doc.arguments.len();
        self.total_try_catches += doc.try_catches.len();
        self.total_logs += doc.log_count();
        self.total_commented_lines += doc.comments.commented_lines();
    }

    /// Fold findings into severity and category counts.
    pub fn record_findings(&mut self, findings: &[Finding]) {
        for finding in findings {
            match finding.severity {
                Severity::Error => self.errors += 1,
                Severity::Warning => self.warnings += 1,
                Severity::Info => self.infos += 1,
            }
            *self.by_category.entry(finding.category.clone()).or_insert(0) += 1;
        }
    }
}
