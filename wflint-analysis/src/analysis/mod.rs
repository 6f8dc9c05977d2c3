//! Project analysis orchestrator.
//!
//! Enumerates workflow files, parses each one, evaluates the active
//! rules, runs the project-level checks once, and folds everything into
//! statistics and a score. Synchronous, one file at a time, with a
//! progress callback between files and cooperative cancellation.

pub mod cancellation;
pub mod score;
pub mod stats;
pub mod walker;

use std::collections::BTreeSet;
use std::path::Path;

use serde::Serialize;
use wflint_core::{ScanConfig, ScoreConfig};

use crate::catalog::Catalog;
use crate::engine::{Finding, RuleEngine};
use crate::metadata::{self, ProjectMetadata};
use crate::parser::{self, WorkflowDocument};

pub use cancellation::ScanCancellation;
pub use score::{Grade, PenaltyBreakdown, Score};
pub use stats::Statistics;

/// The complete result of one project scan. Consumed read-only by
/// downstream renderers; the core never persists or transmits it.
#[derive(Debug, Serialize)]
pub struct AnalysisResult {
    pub success: bool,
    pub error: Option<String>,
    pub project: Option<ProjectMetadata>,
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub statistics: Statistics,
    pub score: Score,
    pub findings: Vec<Finding>,
    pub documents: Vec<WorkflowDocument>,
    pub cancelled: bool,
}

impl AnalysisResult {
    fn failure(message: String) -> Self {
        Self {
            success: false,
            error: Some(message),
            project: None,
            files_scanned: 0,
            files_skipped: 0,
            statistics: Statistics::default(),
            score: score::compute(&Statistics::default(), &ScoreConfig::default()),
            findings: Vec::new(),
            documents: Vec::new(),
            cancelled: false,
        }
    }
}

/// Scans a project tree against a borrowed catalog.
pub struct ProjectAnalyzer<'a> {
    catalog: &'a Catalog,
    scan_config: ScanConfig,
    score_config: ScoreConfig,
    cancellation: ScanCancellation,
}

impl<'a> ProjectAnalyzer<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            scan_config: ScanConfig::default(),
            score_config: ScoreConfig::default(),
            cancellation: ScanCancellation::new(),
        }
    }

    pub fn with_scan_config(mut self, config: ScanConfig) -> Self {
        self.scan_config = config;
        self
    }

    pub fn with_score_config(mut self, config: ScoreConfig) -> Self {
        self.score_config = config;
        self
    }

    /// Handle for external cancellation.
    pub fn cancellation(&self) -> &ScanCancellation {
        &self.cancellation
    }

    /// Scan all workflow files under `root` with the rules active for
    /// `rule_selection`, invoking `progress(file_name, percent)` once
    /// per file.
    pub fn scan(
        &self,
        root: &Path,
        rule_selection: Option<&BTreeSet<String>>,
        mut progress: impl FnMut(&str, f64),
    ) -> AnalysisResult {
        self.cancellation.reset();

        let rules = self.catalog.active_rules(rule_selection);
        let files = match walker::walk_workflows(root, &self.scan_config) {
            Ok(files) => files,
            Err(e) => return AnalysisResult::failure(e.to_string()),
        };

        let engine = RuleEngine::new();
        let total = files.len();
        let mut statistics = Statistics::default();
        let mut findings: Vec<Finding> = Vec::new();
        let mut documents: Vec<WorkflowDocument> = Vec::new();
        let mut cancelled = false;

        for (index, path) in files.iter().enumerate() {
            if self.cancellation.is_cancelled() {
                cancelled = true;
                break;
            }

            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            match parser::parse_file(path) {
                Ok(document) => {
                    findings.extend(engine.evaluate(&document, &rules));
                    statistics.record_document(&document);
                    documents.push(document);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping workflow file");
                    statistics.files_skipped += 1;
                }
            }

            progress(&file_name, (index + 1) as f64 / total as f64 * 100.0);
        }

        // Project-level checks run once, after per-file evaluation.
        let project = metadata::load(root);
        if let Some(project) = &project {
            let required = self.catalog.merged_dependencies(rule_selection);
            findings.extend(engine.evaluate_project(project, &rules, &required));
        }

        statistics.record_findings(&findings);
        let score = score::compute(&statistics, &self.score_config);

        AnalysisResult {
            success: true,
            error: None,
            project,
            files_scanned: statistics.files_parsed,
            files_skipped: statistics.files_skipped,
            statistics,
            score,
            findings,
            documents,
            cancelled,
        }
    }
}
