//! Shared constants for parsing heuristics and scoring.

/// Upper bound on the ancestor walk when computing If nesting depth.
/// Guards against pathological or malformed trees.
pub const MAX_IF_ANCESTOR_WALK: usize = 64;

/// A Catch branch with at most this many descendant nodes is considered
/// empty (the structural skeleton of an empty branch).
pub const EMPTY_BRANCH_MAX_NODES: usize = 3;

/// Estimated line span per activity inside a disabled container, used
/// when the block cannot be re-located in the raw text.
pub const ESTIMATED_LINES_PER_DISABLED_ACTIVITY: usize = 4;

/// Maximum number of raw comment samples kept per document.
pub const COMMENT_SAMPLE_LIMIT: usize = 5;

/// Maximum length of a single kept comment sample, in characters.
pub const COMMENT_SAMPLE_MAX_CHARS: usize = 120;

/// Maximum number of representative offenders reported by the
/// nesting-depth rule.
pub const NESTING_REPORT_LIMIT: usize = 5;

/// Projects with fewer activities than this use the flat small-project
/// penalty instead of per-activity normalization.
pub const SMALL_PROJECT_ACTIVITY_FLOOR: usize = 10;

/// Flat penalty factor applied to small projects.
pub const SMALL_PROJECT_PENALTY_FACTOR: f64 = 0.5;

/// Identifiers shorter than this are skipped by naming rules.
pub const MIN_IDENTIFIER_LEN: usize = 2;
