//! Semantic model of one workflow document.
//!
//! Built once per file by the parser and immutable afterwards; owned by
//! the project analysis for the duration of a scan.

use std::path::PathBuf;

use serde::Serialize;
use smallvec::SmallVec;
use wflint_core::FxHashMap;

/// Declared workflow kind, detected from the root container tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowKind {
    Sequence,
    StateMachine,
    Flowchart,
    #[default]
    Unknown,
}

impl WorkflowKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sequence => "sequence",
            Self::StateMachine => "statemachine",
            Self::Flowchart => "flowchart",
            Self::Unknown => "unknown",
        }
    }
}

/// A declared workflow variable.
#[derive(Debug, Clone, Serialize)]
pub struct Variable {
    pub name: String,
    pub var_type: String,
    pub default: Option<String>,
}

/// Direction of a workflow argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentDirection {
    In,
    Out,
    InOut,
}

impl ArgumentDirection {
    pub fn name(&self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::InOut => "inout",
        }
    }

    /// Parse from an argument type declaration such as
    /// `InArgument(x:String)`. Plain types default to `In`.
    pub fn from_type_decl(decl: &str) -> Self {
        if decl.starts_with("InOutArgument") {
            Self::InOut
        } else if decl.starts_with("OutArgument") {
            Self::Out
        } else {
            Self::In
        }
    }
}

/// A declared workflow argument.
#[derive(Debug, Clone, Serialize)]
pub struct Argument {
    pub name: String,
    pub arg_type: String,
    pub direction: ArgumentDirection,
    pub description: String,
}

/// One concrete activity node (any display-named node).
#[derive(Debug, Clone, Serialize)]
pub struct Activity {
    /// Activity kind: the local tag name, e.g. `Click`, `InvokeWorkflowFile`.
    pub kind: String,
    pub display_name: String,
    /// Kinds of enclosing activities, nearest first. Recorded at parse
    /// time so containment rules never re-walk the tree.
    pub ancestor_kinds: SmallVec<[String; 4]>,
    /// Raw attribute bag (selector, timeout, ... checks read this).
    pub properties: FxHashMap<String, String>,
    /// Zero-based position among sibling activities in the same container.
    pub position: usize,
}

impl Activity {
    /// Kind of the nearest enclosing activity, if any.
    pub fn parent_kind(&self) -> Option<&str> {
        self.ancestor_kinds.first().map(String::as_str)
    }

    /// Whether any enclosing activity has the given kind.
    pub fn has_ancestor(&self, kind: &str) -> bool {
        self.ancestor_kinds.iter().any(|k| k == kind)
    }

    /// Case-insensitive property lookup.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// An `If` node with its parse-time nesting depth.
#[derive(Debug, Clone, Serialize)]
pub struct IfActivity {
    pub display_name: String,
    pub condition: String,
    /// Count of enclosing `If` ancestors, computed during parsing.
    pub depth: usize,
}

/// A `TryCatch` block with branch heuristics.
#[derive(Debug, Clone, Serialize)]
pub struct TryCatchBlock {
    pub display_name: String,
    pub has_catch: bool,
    /// All catch branches are at or below the empty-branch skeleton size.
    pub catch_empty: bool,
    pub has_finally: bool,
}

/// A live log-message activity (disabled blocks excluded).
#[derive(Debug, Clone, Serialize)]
pub struct LogMessage {
    pub display_name: String,
    pub level: Option<String>,
    pub message: Option<String>,
}

/// Commented-out code detected from raw XML comments plus structurally
/// disabled activity containers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommentedCodeSummary {
    /// Literal `<!-- -->` blocks found in the raw text.
    pub comment_blocks: usize,
    /// Total line span of those blocks.
    pub comment_lines: usize,
    /// Disabled activity containers.
    pub disabled_blocks: usize,
    /// Total line span of disabled containers (re-located or estimated).
    pub disabled_lines: usize,
    /// Activities transitively inside disabled containers.
    pub commented_activities: usize,
    /// A small sample of raw comment text.
    pub samples: Vec<String>,
    pub has_commented_activities: bool,
}

impl CommentedCodeSummary {
    /// Combined commented-line total from both signals.
    pub fn commented_lines(&self) -> usize {
        self.comment_lines + self.disabled_lines
    }
}

/// The parsed semantic model of one workflow file.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowDocument {
    pub path: PathBuf,
    pub kind: WorkflowKind,
    pub display_name: String,
    pub annotation: String,
    pub variables: Vec<Variable>,
    pub arguments: Vec<Argument>,
    pub activities: Vec<Activity>,
    pub ifs: Vec<IfActivity>,
    pub try_catches: Vec<TryCatchBlock>,
    pub logs: Vec<LogMessage>,
    pub comments: CommentedCodeSummary,
    /// Frequency of each activity kind, for cheap lookups.
    pub kind_counts: FxHashMap<String, usize>,
    pub line_count: usize,
}

impl WorkflowDocument {
    pub fn activity_count(&self) -> usize {
        self.activities.len()
    }

    pub fn log_count(&self) -> usize {
        self.logs.len()
    }

    /// How many activities of the given kind the document contains.
    pub fn kind_count(&self, kind: &str) -> usize {
        self.kind_counts.get(kind).copied().unwrap_or(0)
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
