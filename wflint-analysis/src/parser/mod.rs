//! Workflow document parser.
//!
//! Turns one XAML workflow file into a [`WorkflowDocument`] in a single
//! pass over the XML tree: variables, arguments, activities (with
//! containment chains and If nesting depths), try/catch heuristics, log
//! messages, and commented-code detection.

pub mod comments;
pub mod model;
pub mod xml_tree;

use std::path::Path;

use smallvec::SmallVec;
use wflint_core::constants::MAX_IF_ANCESTOR_WALK;
use wflint_core::{FxHashMap, FxHashSet, ParseError};

pub use model::{
    Activity, Argument, ArgumentDirection, CommentedCodeSummary, IfActivity, LogMessage,
    TryCatchBlock, Variable, WorkflowDocument, WorkflowKind,
};
use xml_tree::{NodeId, XmlTree};

/// Tags whose subtree is structurally disabled ("commented out").
const DISABLED_CONTAINER_TAGS: &[&str] = &["CommentOut"];

/// Parse a workflow file from disk.
pub fn parse_file(path: &Path) -> Result<WorkflowDocument, ParseError> {
    let source = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_source(&source, path)
}

/// Parse a workflow document from in-memory source.
pub fn parse_source(source: &str, path: &Path) -> Result<WorkflowDocument, ParseError> {
    let tree = XmlTree::parse(source).map_err(|message| ParseError::Malformed {
        path: path.to_path_buf(),
        message,
    })?;

    let (kind, container) = detect_kind(&tree);
    let disabled = disabled_node_set(&tree);

    let mut doc = WorkflowDocument {
        path: path.to_path_buf(),
        kind,
        display_name: String::new(),
        annotation: String::new(),
        variables: Vec::new(),
        arguments: Vec::new(),
        activities: Vec::new(),
        ifs: Vec::new(),
        try_catches: Vec::new(),
        logs: Vec::new(),
        comments: CommentedCodeSummary::default(),
        kind_counts: FxHashMap::default(),
        line_count: source.lines().count(),
    };

    if let Some(id) = container {
        let node = tree.node(id);
        doc.display_name = node.attr("DisplayName").unwrap_or_default().to_string();
        doc.annotation = node
            .attr("Annotation.AnnotationText")
            .unwrap_or_default()
            .to_string();
    }

    let mut positions: FxHashMap<Option<NodeId>, usize> = FxHashMap::default();

    for (id, node) in tree.iter() {
        match node.tag.as_str() {
            "Variable" => {
                if let Some(name) = node.attr("Name") {
                    doc.variables.push(Variable {
                        name: name.to_string(),
                        var_type: node.attr("TypeArguments").unwrap_or_default().to_string(),
                        default: node.attr("Default").map(str::to_string),
                    });
                }
            }
            "Property" if parent_tag(&tree, id) == Some("Members") => {
                if let Some(name) = node.attr("Name") {
                    let decl = node.attr("Type").unwrap_or_default();
                    doc.arguments.push(Argument {
                        name: name.to_string(),
                        arg_type: decl.to_string(),
                        direction: ArgumentDirection::from_type_decl(decl),
                        description: node
                            .attr("Annotation.AnnotationText")
                            .unwrap_or_default()
                            .to_string(),
                    });
                }
            }
            _ => {}
        }

        if node.has_display_name() {
            let display_name = node.attr("DisplayName").unwrap_or_default().to_string();
            let ancestor_kinds = activity_ancestor_kinds(&tree, id);

            // Zero-based index among display-named siblings of the same container.
            let container = nearest_activity_ancestor(&tree, id);
            let slot = positions.entry(container).or_insert(0);
            let position = *slot;
            *slot += 1;

            doc.activities.push(Activity {
                kind: node.tag.clone(),
                display_name: display_name.clone(),
                ancestor_kinds,
                properties: node.attrs.iter().cloned().collect(),
                position,
            });
            *doc.kind_counts.entry(node.tag.clone()).or_insert(0) += 1;

            match node.tag.as_str() {
                "If" => doc.ifs.push(IfActivity {
                    display_name,
                    condition: node.attr("Condition").unwrap_or_default().to_string(),
                    depth: if_nesting_depth(&tree, id),
                }),
                "TryCatch" => doc.try_catches.push(build_try_catch(&tree, id)),
                "LogMessage" if !disabled.contains(&id) => doc.logs.push(LogMessage {
                    display_name,
                    level: node.attr("Level").map(str::to_string),
                    message: node.attr("Message").map(str::to_string),
                }),
                _ => {}
            }
        }
    }

    doc.comments = commented_code_summary(&tree, source);

    Ok(doc)
}

/// Detect the workflow kind from the first known root-container tag,
/// StateMachine > Sequence > Flowchart priority, first match wins.
fn detect_kind(tree: &XmlTree) -> (WorkflowKind, Option<NodeId>) {
    for (wanted, kind) in [
        ("StateMachine", WorkflowKind::StateMachine),
        ("Sequence", WorkflowKind::Sequence),
        ("Flowchart", WorkflowKind::Flowchart),
    ] {
        if let Some((id, _)) = tree.iter().find(|(_, n)| n.tag == wanted) {
            return (kind, Some(id));
        }
    }
    (WorkflowKind::Unknown, None)
}

/// Ids of all nodes transitively inside a disabled container. Log
/// harvesting must skip these; counting them as live coverage would
/// double-count disabled code.
fn disabled_node_set(tree: &XmlTree) -> FxHashSet<NodeId> {
    let mut disabled = FxHashSet::default();
    for (id, node) in tree.iter() {
        if DISABLED_CONTAINER_TAGS.contains(&node.tag.as_str()) {
            disabled.extend(tree.descendants(id));
        }
    }
    disabled
}

fn parent_tag(tree: &XmlTree, id: NodeId) -> Option<&str> {
    tree.node(id)
        .parent
        .map(|p| tree.node(p).tag.as_str())
}

/// Kinds of enclosing display-named activities, nearest first.
fn activity_ancestor_kinds(tree: &XmlTree, id: NodeId) -> SmallVec<[String; 4]> {
    tree.ancestors(id)
        .filter(|&a| tree.node(a).has_display_name())
        .map(|a| tree.node(a).tag.clone())
        .collect()
}

fn nearest_activity_ancestor(tree: &XmlTree, id: NodeId) -> Option<NodeId> {
    tree.ancestors(id).find(|&a| tree.node(a).has_display_name())
}

/// Count enclosing `If` ancestors, capped so malformed trees cannot
/// stall the parse.
fn if_nesting_depth(tree: &XmlTree, id: NodeId) -> usize {
    tree.ancestors(id)
        .take(MAX_IF_ANCESTOR_WALK)
        .filter(|&a| tree.node(a).tag == "If")
        .count()
}

fn build_try_catch(tree: &XmlTree, id: NodeId) -> TryCatchBlock {
    use wflint_core::constants::EMPTY_BRANCH_MAX_NODES;

    let node = tree.node(id);
    let mut has_catch = false;
    let mut catch_empty = true;
    let mut has_finally = false;

    for &child in &node.children {
        match tree.node(child).tag.as_str() {
            "TryCatch.Catches" => {
                for &branch in &tree.node(child).children {
                    if tree.node(branch).tag == "Catch" {
                        has_catch = true;
                        if tree.descendant_count(branch) > EMPTY_BRANCH_MAX_NODES {
                            catch_empty = false;
                        }
                    }
                }
            }
            "TryCatch.Finally" => {
                has_finally = !tree.node(child).children.is_empty();
            }
            _ => {}
        }
    }

    TryCatchBlock {
        display_name: node.attr("DisplayName").unwrap_or_default().to_string(),
        has_catch,
        catch_empty: has_catch && catch_empty,
        has_finally,
    }
}

/// Combine the raw-text comment scan with disabled-container spans.
fn commented_code_summary(tree: &XmlTree, source: &str) -> CommentedCodeSummary {
    let raw = comments::scan_xml_comments(source);
    let mut summary = CommentedCodeSummary {
        comment_blocks: raw.blocks,
        comment_lines: raw.lines,
        samples: raw.samples,
        ..Default::default()
    };

    let mut search_from = 0;
    for (id, node) in tree.iter() {
        if !DISABLED_CONTAINER_TAGS.contains(&node.tag.as_str()) {
            continue;
        }
        let contained = tree
            .descendants(id)
            .into_iter()
            .filter(|&d| tree.node(d).has_display_name())
            .count();

        let span = comments::locate_disabled_span(
            source,
            &node.tag,
            node.attr("DisplayName").unwrap_or_default(),
            contained,
            search_from,
        );
        summary.disabled_blocks += 1;
        summary.disabled_lines += span.lines;
        summary.commented_activities += contained;
        search_from = span.resume_at;
    }

    summary.has_commented_activities = summary.disabled_blocks > 0;
    summary
}
