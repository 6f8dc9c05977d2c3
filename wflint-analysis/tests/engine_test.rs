//! Rule engine integration tests.
//!
//! Documents are built directly rather than parsed, so each check is
//! exercised against exactly the shape it dispatches on: thresholds at
//! and past the boundary, exception lists, penalty modes, and the
//! project-level checks.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde_json::json;
use wflint_analysis::catalog::{builtin, PenaltyMode, Rule, RuleKind};
use wflint_analysis::engine::{PenaltyAudit, RuleEngine};
use wflint_analysis::metadata::ProjectMetadata;
use wflint_analysis::parser::{
    Activity, Argument, ArgumentDirection, CommentedCodeSummary, IfActivity, LogMessage,
    TryCatchBlock, Variable, WorkflowDocument, WorkflowKind,
};
use wflint_core::{FxHashMap, Severity};

fn doc(kind: WorkflowKind) -> WorkflowDocument {
    WorkflowDocument {
        path: PathBuf::from("Main.xaml"),
        kind,
        display_name: "Main".to_string(),
        annotation: String::new(),
        variables: Vec::new(),
        arguments: Vec::new(),
        activities: Vec::new(),
        ifs: Vec::new(),
        try_catches: Vec::new(),
        logs: Vec::new(),
        comments: CommentedCodeSummary::default(),
        kind_counts: FxHashMap::default(),
        line_count: 100,
    }
}

fn activity(kind: &str, name: &str, ancestors: &[&str]) -> Activity {
    Activity {
        kind: kind.to_string(),
        display_name: name.to_string(),
        ancestor_kinds: ancestors.iter().map(|s| s.to_string()).collect(),
        properties: FxHashMap::default(),
        position: 0,
    }
}

fn variable(name: &str) -> Variable {
    Variable {
        name: name.to_string(),
        var_type: "x:String".to_string(),
        default: None,
    }
}

fn argument(name: &str, direction: ArgumentDirection) -> Argument {
    Argument {
        name: name.to_string(),
        arg_type: "InArgument(x:String)".to_string(),
        direction,
        description: String::new(),
    }
}

fn fill_activities(doc: &mut WorkflowDocument, count: usize) {
    for i in 0..count {
        doc.activities.push(activity("Assign", &format!("Assign {i}"), &["Sequence"]));
    }
}

fn rule_from_builtin(id: &str) -> Rule {
    builtin().rule(id).cloned().expect("builtin rule exists")
}

fn evaluate(doc: &WorkflowDocument, rule: Rule) -> Vec<wflint_analysis::engine::Finding> {
    RuleEngine::new().evaluate(doc, &[rule])
}

// ---- Variable naming ----

#[test]
fn variable_naming_skips_exceptions_and_short_names() {
    let mut d = doc(WorkflowKind::Sequence);
    d.variables = vec![
        variable("Config"),
        variable("TransactionItem"),
        variable("userName"),
        variable("UserName"),
        variable("x"),
    ];

    let findings = evaluate(&d, rule_from_builtin("naming/variable-case"));
    assert_eq!(findings.len(), 1);
    let f = &findings[0];
    assert_eq!(f.rule_id, "naming/variable-case");
    assert_eq!(f.detail["identifier"], json!("UserName"));
    assert_eq!(f.detail["suggestion"], json!("userName"));
    assert_eq!(f.penalty.cases_found, 1);
    // Individual mode: one case, one base penalty.
    assert_eq!(f.penalty.actual_penalty, f.penalty.base_penalty);
}

#[test]
fn variable_naming_can_strip_type_prefixes() {
    let rule = Rule::new(
        "naming/variable-case",
        "Variable naming",
        RuleKind::VariableNaming,
        Severity::Warning,
        1.0,
    )
    .with_bool("allow_type_prefixes", true)
    .with_string_list("type_prefixes", &["str", "dt"]);

    let mut d = doc(WorkflowKind::Sequence);
    d.variables = vec![variable("strName"), variable("strname"), variable("dtWhen")];

    let findings = evaluate(&d, rule);
    // strName and dtWhen leave a PascalCase residual; strname is fine.
    assert_eq!(findings.len(), 2);
    assert_eq!(findings[0].penalty.cases_found, 2);
}

// ---- Argument naming ----

#[test]
fn argument_naming_reports_prefix_and_residual_violations() {
    let mut d = doc(WorkflowKind::Sequence);
    d.arguments = vec![
        argument("in_OrderId", ArgumentDirection::In),
        argument("OrderId", ArgumentDirection::In),
        argument("in_orderId", ArgumentDirection::In),
        argument("out_Result", ArgumentDirection::Out),
        argument("io_Cart", ArgumentDirection::InOut),
    ];

    let findings = evaluate(&d, rule_from_builtin("naming/argument-prefix"));
    assert_eq!(findings.len(), 2);

    let by_id = |name: &str| {
        findings
            .iter()
            .find(|f| f.detail["identifier"] == json!(name))
            .unwrap()
    };
    assert_eq!(by_id("OrderId").detail["reason"], json!("missing direction prefix"));
    assert_eq!(by_id("OrderId").detail["suggestion"], json!("in_OrderId"));
    assert_eq!(
        by_id("in_orderId").detail["reason"],
        json!("residual is not PascalCase")
    );

    // Both findings share the rule's total case count.
    assert!(findings.iter().all(|f| f.penalty.cases_found == 2));
}

// ---- Generic names ----

#[test]
fn generic_names_flag_forbidden_words_and_patterns() {
    let rule = rule_from_builtin("naming/generic-names");

    let mut d = doc(WorkflowKind::Sequence);
    d.variables = vec![variable("temp"), variable("orderTotal"), variable("result2")];
    d.arguments = vec![argument("in_Data", ArgumentDirection::In)];

    let findings = evaluate(&d, rule);
    assert_eq!(findings.len(), 2);
    assert_eq!(findings[0].detail["identifier"], json!("temp"));
    assert_eq!(findings[0].detail["reason"], json!("forbidden name"));
    assert_eq!(findings[1].detail["identifier"], json!("result2"));
    assert!(findings[1].detail["reason"]
        .as_str()
        .unwrap()
        .starts_with("matches pattern"));
}

#[test]
fn generic_names_respect_exceptions() {
    let rule = rule_from_builtin("naming/generic-names").with_exceptions(&["temp"]);
    let mut d = doc(WorkflowKind::Sequence);
    d.variables = vec![variable("temp")];
    assert!(evaluate(&d, rule).is_empty());
}

// ---- If nesting ----

#[test]
fn if_nesting_reports_one_finding_past_the_threshold() {
    let mut d = doc(WorkflowKind::Sequence);
    d.ifs = (0..5)
        .map(|depth| IfActivity {
            display_name: format!("If {depth}"),
            condition: String::new(),
            depth,
        })
        .collect();

    // Default threshold is 3; max depth found is 4.
    let findings = evaluate(&d, rule_from_builtin("structure/if-nesting"));
    assert_eq!(findings.len(), 1);
    let f = &findings[0];
    assert_eq!(f.detail["max_nesting_found"], json!(4));
    assert_eq!(f.detail["threshold"], json!(3));
    assert_eq!(f.detail["offenders"].as_array().unwrap().len(), 1);
    assert_eq!(f.penalty.cases_found, 1);
}

#[test]
fn if_nesting_at_the_threshold_is_silent() {
    let mut d = doc(WorkflowKind::Sequence);
    d.ifs = (0..4)
        .map(|depth| IfActivity {
            display_name: format!("If {depth}"),
            condition: String::new(),
            depth,
        })
        .collect();
    assert!(evaluate(&d, rule_from_builtin("structure/if-nesting")).is_empty());
}

// ---- Long sequence ----

#[test]
fn long_sequence_fires_only_past_the_threshold() {
    let rule = rule_from_builtin("structure/long-sequence");

    let mut at = doc(WorkflowKind::Sequence);
    fill_activities(&mut at, 20);
    assert!(evaluate(&at, rule.clone()).is_empty());

    let mut over = doc(WorkflowKind::Sequence);
    fill_activities(&mut over, 21);
    let findings = evaluate(&over, rule.clone());
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].detail["activity_count"], json!(21));

    // Non-sequence documents are out of scope for this rule.
    let mut flowchart = doc(WorkflowKind::Flowchart);
    fill_activities(&mut flowchart, 21);
    assert!(evaluate(&flowchart, rule).is_empty());
}

#[test]
fn long_sequence_penalty_modes_differ_only_in_multiplier() {
    let mut over = doc(WorkflowKind::Sequence);
    fill_activities(&mut over, 25);

    let total = rule_from_builtin("structure/long-sequence");
    let base = total.penalty;
    let findings = evaluate(&over, total);
    assert_eq!(findings[0].penalty.actual_penalty, base);

    let individual =
        rule_from_builtin("structure/long-sequence").with_penalty_mode(PenaltyMode::Individual);
    let findings = evaluate(&over, individual);
    // One case either way, so the multiplier is 1.
    assert_eq!(findings[0].penalty.actual_penalty, base);
    assert_eq!(findings[0].penalty.penalty_mode, PenaltyMode::Individual);
}

// ---- Modularization ----

#[test]
fn modularization_requires_an_invocation_in_large_workflows() {
    let rule = rule_from_builtin("structure/modularize");

    let mut monolith = doc(WorkflowKind::Sequence);
    fill_activities(&mut monolith, 31);
    assert_eq!(evaluate(&monolith, rule.clone()).len(), 1);

    let mut modular = doc(WorkflowKind::Sequence);
    fill_activities(&mut modular, 31);
    modular.kind_counts.insert("InvokeWorkflowFile".to_string(), 1);
    assert!(evaluate(&modular, rule).is_empty());
}

// ---- Empty catch ----

#[test]
fn empty_catch_flags_only_empty_branches() {
    let mut d = doc(WorkflowKind::Sequence);
    d.try_catches = vec![
        TryCatchBlock {
            display_name: "Swallows".to_string(),
            has_catch: true,
            catch_empty: true,
            has_finally: false,
        },
        TryCatchBlock {
            display_name: "Handles".to_string(),
            has_catch: true,
            catch_empty: false,
            has_finally: true,
        },
        TryCatchBlock {
            display_name: "NoCatch".to_string(),
            has_catch: false,
            catch_empty: false,
            has_finally: true,
        },
    ];

    let findings = evaluate(&d, rule_from_builtin("structure/empty-catch"));
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].detail["display_name"], json!("Swallows"));
    assert_eq!(findings[0].severity, Severity::Error);
}

#[test]
fn empty_catch_exceptions_suppress_by_display_name() {
    let rule = rule_from_builtin("structure/empty-catch").with_exceptions(&["Known swallow"]);
    let mut d = doc(WorkflowKind::Sequence);
    d.try_catches = vec![TryCatchBlock {
        display_name: "Known swallow".to_string(),
        has_catch: true,
        catch_empty: true,
        has_finally: false,
    }];
    assert!(evaluate(&d, rule).is_empty());
}

// ---- Logging ratio ----

#[test]
fn logging_ratio_fires_past_the_ceiling() {
    let rule = rule_from_builtin("logging/log-ratio");
    let log = LogMessage {
        display_name: "Log".to_string(),
        level: Some("Info".to_string()),
        message: None,
    };

    // 50 activities over 2 logs: ratio 25, ceiling 10.
    let mut sparse = doc(WorkflowKind::Sequence);
    fill_activities(&mut sparse, 50);
    sparse.logs = vec![log.clone(), log.clone()];
    let findings = evaluate(&sparse, rule.clone());
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].detail["ratio"], json!(25.0));

    // 20 activities over 3 logs: ratio 6.7, fine.
    let mut healthy = doc(WorkflowKind::Sequence);
    fill_activities(&mut healthy, 20);
    healthy.logs = vec![log.clone(), log.clone(), log];
    assert!(evaluate(&healthy, rule.clone()).is_empty());

    // Zero logs: ratio equals the activity count.
    let mut silent = doc(WorkflowKind::Sequence);
    fill_activities(&mut silent, 100);
    let findings = evaluate(&silent, rule);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].detail["ratio"], json!(100.0));
    assert_eq!(findings[0].detail["logs"], json!(0));
}

// ---- Commented code ----

#[test]
fn commented_code_checks_the_activity_percentage() {
    let rule = rule_from_builtin("hygiene/commented-code");

    let mut d = doc(WorkflowKind::Sequence);
    fill_activities(&mut d, 10);
    d.comments.commented_activities = 2;
    d.comments.disabled_blocks = 1;
    d.comments.disabled_lines = 8;
    d.comments.has_commented_activities = true;

    let findings = evaluate(&d, rule.clone());
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].detail["percent"], json!(20.0));
    assert_eq!(findings[0].detail["commented_lines"], json!(8));

    // At or under 10 percent nothing fires.
    let mut clean = doc(WorkflowKind::Sequence);
    fill_activities(&mut clean, 10);
    clean.comments.commented_activities = 1;
    assert!(evaluate(&clean, rule.clone()).is_empty());

    // An empty document never divides by zero.
    let empty = doc(WorkflowKind::Sequence);
    assert!(evaluate(&empty, rule).is_empty());
}

// ---- Containment checks ----

#[test]
fn risky_activities_must_sit_inside_a_trycatch() {
    let rule = rule_from_builtin("reliability/risky-outside-trycatch");

    let mut d = doc(WorkflowKind::Sequence);
    d.activities = vec![
        activity("InvokeWorkflowFile", "Call child", &["Sequence"]),
        activity("InvokeWorkflowFile", "Guarded call", &["Sequence", "TryCatch"]),
        activity("Assign", "Harmless", &["Sequence"]),
    ];

    let findings = evaluate(&d, rule);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].detail["activity"], json!("Call child"));
    assert_eq!(findings[0].detail["parent_kind"], json!("Sequence"));
}

#[test]
fn selector_index_flags_positional_selectors() {
    let rule = rule_from_builtin("ui/selector-index");

    let mut with_idx = activity("Click", "Click row", &["Sequence"]);
    with_idx
        .properties
        .insert("Selector".to_string(), "<webctrl tag='TR' idx='4' />".to_string());
    let mut spaced = activity("Click", "Click cell", &["Sequence"]);
    spaced
        .properties
        .insert("Selector".to_string(), "<webctrl idx = \"12\" />".to_string());
    let mut stable = activity("Click", "Click button", &["Sequence"]);
    stable
        .properties
        .insert("Selector".to_string(), "<webctrl id='submit' />".to_string());

    let mut d = doc(WorkflowKind::Sequence);
    d.activities = vec![with_idx, spaced, stable];

    let findings = evaluate(&d, rule);
    assert_eq!(findings.len(), 2);
    assert!(findings.iter().all(|f| f.penalty.cases_found == 2));
}

#[test]
fn listed_ui_activities_need_an_explicit_timeout() {
    let rule = rule_from_builtin("ui/missing-timeout");

    let mut with_timeout = activity("Click", "Click OK", &["Sequence"]);
    with_timeout
        .properties
        .insert("Timeout".to_string(), "3000".to_string());
    let mut with_ms = activity("TypeInto", "Type name", &["Sequence"]);
    with_ms
        .properties
        .insert("TimeoutMS".to_string(), "5000".to_string());
    let bare = activity("GetText", "Read total", &["Sequence"]);
    let unlisted = activity("Assign", "Set total", &["Sequence"]);

    let mut d = doc(WorkflowKind::Sequence);
    d.activities = vec![with_timeout, with_ms, bare, unlisted];

    let findings = evaluate(&d, rule);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].detail["activity"], json!("Read total"));
}

// ---- Dispatch ----

#[test]
fn disabled_rules_produce_nothing() {
    let rule = rule_from_builtin("structure/long-sequence").disabled();
    let mut d = doc(WorkflowKind::Sequence);
    fill_activities(&mut d, 50);
    assert!(evaluate(&d, rule).is_empty());
}

#[test]
fn unimplemented_rule_kinds_are_skipped() {
    let rule = Rule::new("future/x", "Future", RuleKind::Unimplemented, Severity::Info, 1.0);
    let mut d = doc(WorkflowKind::Sequence);
    fill_activities(&mut d, 50);
    assert!(evaluate(&d, rule).is_empty());
}

#[test]
fn project_rules_never_fire_per_document() {
    let rule = rule_from_builtin("project/naming");
    let d = doc(WorkflowKind::Sequence);
    assert!(evaluate(&d, rule).is_empty());
}

// ---- Project-level checks ----

fn project(name: &str, deps: &[(&str, &str)]) -> ProjectMetadata {
    ProjectMetadata {
        name: name.to_string(),
        description: String::new(),
        dependencies: deps
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        path: PathBuf::from("project.json"),
    }
}

#[test]
fn dependency_check_reports_missing_and_outdated() {
    let required: BTreeMap<String, String> = [
        ("UiPath.System.Activities", "21.4.0"),
        ("UiPath.UIAutomation.Activities", "20.10.6"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let p = project(
        "InvoiceProcessing",
        &[("UiPath.System.Activities", "[19.1.0]"), ("Custom.Lib", "1.0.0")],
    );

    let rule = rule_from_builtin("project/dependencies");
    let findings = RuleEngine::new().evaluate_project(&p, &[rule], &required);

    assert_eq!(findings.len(), 2);
    let by_pkg = |pkg: &str| {
        findings
            .iter()
            .find(|f| f.detail["package"] == json!(pkg))
            .unwrap()
    };
    assert_eq!(
        by_pkg("UiPath.System.Activities").detail["status"],
        json!("outdated")
    );
    assert_eq!(
        by_pkg("UiPath.UIAutomation.Activities").detail["status"],
        json!("missing")
    );
    // Individual mode: two cases double the base penalty.
    let audit = &findings[0].penalty;
    assert_eq!(audit.cases_found, 2);
    assert_eq!(audit.actual_penalty, audit.base_penalty * 2.0);
}

#[test]
fn satisfied_dependencies_stay_silent() {
    let required: BTreeMap<String, String> = [("UiPath.System.Activities", "20.10.1")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let p = project("InvoiceProcessing", &[("UiPath.System.Activities", "20.10.1")]);

    let rule = rule_from_builtin("project/dependencies");
    assert!(RuleEngine::new().evaluate_project(&p, &[rule], &required).is_empty());
}

#[test]
fn project_naming_reports_missing_segments() {
    let rule = rule_from_builtin("project/naming")
        .with_string_list("required_segments", &["Invoice"]);

    let p = project("my process", &[]);
    let findings = RuleEngine::new().evaluate_project(&p, &[rule], &BTreeMap::new());
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].detail["reason"], json!("no pattern matched"));
    assert_eq!(findings[0].detail["missing_segments"], json!(["Invoice"]));

    let ok = project("InvoiceProcessing", &[]);
    let rule = rule_from_builtin("project/naming");
    assert!(RuleEngine::new()
        .evaluate_project(&ok, &[rule], &BTreeMap::new())
        .is_empty());
}

// ---- Penalty audit ----

#[test]
fn penalty_audit_modes() {
    let total = Rule::new("x/t", "T", RuleKind::IfNesting, Severity::Warning, 2.0);
    let audit = PenaltyAudit::compute(&total, 5);
    assert_eq!(audit.actual_penalty, 2.0);
    assert_eq!(audit.cases_found, 5);

    let individual = total.clone().with_penalty_mode(PenaltyMode::Individual);
    let audit = PenaltyAudit::compute(&individual, 5);
    assert_eq!(audit.actual_penalty, 10.0);
}
