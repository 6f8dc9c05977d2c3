//! # wflint-analysis
//!
//! Analysis engine for the wflint workflow quality analyzer.
//! Contains the workflow document parser, the rule catalog, the rule
//! evaluation engine, and the project analysis orchestrator.

pub mod analysis;
pub mod catalog;
pub mod engine;
pub mod metadata;
pub mod parser;
