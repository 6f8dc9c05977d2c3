//! # wflint-core
//!
//! Foundation crate for the wflint workflow analyzer.
//! Defines errors, config, severity, constants, and logging init.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod logging;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::{ScanConfig, ScoreConfig};
pub use errors::{LoadError, ParseError, SaveError, ScanError, ValidationError};
pub use types::collections::{FxHashMap, FxHashSet};
pub use types::severity::Severity;
