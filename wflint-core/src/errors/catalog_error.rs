//! Rule catalog load/save/validation errors.

use std::path::PathBuf;

/// Errors from loading a rule catalog document.
///
/// Fatal to the operation: a scan cannot proceed without a valid
/// catalog.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read catalog {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog document: {message}")]
    Malformed { message: String },

    #[error("duplicate rule id {id}")]
    DuplicateRuleId { id: String },

    #[error("rule {id} declares a negative base penalty ({penalty})")]
    NegativePenalty { id: String, penalty: f64 },
}

/// Errors from persisting a rule catalog document.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("failed to write catalog {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize catalog: {message}")]
    Serialize { message: String },
}

/// Errors from a rejected parameter write. The catalog state is
/// unchanged when any of these is returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("unknown rule {id}")]
    UnknownRule { id: String },

    #[error("rule {rule_id} has no parameter {name}")]
    UnknownParameter { rule_id: String, name: String },

    #[error("parameter {name} expects a {expected} value")]
    TypeMismatch { name: String, expected: &'static str },

    #[error("parameter {name} value {value} is outside {min}..={max}")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },
}
