//! Rule repository: catalog document types, load/save, filtering, and
//! parameter management.

#[allow(clippy::module_inception)]
mod catalog;

pub mod builtin;
pub mod types;

pub use builtin::builtin;
pub use catalog::Catalog;
pub use types::{
    CatalogDocument, CatalogMetadata, Parameter, ParameterValue, PenaltyMode, Rule, RuleKind,
    RuleSet,
};
