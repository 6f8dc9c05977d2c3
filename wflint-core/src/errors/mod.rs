//! Error taxonomy for the analyzer.
//!
//! File-level failures (`ParseError`) are recovered locally and tallied
//! as skipped files; catalog failures (`LoadError`/`SaveError`) abort
//! the operation that hit them; parameter writes fail synchronously
//! with `ValidationError` and leave the catalog unchanged.

mod catalog_error;
mod parse_error;
mod scan_error;

pub use catalog_error::{LoadError, SaveError, ValidationError};
pub use parse_error::ParseError;
pub use scan_error::ScanError;
