//! Hash collections with the Fx hasher, used throughout the workspace.

pub use rustc_hash::{FxHashMap, FxHashSet};
