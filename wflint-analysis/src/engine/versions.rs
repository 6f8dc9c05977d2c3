//! Numeric-tuple version comparison.
//!
//! Versions are normalized by dropping every character that is not a
//! digit or a dot, splitting on dots, and comparing the numeric tuples
//! lexicographically with zero padding. `"[2.12.3]"` compares equal to
//! `"2.12.3"`.

use std::cmp::Ordering;

/// Normalize a version string into its numeric components.
pub fn normalize(version: &str) -> Vec<u64> {
    let cleaned: String = version
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned
        .split('.')
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<u64>().unwrap_or(u64::MAX))
        .collect()
}

/// Total order over version strings, consistent with semantic-version
/// intuition on the numeric components.
pub fn compare(a: &str, b: &str) -> Ordering {
    let ta = normalize(a);
    let tb = normalize(b);
    let len = ta.len().max(tb.len());
    for i in 0..len {
        let va = ta.get(i).copied().unwrap_or(0);
        let vb = tb.get(i).copied().unwrap_or(0);
        match va.cmp(&vb) {
            Ordering::Equal => {}
            other => return other,
        }
    }
    Ordering::Equal
}
