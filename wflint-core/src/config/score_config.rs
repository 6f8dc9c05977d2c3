//! Scoring configuration.

use serde::{Deserialize, Serialize};

/// Weights and normalization for the project score.
///
/// Weights are taken by absolute value, so negative values configured
/// by a UI slider behave the same as positive ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    /// Penalty weight per error finding.
    pub error_weight: f64,
    /// Penalty weight per warning finding.
    pub warning_weight: f64,
    /// Penalty weight per info finding.
    pub info_weight: f64,
    /// Multiplier applied after per-activity normalization.
    pub scaling_factor: f64,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            error_weight: 5.0,
            warning_weight: 2.0,
            info_weight: 0.5,
            scaling_factor: 10.0,
        }
    }
}
