//! Project score computation.
//!
//! Starts at 100 and subtracts a weighted, size-normalized penalty.
//! Large projects are normalized per activity so volume alone cannot
//! collapse the score to 0; very small projects use a flat half-weight
//! penalty instead, where normalization is unstable.

use serde::Serialize;
use wflint_core::constants::{SMALL_PROJECT_ACTIVITY_FLOOR, SMALL_PROJECT_PENALTY_FACTOR};
use wflint_core::ScoreConfig;

use super::stats::Statistics;

/// Letter grade buckets at fixed cut points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Self::A
        } else if score >= 80.0 {
            Self::B
        } else if score >= 70.0 {
            Self::C
        } else if score >= 60.0 {
            Self::D
        } else {
            Self::F
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

/// Penalty contribution per severity, for the score breakdown.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PenaltyBreakdown {
    pub error: f64,
    pub warning: f64,
    pub info: f64,
}

impl PenaltyBreakdown {
    pub fn total(&self) -> f64 {
        self.error + self.warning + self.info
    }
}

/// The 0..=100 project score with its grade and penalty breakdown.
/// Derived purely from statistics and config; recomputed fresh on every
/// analysis.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Score {
    pub value: f64,
    pub grade: Grade,
    pub penalty: PenaltyBreakdown,
}

/// Compute the project score from severity counts and activity volume.
pub fn compute(stats: &Statistics, config: &ScoreConfig) -> Score {
    let penalty = PenaltyBreakdown {
        error: stats.errors as f64 * config.error_weight.abs(),
        warning: stats.warnings as f64 * config.warning_weight.abs(),
        info: stats.infos as f64 * config.info_weight.abs(),
    };
    let total = penalty.total();

    let adjusted = if stats.total_activities < SMALL_PROJECT_ACTIVITY_FLOOR {
        total * SMALL_PROJECT_PENALTY_FACTOR
    } else {
        total / stats.total_activities.max(1) as f64 * config.scaling_factor
    };

    let value = (100.0 - adjusted).clamp(0.0, 100.0);
    Score {
        value,
        grade: Grade::from_score(value),
        penalty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(errors: usize, warnings: usize, infos: usize, activities: usize) -> Statistics {
        Statistics {
            errors,
            warnings,
            infos,
            total_activities: activities,
            ..Default::default()
        }
    }

    #[test]
    fn test_clean_project_scores_100() {
        let score = compute(&stats(0, 0, 0, 50), &ScoreConfig::default());
        assert_eq!(score.value, 100.0);
        assert_eq!(score.grade, Grade::A);
    }

    #[test]
    fn test_deterministic_and_idempotent() {
        let s = stats(3, 7, 2, 120);
        let config = ScoreConfig::default();
        let a = compute(&s, &config);
        let b = compute(&s, &config);
        assert_eq!(a.value.to_bits(), b.value.to_bits());
    }

    #[test]
    fn test_monotonically_non_increasing() {
        let config = ScoreConfig::default();
        let base = compute(&stats(1, 1, 1, 100), &config).value;
        assert!(compute(&stats(2, 1, 1, 100), &config).value <= base);
        assert!(compute(&stats(1, 5, 1, 100), &config).value <= base);
        assert!(compute(&stats(1, 1, 9, 100), &config).value <= base);
    }

    #[test]
    fn test_small_project_uses_flat_penalty() {
        let config = ScoreConfig::default();
        // 9 activities: flat half-weight, no per-activity normalization.
        let score = compute(&stats(2, 0, 0, 9), &config);
        let expected = 100.0 - 2.0 * config.error_weight.abs() * 0.5;
        assert_eq!(score.value, expected);
    }

    #[test]
    fn test_negative_weights_count_as_positive() {
        let config = ScoreConfig {
            error_weight: -5.0,
            ..Default::default()
        };
        let score = compute(&stats(4, 0, 0, 100), &config);
        assert!(score.value < 100.0);
    }

    #[test]
    fn test_score_clamps_at_zero() {
        let score = compute(&stats(1000, 0, 0, 10), &ScoreConfig::default());
        assert_eq!(score.value, 0.0);
        assert_eq!(score.grade, Grade::F);
    }

    #[test]
    fn test_grade_cut_points() {
        assert_eq!(Grade::from_score(90.0), Grade::A);
        assert_eq!(Grade::from_score(89.9), Grade::B);
        assert_eq!(Grade::from_score(80.0), Grade::B);
        assert_eq!(Grade::from_score(70.0), Grade::C);
        assert_eq!(Grade::from_score(60.0), Grade::D);
        assert_eq!(Grade::from_score(59.9), Grade::F);
    }
}
