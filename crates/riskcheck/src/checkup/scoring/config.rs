use serde::{Deserialize, Serialize};

/// Point-value convention for a catalog generation.
///
/// Resolved once per catalog version; the engine applies the same convention
/// to thresholds, answer ranking, and the flag override so that severity can
/// never be silently inverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorePolarity {
    /// Higher point totals mean a healthier outcome (the current catalog).
    HigherIsBetter,
    /// Higher point totals mean more exposure (historical catalogs).
    HigherIsWorse,
}

/// Policy for deriving the maximum possible score of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxScorePolicy {
    /// A fixed constant for the whole question set.
    FixedTotal(i64),
    /// Sum of the highest-point option of every question in the selected
    /// modules.
    PerQuestionMax,
    /// A fixed per-module constant multiplied by the number of selected
    /// modules.
    PerModuleFixed(i64),
}

/// Tier boundaries expressed on the "goodness" percentage, which equals the
/// score percentage under [`ScorePolarity::HigherIsBetter`] and its
/// complement under [`ScorePolarity::HigherIsWorse`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub green_floor_pct: f64,
    pub yellow_floor_pct: f64,
}

/// Flag-count overrides forcing the overall tier to a floor regardless of
/// the numeric percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagOverrides {
    pub yellow_at: Option<usize>,
    pub red_at: Option<usize>,
}

/// Scoring calibration carried by a catalog version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub polarity: ScorePolarity,
    pub max_score: MaxScorePolicy,
    pub tiers: TierThresholds,
    pub flag_overrides: FlagOverrides,
    /// Combined cap on the top-risks list.
    pub top_risk_cap: usize,
    /// Medium-severity entries are only appended while the high-severity
    /// count stays below this floor.
    pub high_severity_floor: usize,
    /// Confidence points deducted per flagged answer.
    pub confidence_flag_penalty: i64,
}
