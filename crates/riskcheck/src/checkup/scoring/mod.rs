mod config;
pub(crate) mod plan;
mod rules;

pub use config::{
    FlagOverrides, MaxScorePolicy, ScorePolarity, ScoringConfig, TierThresholds,
};

use std::sync::Arc;

use super::catalog::Catalog;
use super::domain::{ModuleId, ScoreResult, SubmittedAnswer};

/// Stateless scoring engine applying a catalog's calibration to an answer
/// set.
///
/// Pure and deterministic: no I/O, no clock, no shared mutable state, safe to
/// call concurrently for independent assessments.
pub struct ScoringEngine {
    catalog: Arc<Catalog>,
}

impl ScoringEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn score(&self, answers: &[SubmittedAnswer], modules: &[ModuleId]) -> ScoreResult {
        let breakdown = rules::score_answers(&self.catalog, answers, modules);
        let action_plan = plan::build_action_plan(
            &breakdown.top_risks,
            breakdown.risk_level,
            &breakdown.module_scores,
        );

        ScoreResult {
            total_score: breakdown.total_score,
            max_possible_score: breakdown.max_possible_score,
            score_percentage: breakdown.score_percentage,
            risk_level: breakdown.risk_level,
            module_scores: breakdown.module_scores,
            trigger_flags: breakdown.trigger_flags,
            top_risks: breakdown.top_risks,
            action_plan,
            confidence_level: breakdown.confidence_level,
        }
    }
}
