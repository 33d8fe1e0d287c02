use std::collections::BTreeMap;
use std::collections::HashSet;

use super::config::{MaxScorePolicy, ScorePolarity, ScoringConfig};
use crate::checkup::catalog::{Catalog, Module, Question};
use crate::checkup::domain::{
    ModuleId, ModuleScore, QuestionId, RiskTier, Severity, SubmittedAnswer, TopRisk,
};

/// Everything the engine derives from one answer set, before plan generation.
pub(crate) struct ScoreBreakdown {
    pub total_score: i64,
    pub max_possible_score: i64,
    pub score_percentage: f64,
    pub risk_level: RiskTier,
    pub module_scores: Vec<ModuleScore>,
    pub trigger_flags: Vec<QuestionId>,
    pub top_risks: Vec<TopRisk>,
    pub confidence_level: i64,
}

pub(crate) fn score_answers(
    catalog: &Catalog,
    answers: &[SubmittedAnswer],
    modules: &[ModuleId],
) -> ScoreBreakdown {
    let config = &catalog.scoring;

    let total_score: i64 = answers.iter().map(|answer| answer.points).sum();
    let max_possible_score = max_possible(catalog, config, modules);
    let raw_percentage = if max_possible_score > 0 {
        total_score as f64 / max_possible_score as f64 * 100.0
    } else {
        0.0
    };

    let trigger_flags = collect_trigger_flags(catalog, answers, config.polarity);
    let module_scores = build_module_scores(catalog, answers, modules, config);

    let mut risk_level = tier_for(raw_percentage, config);
    if let Some(red_at) = config.flag_overrides.red_at {
        if trigger_flags.len() >= red_at {
            risk_level = risk_level.max(RiskTier::Red);
        }
    }
    if let Some(yellow_at) = config.flag_overrides.yellow_at {
        if trigger_flags.len() >= yellow_at {
            risk_level = risk_level.max(RiskTier::Yellow);
        }
    }

    let top_risks = build_top_risks(catalog, answers, config);

    let goodness = goodness_pct(raw_percentage, config.polarity).floor() as i64;
    let confidence_level = (goodness - trigger_flags.len() as i64 * config.confidence_flag_penalty)
        .clamp(10, 100);

    ScoreBreakdown {
        total_score,
        max_possible_score,
        score_percentage: round_one_decimal(raw_percentage),
        risk_level,
        module_scores,
        trigger_flags,
        top_risks,
        confidence_level,
    }
}

fn max_possible(catalog: &Catalog, config: &ScoringConfig, modules: &[ModuleId]) -> i64 {
    match config.max_score {
        MaxScorePolicy::FixedTotal(total) => total,
        MaxScorePolicy::PerModuleFixed(per_module) => per_module * modules.len() as i64,
        MaxScorePolicy::PerQuestionMax => modules
            .iter()
            .filter_map(|id| catalog.module(id))
            .map(Module::max_score)
            .sum(),
    }
}

fn goodness_pct(percentage: f64, polarity: ScorePolarity) -> f64 {
    match polarity {
        ScorePolarity::HigherIsBetter => percentage,
        ScorePolarity::HigherIsWorse => 100.0 - percentage,
    }
}

fn tier_for(percentage: f64, config: &ScoringConfig) -> RiskTier {
    let goodness = goodness_pct(percentage, config.polarity);
    if goodness >= config.tiers.green_floor_pct {
        RiskTier::Green
    } else if goodness >= config.tiers.yellow_floor_pct {
        RiskTier::Yellow
    } else {
        RiskTier::Red
    }
}

/// Distance from the best option, banded into severities by thirds of the
/// question's point range. `None` means the answer is not bad enough to rank.
fn severity_band(question: &Question, points: i64, polarity: ScorePolarity) -> Option<Severity> {
    let range = question.max_points() - question.min_points();
    if range <= 0 {
        return None;
    }
    let badness = match polarity {
        ScorePolarity::HigherIsBetter => question.max_points() - points,
        ScorePolarity::HigherIsWorse => points - question.min_points(),
    }
    .clamp(0, range);

    if badness * 3 >= range * 2 {
        Some(Severity::High)
    } else if badness * 3 >= range {
        Some(Severity::Medium)
    } else {
        None
    }
}

fn badness_of(question: &Question, points: i64, polarity: ScorePolarity) -> i64 {
    let range = question.max_points() - question.min_points();
    match polarity {
        ScorePolarity::HigherIsBetter => question.max_points() - points,
        ScorePolarity::HigherIsWorse => points - question.min_points(),
    }
    .clamp(0, range.max(0))
}

/// Flags in submission order: the submitted trigger flag, or a worst-band
/// answer to a known question. Duplicate submissions are retained.
fn collect_trigger_flags(
    catalog: &Catalog,
    answers: &[SubmittedAnswer],
    polarity: ScorePolarity,
) -> Vec<QuestionId> {
    answers
        .iter()
        .filter(|answer| {
            answer.trigger_flag
                || catalog
                    .question(&answer.question_id)
                    .and_then(|question| severity_band(question, answer.points, polarity))
                    == Some(Severity::High)
        })
        .map(|answer| answer.question_id.clone())
        .collect()
}

fn build_module_scores(
    catalog: &Catalog,
    answers: &[SubmittedAnswer],
    modules: &[ModuleId],
    config: &ScoringConfig,
) -> Vec<ModuleScore> {
    let selected: HashSet<&ModuleId> = modules.iter().collect();
    let mut points: BTreeMap<&ModuleId, i64> = BTreeMap::new();
    let mut flags: BTreeMap<&ModuleId, Vec<QuestionId>> = BTreeMap::new();

    for answer in answers {
        let Some(module) = catalog.module_of(&answer.question_id) else {
            continue;
        };
        if !selected.contains(&module.id) {
            continue;
        }
        *points.entry(&module.id).or_default() += answer.points;
        let flagged = answer.trigger_flag
            || catalog
                .question(&answer.question_id)
                .and_then(|question| severity_band(question, answer.points, config.polarity))
                == Some(Severity::High);
        if flagged {
            flags
                .entry(&module.id)
                .or_default()
                .push(answer.question_id.clone());
        }
    }

    catalog
        .modules
        .iter()
        .filter(|module| selected.contains(&module.id))
        .map(|module| {
            let score = points.get(&module.id).copied().unwrap_or(0);
            let max_score = module_max(module, config);
            let percentage = if max_score > 0 {
                score as f64 / max_score as f64 * 100.0
            } else {
                0.0
            };
            ModuleScore {
                module_id: module.id.clone(),
                module_name: module.name.clone(),
                score,
                max_score,
                risk_level: tier_for(percentage, config),
                trigger_flags: flags.remove(&module.id).unwrap_or_default(),
            }
        })
        .collect()
}

fn module_max(module: &Module, config: &ScoringConfig) -> i64 {
    match config.max_score {
        MaxScorePolicy::PerModuleFixed(per_module) => per_module,
        MaxScorePolicy::FixedTotal(_) | MaxScorePolicy::PerQuestionMax => module.max_score(),
    }
}

/// Worst answers first, resolved through the risk catalog. High-severity
/// entries fill the list; medium entries are appended only while the high
/// count stays under the configured floor. Unmapped answers are skipped, and
/// a risk key is reported at most once.
fn build_top_risks(
    catalog: &Catalog,
    answers: &[SubmittedAnswer],
    config: &ScoringConfig,
) -> Vec<TopRisk> {
    let mut ranked: Vec<(&SubmittedAnswer, &Question, Severity, i64)> = answers
        .iter()
        .filter_map(|answer| {
            let question = catalog.question(&answer.question_id)?;
            let band = severity_band(question, answer.points, config.polarity)?;
            let badness = badness_of(question, answer.points, config.polarity);
            Some((answer, question, band, badness))
        })
        .collect();
    // Stable sort keeps submission order within equal badness.
    ranked.sort_by(|a, b| b.3.cmp(&a.3));

    let mut seen = HashSet::new();
    let mut top_risks = Vec::new();

    for entry in ranked.iter().filter(|entry| entry.2 == Severity::High) {
        if top_risks.len() >= config.top_risk_cap {
            break;
        }
        push_resolved(catalog, entry.0, entry.2, &mut seen, &mut top_risks);
    }

    if top_risks.len() < config.high_severity_floor {
        for entry in ranked.iter().filter(|entry| entry.2 == Severity::Medium) {
            if top_risks.len() >= config.top_risk_cap {
                break;
            }
            push_resolved(catalog, entry.0, entry.2, &mut seen, &mut top_risks);
        }
    }

    top_risks
}

fn push_resolved(
    catalog: &Catalog,
    answer: &SubmittedAnswer,
    severity: Severity,
    seen: &mut HashSet<crate::checkup::resolver::RiskKey>,
    top_risks: &mut Vec<TopRisk>,
) {
    let Some(key) = catalog
        .resolver
        .resolve(&answer.question_id, &answer.answer_value)
    else {
        return;
    };
    if seen.contains(key) {
        return;
    }
    let Some(entry) = catalog.risks.get(key) else {
        return;
    };
    seen.insert(key.clone());
    top_risks.push(TopRisk {
        title: entry.title.clone(),
        description: entry.description.clone(),
        severity,
        module: entry.module.clone(),
        module_name: catalog
            .module(&entry.module)
            .map(|module| module.name.clone())
            .unwrap_or_else(|| entry.module.0.clone()),
    });
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
