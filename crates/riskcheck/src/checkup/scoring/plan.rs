use crate::checkup::domain::{ActionItem, ModuleScore, RiskTier, Severity, TopRisk, Urgency};

/// Red module entries and individual high-severity fixes share this budget.
const URGENT_ITEM_CAP: usize = 5;
/// Running total allowed before the trailing review-call item.
const PRE_CALL_CAP: usize = 6;
/// At most this many mid-tier modules are queued for review.
const REVIEW_MODULE_CAP: usize = 2;

/// Deterministic, capped remediation plan derived from the scored outcome.
///
/// Ordering: red modules, then high-severity risk fixes, then up to two
/// yellow modules, then a single review-call item whenever the overall tier
/// or any module warrants one. Priorities are contiguous from 1.
pub(crate) fn build_action_plan(
    top_risks: &[TopRisk],
    risk_level: RiskTier,
    module_scores: &[ModuleScore],
) -> Vec<ActionItem> {
    let mut plan: Vec<ActionItem> = Vec::new();

    let red_modules = module_scores
        .iter()
        .filter(|module| module.risk_level == RiskTier::Red);
    for module in red_modules.take(URGENT_ITEM_CAP) {
        plan.push(ActionItem {
            priority: plan.len() as u32 + 1,
            action: format!("Address {} Immediately", module.module_name),
            description: format!(
                "This area scored {}/{}, indicating significant exposure that needs \
                 professional review.",
                module.score, module.max_score
            ),
            urgency: Urgency::High,
        });
    }

    for risk in top_risks
        .iter()
        .filter(|risk| risk.severity == Severity::High)
    {
        if plan.len() >= URGENT_ITEM_CAP {
            break;
        }
        plan.push(ActionItem {
            priority: plan.len() as u32 + 1,
            action: format!("Fix: {}", risk.title),
            description: risk.description.clone(),
            urgency: Urgency::High,
        });
    }

    let yellow_modules = module_scores
        .iter()
        .filter(|module| module.risk_level == RiskTier::Yellow)
        .take(REVIEW_MODULE_CAP);
    for module in yellow_modules {
        if plan.len() >= PRE_CALL_CAP {
            break;
        }
        plan.push(ActionItem {
            priority: plan.len() as u32 + 1,
            action: format!("Review {}", module.module_name),
            description: format!(
                "This area scored {}/{}. Address gaps within 30-90 days.",
                module.score, module.max_score
            ),
            urgency: Urgency::Medium,
        });
    }

    let any_red_module = module_scores
        .iter()
        .any(|module| module.risk_level == RiskTier::Red);
    if risk_level != RiskTier::Green || any_red_module {
        plan.push(ActionItem {
            priority: plan.len() as u32 + 1,
            action: "Schedule a Risk Review Call".to_string(),
            description: "A 30-minute call to discuss your specific situation and create a \
                          protection plan."
                .to_string(),
            urgency: if risk_level == RiskTier::Red {
                Urgency::High
            } else {
                Urgency::Medium
            },
        });
    }

    plan
}
