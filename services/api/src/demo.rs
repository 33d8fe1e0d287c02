use std::sync::Arc;

use clap::{Args, ValueEnum};
use riskcheck::checkup::{
    Catalog, CheckupService, Lead, LeadRequest, ModuleId, ScoreResult, SubmittedAnswer,
};
use riskcheck::config::StorageMode;
use riskcheck::error::AppError;

use crate::infra::build_stores;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Modules to include (defaults to the full catalog)
    #[arg(long)]
    pub(crate) modules: Vec<String>,
    /// Canned answer profile to score
    #[arg(long, value_enum, default_value_t = DemoProfile::Mixed)]
    pub(crate) profile: DemoProfile,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum DemoProfile {
    /// Best option everywhere
    Best,
    /// Worst option everywhere
    Worst,
    /// A plausible mix of strong, shaky, and exposed answers
    #[default]
    Mixed,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let catalog = Arc::new(Catalog::business_legal_v1());
    let (assessments, leads) = build_stores(StorageMode::Memory);
    let service = CheckupService::new(catalog.clone(), assessments, leads);

    let modules: Vec<ModuleId> = if args.modules.is_empty() {
        catalog.modules.iter().map(|module| module.id.clone()).collect()
    } else {
        args.modules.into_iter().map(ModuleId).collect()
    };

    println!("Risk checkup demo (catalog {})", catalog.version);
    for id in &modules {
        if let Some(module) = catalog.module(id) {
            println!("- {}: {} questions", module.name, module.questions.len());
        }
    }

    let assessment = service.create_assessment(modules.clone())?;
    let answers = demo_answers(&catalog, &modules, args.profile);
    let result = service.submit(&assessment.id, answers)?;
    render_result(&result);

    let lead = service.create_lead(LeadRequest {
        name: "Demo Owner".to_string(),
        email: "owner@example.com".to_string(),
        phone: "(555) 010-0100".to_string(),
        business_name: "Demo Trades LLC".to_string(),
        region: "Iowa".to_string(),
        modules,
        situation: "Exploring a legal health review".to_string(),
        assessment_id: Some(assessment.id),
    })?;
    render_lead(&lead);

    Ok(())
}

fn demo_answers(
    catalog: &Catalog,
    modules: &[ModuleId],
    profile: DemoProfile,
) -> Vec<SubmittedAnswer> {
    let pattern: &[&str] = match profile {
        DemoProfile::Best => &["green"],
        DemoProfile::Worst => &["red"],
        DemoProfile::Mixed => &["green", "yellow", "green", "red"],
    };

    modules
        .iter()
        .filter_map(|id| catalog.module(id))
        .flat_map(|module| module.questions.iter())
        .enumerate()
        .map(|(index, question)| {
            let value = pattern[index % pattern.len()];
            let option = question
                .options
                .iter()
                .find(|option| option.value == value)
                .unwrap_or(&question.options[0]);
            SubmittedAnswer {
                question_id: question.id.clone(),
                answer_value: option.value.clone(),
                points: option.points,
                trigger_flag: option.trigger_flag,
            }
        })
        .collect()
}

fn render_result(result: &ScoreResult) {
    println!(
        "\nScore: {}/{} ({:.1}%), risk level {}, confidence {}",
        result.total_score,
        result.max_possible_score,
        result.score_percentage,
        result.risk_level.label(),
        result.confidence_level
    );

    println!("\nModule breakdown");
    for module in &result.module_scores {
        println!(
            "- {}: {}/{} ({}), {} flagged",
            module.module_name,
            module.score,
            module.max_score,
            module.risk_level.label(),
            module.trigger_flags.len()
        );
    }

    if result.top_risks.is_empty() {
        println!("\nTop risks: none");
    } else {
        println!("\nTop risks");
        for risk in &result.top_risks {
            println!(
                "- [{}] {} ({})",
                match risk.severity {
                    riskcheck::checkup::Severity::High => "high",
                    riskcheck::checkup::Severity::Medium => "medium",
                },
                risk.title,
                risk.module_name
            );
        }
    }

    if result.action_plan.is_empty() {
        println!("\nAction plan: nothing to do");
    } else {
        println!("\nAction plan");
        for item in &result.action_plan {
            let urgency = match item.urgency {
                riskcheck::checkup::Urgency::High => "high",
                riskcheck::checkup::Urgency::Medium => "medium",
            };
            println!("{}. {} (urgency {urgency})", item.priority, item.action);
        }
    }
}

fn render_lead(lead: &Lead) {
    println!("\nLead captured: {} <{}>", lead.name, lead.email);
    if let (Some(score), Some(risk_level)) = (&lead.score, &lead.risk_level) {
        println!("Snapshot: score {score}, risk level {risk_level}");
    }
    if !lead.top_risks.is_empty() {
        println!("Snapshot risks: {}", lead.top_risks.join(", "));
    }
}
