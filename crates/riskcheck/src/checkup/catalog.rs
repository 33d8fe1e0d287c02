use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::{ModuleId, QuestionId};
use super::resolver::{ResolverPolicy, RiskKey};
use super::scoring::{
    FlagOverrides, MaxScorePolicy, ScorePolarity, ScoringConfig, TierThresholds,
};

/// One selectable answer for a question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerOption {
    pub value: String,
    pub label: String,
    pub points: i64,
    pub trigger_flag: bool,
}

/// A single catalog question with its ordered options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: String,
    pub rationale: String,
    pub module: ModuleId,
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn max_points(&self) -> i64 {
        self.options.iter().map(|option| option.points).max().unwrap_or(0)
    }

    pub fn min_points(&self) -> i64 {
        self.options.iter().map(|option| option.points).min().unwrap_or(0)
    }
}

/// A topical group of questions, selectable as a unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Module {
    pub id: ModuleId,
    pub name: String,
    pub description: String,
    pub questions: Vec<Question>,
}

impl Module {
    /// Sum of the highest-point option of every question in the module.
    pub fn max_score(&self) -> i64 {
        self.questions.iter().map(Question::max_points).sum()
    }
}

/// Human-readable enrichment for one catalogued risk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskEntry {
    pub module: ModuleId,
    pub title: String,
    pub description: String,
}

/// Static mapping from risk key to presentable risk copy.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RiskCatalog {
    entries: BTreeMap<RiskKey, RiskEntry>,
}

impl RiskCatalog {
    pub fn get(&self, key: &RiskKey) -> Option<&RiskEntry> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: RiskKey, entry: RiskEntry) {
        self.entries.insert(key, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Immutable, versioned questionnaire data plus its scoring calibration.
///
/// Built once at process start and shared read-only; nothing here is mutated
/// after construction.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub version: String,
    pub modules: Vec<Module>,
    pub risks: RiskCatalog,
    pub resolver: ResolverPolicy,
    pub scoring: ScoringConfig,
}

impl Catalog {
    pub fn module(&self, id: &ModuleId) -> Option<&Module> {
        self.modules.iter().find(|module| &module.id == id)
    }

    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.modules
            .iter()
            .flat_map(|module| module.questions.iter())
            .find(|question| &question.id == id)
    }

    pub fn module_of(&self, question_id: &QuestionId) -> Option<&Module> {
        self.modules
            .iter()
            .find(|module| module.questions.iter().any(|q| &q.id == question_id))
    }

    /// The v1 business legal checkup: six modules of four questions each,
    /// 3/2/1-point options with the worst option flagged.
    pub fn business_legal_v1() -> Self {
        let modules = vec![
            contracts_module(),
            ownership_module(),
            vendors_module(),
            employment_module(),
            insurance_module(),
            systems_module(),
        ];

        let mut risks = RiskCatalog::default();
        let mut resolver_map = BTreeMap::new();
        for (question_id, module, title, description) in risk_entries() {
            let key = RiskKey::new(question_id);
            resolver_map.insert(QuestionId::new(question_id), key.clone());
            risks.insert(
                key,
                RiskEntry {
                    module: ModuleId::new(module),
                    title: title.to_string(),
                    description: description.to_string(),
                },
            );
        }

        Self {
            version: "v1".to_string(),
            modules,
            risks,
            resolver: ResolverPolicy::QuestionKeyed(resolver_map),
            scoring: ScoringConfig {
                polarity: ScorePolarity::HigherIsBetter,
                max_score: MaxScorePolicy::PerQuestionMax,
                tiers: TierThresholds {
                    green_floor_pct: 80.0,
                    yellow_floor_pct: 55.0,
                },
                flag_overrides: FlagOverrides {
                    yellow_at: Some(3),
                    red_at: Some(5),
                },
                top_risk_cap: 7,
                high_severity_floor: 5,
                confidence_flag_penalty: 3,
            },
        }
    }
}

fn question(
    id: &str,
    module: &str,
    prompt: &str,
    rationale: &str,
    options: [(&str, &str, i64, bool); 3],
) -> Question {
    Question {
        id: QuestionId::new(id),
        prompt: prompt.to_string(),
        rationale: rationale.to_string(),
        module: ModuleId::new(module),
        options: options
            .into_iter()
            .map(|(value, label, points, trigger_flag)| AnswerOption {
                value: value.to_string(),
                label: label.to_string(),
                points,
                trigger_flag,
            })
            .collect(),
    }
}

fn module(id: &str, name: &str, description: &str, questions: Vec<Question>) -> Module {
    Module {
        id: ModuleId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        questions,
    }
}

fn contracts_module() -> Module {
    module(
        "contracts",
        "Customer Contracts & Project Risks",
        "4 questions that reveal whether your client agreements protect you",
        vec![
            question(
                "q1",
                "contracts",
                "Do your customer contracts clearly define the scope of work, pricing structure, \
                 and payment terms, including when payment is due and what happens if a client \
                 pays late?",
                "Vague scope leads to scope creep. Unclear payment terms mean you have no legal \
                 leverage when a client delays payment for 60, 90, or 120 days. This is the \
                 number one source of cash flow problems and client disputes for growing \
                 businesses.",
                [
                    (
                        "green",
                        "Yes. Every contract specifies exact scope, pricing, payment deadlines, \
                         and late payment consequences.",
                        3,
                        false,
                    ),
                    (
                        "yellow",
                        "Most of my contracts cover this, but some clients are on informal or \
                         verbal agreements.",
                        2,
                        false,
                    ),
                    (
                        "red",
                        "No. My contracts are vague on scope or payment terms, or I frequently \
                         work without a signed contract.",
                        1,
                        true,
                    ),
                ],
            ),
            question(
                "q2",
                "contracts",
                "When a client requests changes to a project after work has started, do you have \
                 a documented change order process that requires written approval before the \
                 additional work is performed?",
                "Change orders are where businesses lose money. Without a signed approval \
                 process, you end up doing extra work for free and have no documentation to \
                 support a billing dispute. This is especially damaging in construction, \
                 professional services, and any project-based industry.",
                [
                    (
                        "green",
                        "Yes. All changes go through a formal change order process with written \
                         client approval and updated pricing before work begins.",
                        3,
                        false,
                    ),
                    (
                        "yellow",
                        "Sometimes. We document major changes, but smaller requests often get \
                         handled informally.",
                        2,
                        false,
                    ),
                    (
                        "red",
                        "No. We usually just handle changes as they come and figure out billing \
                         later.",
                        1,
                        true,
                    ),
                ],
            ),
            question(
                "q3",
                "contracts",
                "Do your contracts include a limitation of liability clause that caps your \
                 maximum financial exposure if something goes wrong on a project?",
                "Without a liability cap, a single bad project could result in a judgment that \
                 exceeds your total revenue. A limitation of liability clause is the difference \
                 between a manageable business setback and a company-ending lawsuit. Courts \
                 generally enforce these when they are properly drafted.",
                [
                    (
                        "green",
                        "Yes. My contracts cap liability, typically to the amount paid under the \
                         contract or a defined dollar amount.",
                        3,
                        false,
                    ),
                    (
                        "yellow",
                        "I think there is something about liability in my contract, but I have \
                         not reviewed it closely.",
                        2,
                        false,
                    ),
                    (
                        "red",
                        "No. My contracts have no liability cap, or I am not sure.",
                        1,
                        true,
                    ),
                ],
            ),
            question(
                "q4",
                "contracts",
                "Are you currently relying on any handshake deals, verbal agreements, or contract \
                 templates you found online that have not been reviewed by an attorney?",
                "Handshake deals offer zero legal protection in a dispute. Online templates are \
                 written for generic situations and almost never address your specific industry \
                 risks, state laws, or business model. They create a false sense of security \
                 that disappears the moment you need to enforce them.",
                [
                    (
                        "green",
                        "No. All my client relationships are governed by written contracts that \
                         have been reviewed by an attorney.",
                        3,
                        false,
                    ),
                    (
                        "yellow",
                        "Most clients are under contract, but I have a few relationships based \
                         on verbal agreements or generic templates.",
                        2,
                        false,
                    ),
                    (
                        "red",
                        "Yes. I regularly work on handshake deals or use templates I have not \
                         had reviewed.",
                        1,
                        true,
                    ),
                ],
            ),
        ],
    )
}

fn ownership_module() -> Module {
    module(
        "ownership",
        "Ownership & Governance",
        "4 questions that determine if your business can survive a partner dispute, exit, or \
         crisis",
        vec![
            question(
                "q5",
                "ownership",
                "Does your business have a current, signed operating agreement (LLC) or \
                 shareholder agreement (corporation) that all owners have reviewed and agreed \
                 to?",
                "Without a written agreement, your state's default rules govern your business. \
                 Those defaults were not written with your specific situation in mind. They can \
                 give a 1% owner blocking power, create ambiguity about profit splits, and \
                 leave you with no process for resolving disputes. This is the single most \
                 important legal document for any business with more than one owner.",
                [
                    (
                        "green",
                        "Yes. We have a signed, current agreement that all owners understand and \
                         have reviewed.",
                        3,
                        false,
                    ),
                    (
                        "yellow",
                        "We have an agreement, but it is outdated, or some owners have not \
                         reviewed it.",
                        2,
                        false,
                    ),
                    (
                        "red",
                        "No. We have no written ownership agreement, or we are using a generic \
                         template we never customized.",
                        1,
                        true,
                    ),
                ],
            ),
            question(
                "q6",
                "ownership",
                "Does your agreement include buy-sell provisions that define exactly what happens \
                 when an owner wants to leave, becomes disabled, goes through a divorce, or \
                 passes away?",
                "Without buy-sell provisions, an owner leaving the business can trigger a forced \
                 dissolution. An owner's death could mean you are suddenly in business with \
                 their spouse or heirs. An owner's divorce could give their ex-spouse a claim \
                 to part of the company. These are not hypothetical risks. They happen \
                 constantly, and businesses without buyout provisions rarely survive them.",
                [
                    (
                        "green",
                        "Yes. Our agreement addresses voluntary departure, death, disability, \
                         divorce, and termination for cause with a clear valuation and transfer \
                         process.",
                        3,
                        false,
                    ),
                    (
                        "yellow",
                        "We have some buyout language, but it does not cover all scenarios, or \
                         the valuation method is unclear.",
                        2,
                        false,
                    ),
                    (
                        "red",
                        "No. We have no buy-sell provisions, or I do not know if we do.",
                        1,
                        true,
                    ),
                ],
            ),
            question(
                "q7",
                "ownership",
                "Is decision-making authority clearly defined in your agreement, including who \
                 can make day-to-day decisions, what requires a vote, and what happens if owners \
                 reach a deadlock?",
                "When two 50/50 partners disagree and there is no deadlock resolution mechanism, \
                 the business can become paralyzed. No one can sign contracts, hire, fire, or \
                 make financial decisions. Without clear authority structure, a single \
                 disagreement can shut down operations and ultimately force a judicial \
                 dissolution of the entire company.",
                [
                    (
                        "green",
                        "Yes. Our agreement defines day-to-day authority, major decision \
                         thresholds, and has a deadlock resolution process.",
                        3,
                        false,
                    ),
                    (
                        "yellow",
                        "We have general roles, but major decision authority and deadlock \
                         resolution are not clearly documented.",
                        2,
                        false,
                    ),
                    (
                        "red",
                        "No. Decision-making is informal, or we have no process for resolving \
                         disagreements between owners.",
                        1,
                        true,
                    ),
                ],
            ),
            question(
                "q8",
                "ownership",
                "Does your current entity structure (LLC, S-Corp, C-Corp, partnership) still \
                 match the way your business operates today, including how income is \
                 distributed, and taxes are filed?",
                "Businesses evolve. An entity structure that made sense at launch may be costing \
                 you tens of thousands in unnecessary taxes, creating personal liability \
                 exposure, or limiting your ability to bring on investors or sell the business. \
                 Mismatched entity structures are one of the most expensive and overlooked \
                 problems because the cost is invisible until you try to raise capital, sell, \
                 or get audited.",
                [
                    (
                        "green",
                        "Yes. We have reviewed our entity structure with a tax and legal \
                         professional within the past two years and it still fits.",
                        3,
                        false,
                    ),
                    (
                        "yellow",
                        "I think it still works, but we have not reviewed it since we set it \
                         up.",
                        2,
                        false,
                    ),
                    (
                        "red",
                        "I am not sure if our entity structure is optimal, or our business has \
                         changed significantly since we formed.",
                        1,
                        true,
                    ),
                ],
            ),
        ],
    )
}

fn vendors_module() -> Module {
    module(
        "vendors",
        "Vendors",
        "4 questions that expose whether your supply chain and contractor relationships are a \
         liability",
        vec![
            question(
                "q9",
                "vendors",
                "Are signed subcontractor agreements in place with every subcontractor before \
                 they begin any work on your projects?",
                "A subcontractor working without a signed agreement exposes you to disputes over \
                 scope, payment, quality, and timeline with zero documentation to protect your \
                 position. If that subcontractor injures someone, damages property, or fails to \
                 perform, you may be liable for everything. In construction and professional \
                 services, this is one of the fastest ways to face a six-figure claim.",
                [
                    (
                        "green",
                        "Yes. Every subcontractor signs a written agreement before any work \
                         starts, no exceptions.",
                        3,
                        false,
                    ),
                    (
                        "yellow",
                        "Most do, but we occasionally start work based on a verbal agreement or \
                         email and formalize it later.",
                        2,
                        false,
                    ),
                    (
                        "red",
                        "No. We regularly use subcontractors without signed agreements.",
                        1,
                        true,
                    ),
                ],
            ),
            question(
                "q10",
                "vendors",
                "Have you verified that your independent contractors are properly classified and \
                 would survive an IRS or state audit of their classification?",
                "Misclassifying an employee as an independent contractor is one of the most \
                 aggressively enforced compliance areas by the IRS and state agencies. If you \
                 are found to have misclassified workers, you face back taxes, penalties, \
                 unpaid benefits, and potential class action exposure. A single \
                 misclassification audit can result in six-figure liability across all \
                 similarly classified workers.",
                [
                    (
                        "green",
                        "Yes. We have reviewed our classifications with a legal or tax \
                         professional and they meet IRS and state tests.",
                        3,
                        false,
                    ),
                    (
                        "yellow",
                        "I believe they are classified correctly, but we have not had it \
                         formally reviewed.",
                        2,
                        false,
                    ),
                    (
                        "red",
                        "I am not sure if our independent contractors would pass a \
                         classification audit.",
                        1,
                        true,
                    ),
                ],
            ),
            question(
                "q11",
                "vendors",
                "Do your subcontractor and vendor agreements include indemnification provisions \
                 that protect your business if their work causes injury, property damage, or a \
                 third-party claim?",
                "Without indemnification, you absorb the financial consequences of someone \
                 else's mistakes. If a subcontractor's work causes a client injury or property \
                 damage, the client sues you. Without indemnification, you pay the judgment and \
                 have no contractual right to recover from the subcontractor who actually \
                 caused the problem.",
                [
                    (
                        "green",
                        "Yes. All subcontractor and key vendor agreements include \
                         indemnification provisions requiring them to defend and hold us \
                         harmless.",
                        3,
                        false,
                    ),
                    (
                        "yellow",
                        "Some agreements have indemnification language, but it is not \
                         consistent across all subcontractors and vendors.",
                        2,
                        false,
                    ),
                    (
                        "red",
                        "No. Our agreements do not include indemnification, or I do not know if \
                         they do.",
                        1,
                        true,
                    ),
                ],
            ),
            question(
                "q12",
                "vendors",
                "Do you collect and verify current certificates of insurance from every \
                 subcontractor before they begin work, and do you monitor expiration dates?",
                "A certificate of insurance that expired three months ago is worthless. If an \
                 uninsured subcontractor causes damage or injury on your project, their lack of \
                 coverage becomes your financial responsibility. Many businesses collect \
                 certificates once and never check again, only to discover at the worst \
                 possible moment that coverage lapsed.",
                [
                    (
                        "green",
                        "Yes. We collect current COIs before work begins, verify coverage meets \
                         our requirements, and track expiration dates.",
                        3,
                        false,
                    ),
                    (
                        "yellow",
                        "We collect COIs at the start but do not consistently track renewals or \
                         verify coverage amounts.",
                        2,
                        false,
                    ),
                    (
                        "red",
                        "No. We do not regularly collect or verify subcontractor insurance \
                         certificates.",
                        1,
                        true,
                    ),
                ],
            ),
        ],
    )
}

fn employment_module() -> Module {
    module(
        "employment",
        "Employment & Safety Compliance",
        "4 questions that reveal whether your employment practices are a lawsuit waiting to \
         happen",
        vec![
            question(
                "q13",
                "employment",
                "Does your business have a current employee handbook that reflects your state's \
                 employment laws as they exist today, not when the handbook was first written?",
                "Employment law changes constantly. Paid leave requirements, anti-harassment \
                 rules, accommodation obligations, and termination procedures vary by state and \
                 update frequently. An outdated handbook can actually work against you in court \
                 because it shows you had policies but failed to keep them current. Plaintiff \
                 attorneys look for handbook gaps first.",
                [
                    (
                        "green",
                        "Yes. Our handbook has been reviewed and updated within the past 12 \
                         months to reflect current state and federal law.",
                        3,
                        false,
                    ),
                    (
                        "yellow",
                        "We have a handbook, but it has not been updated in over a year.",
                        2,
                        false,
                    ),
                    (
                        "red",
                        "We do not have an employee handbook, or ours is significantly \
                         outdated.",
                        1,
                        true,
                    ),
                ],
            ),
            question(
                "q14",
                "employment",
                "Are your wage, hour, and overtime practices fully compliant, including proper \
                 classification of exempt versus non-exempt employees, accurate time tracking, \
                 and correct overtime calculations?",
                "Wage and hour claims are the most common type of employment lawsuit in the \
                 United States. Misclassifying a salaried employee as exempt when they do not \
                 meet the legal test, failing to pay overtime correctly, or rounding time \
                 entries the wrong way can result in class action exposure that covers every \
                 similarly situated employee. These claims often include double damages and \
                 attorney fees.",
                [
                    (
                        "green",
                        "Yes. We have had our classifications and pay practices reviewed by an \
                         employment attorney or HR professional and they are compliant.",
                        3,
                        false,
                    ),
                    (
                        "yellow",
                        "I believe we are compliant, but we have not had a formal review.",
                        2,
                        false,
                    ),
                    (
                        "red",
                        "I am not confident our classifications or overtime practices would \
                         survive an audit.",
                        1,
                        true,
                    ),
                ],
            ),
            question(
                "q15",
                "employment",
                "Does your business have a documented termination process that includes written \
                 performance records, consistent application, and a final review step before any \
                 employee is let go?",
                "Wrongful termination claims often succeed not because the termination was \
                 actually illegal, but because the employer cannot prove it was justified. \
                 Without a documented process, consistent application, and a paper trail, a \
                 terminated employee's attorney only needs to show inconsistency or missing \
                 records to build a case. The cost of defending even a weak wrongful \
                 termination claim averages $75,000 to $250,000.",
                [
                    (
                        "green",
                        "Yes. We have a documented process with written warnings, performance \
                         records, and a final review before termination.",
                        3,
                        false,
                    ),
                    (
                        "yellow",
                        "We try to document things, but the process is not consistent or some \
                         terminations happen without full records.",
                        2,
                        false,
                    ),
                    (
                        "red",
                        "No. We do not have a formal termination process, or decisions are made \
                         without documentation.",
                        1,
                        true,
                    ),
                ],
            ),
            question(
                "q16",
                "employment",
                "Do your key employees have signed confidentiality and non-solicitation \
                 agreements that protect your client relationships, proprietary information, \
                 and trade secrets?",
                "When a key employee leaves and takes your client list, your pricing data, or \
                 your best employees with them, the damage is immediate and often irreversible. \
                 Without a signed confidentiality and non-solicitation agreement, you have very \
                 limited legal ability to stop them. These agreements need to be in place \
                 before the information is shared, not after someone gives notice.",
                [
                    (
                        "green",
                        "Yes. All key employees have signed enforceable confidentiality and \
                         non-solicitation agreements.",
                        3,
                        false,
                    ),
                    (
                        "yellow",
                        "Some employees have signed agreements, but coverage is not consistent \
                         across all key roles.",
                        2,
                        false,
                    ),
                    (
                        "red",
                        "No. We do not have confidentiality or non-solicitation agreements in \
                         place.",
                        1,
                        true,
                    ),
                ],
            ),
        ],
    )
}

fn insurance_module() -> Module {
    module(
        "insurance",
        "Insurance and Risk Management",
        "4 questions that determine whether your insurance will protect you when it matters",
        vec![
            question(
                "q17",
                "insurance",
                "Has your business insurance coverage been reviewed in the past 12 months to \
                 verify it matches your current operations, revenue level, and actual risk \
                 exposure?",
                "Most businesses buy insurance when they launch and never update it. If your \
                 revenue has doubled, you have added services, hired employees, or expanded \
                 locations, your original policy may not cover your current exposure. \
                 Discovering a coverage gap after a claim is filed is the most expensive way to \
                 find out your policy is outdated.",
                [
                    (
                        "green",
                        "Yes. Our coverage has been reviewed within the past 12 months and \
                         adjusted to match current operations.",
                        3,
                        false,
                    ),
                    (
                        "yellow",
                        "We have insurance, but it has not been reviewed against our current \
                         operations recently.",
                        2,
                        false,
                    ),
                    (
                        "red",
                        "No. Our coverage has not been reviewed since we purchased it, or our \
                         business has changed significantly since then.",
                        1,
                        true,
                    ),
                ],
            ),
            question(
                "q18",
                "insurance",
                "Do your customer and vendor contracts align with what your insurance covers? \
                 For example, if your contract promises to indemnify a client, does your \
                 insurance cover that obligation?",
                "It is common for businesses to sign contracts with indemnification or insurance \
                 requirements that exceed what their policy covers. You are contractually \
                 promising protection that does not exist. When a claim arises and the \
                 insurance company denies it because the obligation was outside your coverage \
                 terms, you pay the full amount out of pocket.",
                [
                    (
                        "green",
                        "Yes. Our attorney and insurance broker have reviewed our contracts \
                         together to ensure alignment.",
                        3,
                        false,
                    ),
                    (
                        "yellow",
                        "I think they align, but no one has formally compared our contract \
                         obligations to our policy.",
                        2,
                        false,
                    ),
                    (
                        "red",
                        "No. I have never compared my contract obligations to my actual \
                         insurance coverage.",
                        1,
                        true,
                    ),
                ],
            ),
            question(
                "q19",
                "insurance",
                "Does your business have a documented incident response procedure so that your \
                 team knows exactly what to do in the first 24 hours after an accident, injury, \
                 property damage, or client complaint?",
                "The first 24 hours after an incident determine whether your insurance claim \
                 succeeds or fails and whether your legal exposure grows or shrinks. Delayed \
                 reporting, destroyed evidence, inconsistent statements, and social media posts \
                 by employees can all undermine your defense. A documented procedure ensures \
                 the right steps happen immediately, not after the damage is done.",
                [
                    (
                        "green",
                        "Yes. We have a written incident response procedure that employees have \
                         been trained on.",
                        3,
                        false,
                    ),
                    (
                        "yellow",
                        "We have an informal understanding of what to do, but nothing \
                         documented or trained.",
                        2,
                        false,
                    ),
                    ("red", "No. We have no incident response procedure.", 1, true),
                ],
            ),
            question(
                "q20",
                "insurance",
                "Have you identified any gaps in your insurance coverage before an emergency, \
                 such as exclusions for specific types of work, geographic limitations, or \
                 coverage caps that are too low for your actual exposure?",
                "Every insurance policy has exclusions, caps, and limitations. The businesses \
                 that get hurt are the ones who discover those gaps when filing a claim. A \
                 proactive coverage gap analysis costs very little compared to discovering \
                 after a $500,000 claim that your policy caps out at $250,000 or excludes the \
                 specific type of work that caused the loss.",
                [
                    (
                        "green",
                        "Yes. We have done a coverage gap analysis and addressed identified \
                         limitations.",
                        3,
                        false,
                    ),
                    (
                        "yellow",
                        "I am aware of some limitations but have not done a comprehensive \
                         review.",
                        2,
                        false,
                    ),
                    (
                        "red",
                        "No. I do not know what my policy excludes or where my coverage gaps \
                         are.",
                        1,
                        true,
                    ),
                ],
            ),
        ],
    )
}

fn systems_module() -> Module {
    module(
        "systems",
        "Systems, Records & Digital Risk",
        "4 questions that reveal whether your business can survive a data breach, audit, or \
         sale",
        vec![
            question(
                "q21",
                "systems",
                "Are your critical business records (contracts, financial documents, employee \
                 files, corporate filings) organized, centrally stored, and accessible if you \
                 needed to produce them within 48 hours for an audit, lawsuit, or due diligence \
                 request?",
                "When a lawsuit, audit, or buyer due diligence request arrives, you do not get \
                 weeks to organize your records. Businesses that cannot produce clean \
                 documentation quickly lose leverage in negotiations, face sanctions in \
                 litigation, and kill potential deals. Record disorganization is also a red \
                 flag in any legal proceeding that suggests broader operational problems.",
                [
                    (
                        "green",
                        "Yes. Our records are organized, digitized, and accessible. We could \
                         produce key documents within 48 hours.",
                        3,
                        false,
                    ),
                    (
                        "yellow",
                        "Most records exist, but they are scattered across locations, people, \
                         or systems and would take time to compile.",
                        2,
                        false,
                    ),
                    (
                        "red",
                        "No. Our records are disorganized, incomplete, or I am not confident we \
                         could locate key documents quickly.",
                        1,
                        true,
                    ),
                ],
            ),
            question(
                "q22",
                "systems",
                "Does your business have data security and privacy practices in place that meet \
                 the standards for your industry, including how you collect, store, and protect \
                 customer and employee personal information?",
                "Data breach notification laws now exist in all 50 states, and many industries \
                 have specific compliance requirements (HIPAA, PCI, state consumer privacy \
                 acts). A single data breach can trigger mandatory notifications, regulatory \
                 investigations, class action lawsuits, and reputational damage. The average \
                 cost of a data breach for a small business is enough to close the doors \
                 permanently.",
                [
                    (
                        "green",
                        "Yes. We have documented data security practices, and they have been \
                         reviewed for compliance with applicable laws and industry standards.",
                        3,
                        false,
                    ),
                    (
                        "yellow",
                        "We have some security measures in place, but they have not been \
                         formally reviewed for compliance.",
                        2,
                        false,
                    ),
                    (
                        "red",
                        "No. We do not have documented data security practices, or I am not \
                         sure what our obligations are.",
                        1,
                        true,
                    ),
                ],
            ),
            question(
                "q23",
                "systems",
                "Does your business have access controls that restrict who can view, edit, or \
                 download sensitive information like financial records, client data, employee \
                 files, and proprietary business information?",
                "Most internal data breaches and information theft happen because everyone has \
                 access to everything. When a disgruntled employee, departing partner, or \
                 compromised account can access all of your sensitive information without \
                 restriction, the damage potential is unlimited. Access controls are the \
                 difference between a contained problem and a catastrophic one.",
                [
                    (
                        "green",
                        "Yes. We have role-based access controls that limit who can view and \
                         download sensitive data.",
                        3,
                        false,
                    ),
                    (
                        "yellow",
                        "We have some access restrictions, but most people can access most \
                         systems.",
                        2,
                        false,
                    ),
                    (
                        "red",
                        "No. Everyone in the company has access to essentially everything.",
                        1,
                        true,
                    ),
                ],
            ),
            question(
                "q24",
                "systems",
                "If your business were to be sold, acquired, or face a legal dispute tomorrow, \
                 could you produce a complete set of corporate records, executed contracts, \
                 financial statements, and compliance documentation within two weeks?",
                "Whether you are selling the business, defending a lawsuit, or responding to a \
                 regulatory inquiry, your ability to produce organized documentation determines \
                 your outcome. Buyers walk away from deals when records are incomplete. Judges \
                 penalize parties that cannot produce evidence. Regulators assume the worst \
                 when documentation is missing. This question tests the overall health of your \
                 entire records system.",
                [
                    (
                        "green",
                        "Yes. Our records are complete and organized enough that we could be \
                         due diligence ready within two weeks.",
                        3,
                        false,
                    ),
                    (
                        "yellow",
                        "We could pull most of it together, but it would be a scramble, and \
                         some items might be missing.",
                        2,
                        false,
                    ),
                    (
                        "red",
                        "No. We are not close to being prepared for due diligence or a major \
                         document production request.",
                        1,
                        true,
                    ),
                ],
            ),
        ],
    )
}

type RiskRow = (&'static str, &'static str, &'static str, &'static str);

fn risk_entries() -> Vec<RiskRow> {
    vec![
        (
            "q1",
            "contracts",
            "Vague Contract Terms",
            "Your contracts lack clear scope, pricing, or payment terms, exposing you to \
             disputes and cash flow problems.",
        ),
        (
            "q2",
            "contracts",
            "No Change Order Process",
            "Without documented change orders, you risk doing extra work for free with no \
             billing recourse.",
        ),
        (
            "q3",
            "contracts",
            "No Liability Cap",
            "Without a liability cap, a single project could result in a company-ending \
             judgment.",
        ),
        (
            "q4",
            "contracts",
            "Relying on Handshake Deals",
            "Verbal agreements and unreviewed templates offer zero legal protection in \
             disputes.",
        ),
        (
            "q5",
            "ownership",
            "No Ownership Agreement",
            "Without a written agreement, state default rules govern your business, often \
             unfavorably.",
        ),
        (
            "q6",
            "ownership",
            "No Buy-Sell Provisions",
            "Missing buyout provisions for death, disability, or departure can force \
             dissolution.",
        ),
        (
            "q7",
            "ownership",
            "No Deadlock Resolution",
            "Without clear decision-making rules, partner disagreements can paralyze the \
             business.",
        ),
        (
            "q8",
            "ownership",
            "Mismatched Entity Structure",
            "Your entity structure may be costing you money or creating liability exposure.",
        ),
        (
            "q9",
            "vendors",
            "No Subcontractor Agreements",
            "Working without signed agreements exposes you to disputes and liability for their \
             actions.",
        ),
        (
            "q10",
            "vendors",
            "Contractor Misclassification Risk",
            "Misclassifying workers can result in six-figure liability in an IRS or state \
             audit.",
        ),
        (
            "q11",
            "vendors",
            "No Indemnification Protection",
            "Without indemnification, you pay for others' mistakes with no recovery rights.",
        ),
        (
            "q12",
            "vendors",
            "Unverified Insurance Coverage",
            "Uninsured subcontractors make you financially responsible for their damages.",
        ),
        (
            "q13",
            "employment",
            "Outdated Employee Handbook",
            "An outdated or missing handbook can work against you in employment lawsuits.",
        ),
        (
            "q14",
            "employment",
            "Wage & Hour Compliance Risk",
            "Wage misclassification is the most common employment lawsuit, with double \
             damages.",
        ),
        (
            "q15",
            "employment",
            "No Termination Documentation",
            "Missing documentation makes wrongful termination claims easier to pursue.",
        ),
        (
            "q16",
            "employment",
            "No Employee Protections",
            "Missing confidentiality agreements leave you vulnerable when key employees leave.",
        ),
        (
            "q17",
            "insurance",
            "Outdated Insurance Coverage",
            "Your policy may not cover your current operations, revenue, or risk exposure.",
        ),
        (
            "q18",
            "insurance",
            "Contract-Insurance Mismatch",
            "You may be contractually promising coverage that your insurance doesn't provide.",
        ),
        (
            "q19",
            "insurance",
            "No Incident Response Plan",
            "Poor incident handling in the first 24 hours can undermine your insurance claim.",
        ),
        (
            "q20",
            "insurance",
            "Unknown Coverage Gaps",
            "Policy exclusions and limits you don't know about will hurt you when you file a \
             claim.",
        ),
        (
            "q21",
            "systems",
            "Disorganized Records",
            "You cannot produce key documents quickly for audits, lawsuits, or due diligence.",
        ),
        (
            "q22",
            "systems",
            "Inadequate Data Security",
            "A data breach without proper security can close your business permanently.",
        ),
        (
            "q23",
            "systems",
            "No Access Controls",
            "Everyone having access to everything maximizes damage potential from any breach.",
        ),
        (
            "q24",
            "systems",
            "Not Due Diligence Ready",
            "Incomplete records can kill deals, lose lawsuits, and invite regulatory problems.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v1_catalog_has_six_modules_of_four_questions() {
        let catalog = Catalog::business_legal_v1();
        assert_eq!(catalog.modules.len(), 6);
        for module in &catalog.modules {
            assert_eq!(module.questions.len(), 4, "module {}", module.id);
            assert_eq!(module.max_score(), 12);
            for question in &module.questions {
                assert_eq!(question.module, module.id);
                assert_eq!(question.max_points(), 3);
                assert_eq!(question.min_points(), 1);
                let flagged: Vec<_> = question
                    .options
                    .iter()
                    .filter(|option| option.trigger_flag)
                    .collect();
                assert_eq!(flagged.len(), 1, "question {}", question.id);
                assert_eq!(flagged[0].points, 1);
            }
        }
    }

    #[test]
    fn every_question_resolves_to_a_risk_entry() {
        let catalog = Catalog::business_legal_v1();
        assert_eq!(catalog.risks.len(), 24);
        for module in &catalog.modules {
            for question in &module.questions {
                let key = catalog
                    .resolver
                    .resolve(&question.id, "red")
                    .unwrap_or_else(|| panic!("question {} has no risk key", question.id));
                let entry = catalog.risks.get(key).expect("risk entry exists");
                assert_eq!(entry.module, module.id);
                assert!(!entry.title.is_empty());
            }
        }
    }

    #[test]
    fn module_lookup_by_id_and_question() {
        let catalog = Catalog::business_legal_v1();
        let contracts = catalog
            .module(&ModuleId::new("contracts"))
            .expect("contracts module exists");
        assert_eq!(contracts.name, "Customer Contracts & Project Risks");

        let owner = catalog
            .module_of(&QuestionId::new("q6"))
            .expect("q6 belongs to a module");
        assert_eq!(owner.id, ModuleId::new("ownership"));

        assert!(catalog.module(&ModuleId::new("nope")).is_none());
        assert!(catalog.question(&QuestionId::new("q99")).is_none());
    }
}
