use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for catalog modules (topical question groups).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleId(pub String);

impl ModuleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for catalog questions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(pub String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier for a stored assessment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

impl fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier for a captured lead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeadId(pub String);

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Three-valued risk tier surfaced to clients as green/yellow/red.
///
/// The ordering is by severity so that tier floors can be applied with `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Green,
    Yellow,
    Red,
}

impl RiskTier {
    pub const fn label(self) -> &'static str {
        match self {
            RiskTier::Green => "green",
            RiskTier::Yellow => "yellow",
            RiskTier::Red => "red",
        }
    }
}

/// Severity tag attached to a top risk entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
}

/// Urgency tag attached to an action plan item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    High,
    Medium,
}

/// A respondent's answer to a single question.
///
/// Points and the trigger flag are trusted as submitted; the catalog is
/// consulted only for ranking and risk lookups. This is a deliberate trust
/// boundary inherited from the questionnaire client owning the option data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: QuestionId,
    pub answer_value: String,
    pub points: i64,
    #[serde(default)]
    pub trigger_flag: bool,
}

/// Per-module score breakdown included in a [`ScoreResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleScore {
    pub module_id: ModuleId,
    pub module_name: String,
    pub score: i64,
    pub max_score: i64,
    pub risk_level: RiskTier,
    pub trigger_flags: Vec<QuestionId>,
}

/// A flagged or low-scoring answer enriched from the risk catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopRisk {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub module: ModuleId,
    pub module_name: String,
}

/// One entry of the prioritized remediation plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub priority: u32,
    pub action: String,
    pub description: String,
    pub urgency: Urgency,
}

/// Complete scoring outcome for one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub total_score: i64,
    pub max_possible_score: i64,
    pub score_percentage: f64,
    pub risk_level: RiskTier,
    pub module_scores: Vec<ModuleScore>,
    pub trigger_flags: Vec<QuestionId>,
    pub top_risks: Vec<TopRisk>,
    pub action_plan: Vec<ActionItem>,
    pub confidence_level: i64,
}

/// A stored assessment session.
///
/// Created pending, optionally accumulating partial answers through progress
/// saves, then completed exactly once on submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: AssessmentId,
    pub modules: Vec<ModuleId>,
    pub answers: Vec<SubmittedAnswer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_index: Option<u32>,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ScoreResult>,
    pub created_at: DateTime<Utc>,
}

/// Contact details captured from the lead form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub business_name: String,
    pub region: String,
    pub modules: Vec<ModuleId>,
    pub situation: String,
    #[serde(default)]
    pub assessment_id: Option<AssessmentId>,
}

/// A persisted lead record.
///
/// The score/risk/top-risk fields are a denormalized snapshot taken at
/// creation time when the referenced assessment exists and is completed;
/// they are never kept in sync afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub business_name: String,
    pub region: String,
    pub modules: Vec<ModuleId>,
    pub situation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment_id: Option<AssessmentId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<String>,
    pub top_risks: Vec<String>,
    pub created_at: DateTime<Utc>,
}
