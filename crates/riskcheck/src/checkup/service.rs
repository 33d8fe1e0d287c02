use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::catalog::{Catalog, Module};
use super::domain::{
    Assessment, AssessmentId, Lead, LeadId, LeadRequest, ModuleId, QuestionId, ScoreResult,
    SubmittedAnswer,
};
use super::repository::{AssessmentRepository, LeadRepository, RepositoryError};
use super::scoring::ScoringEngine;

/// Service composing the catalog, scoring engine, and injected repositories.
///
/// Storage is an explicit constructor dependency; there is no global handle
/// and no lazy initialization.
pub struct CheckupService<A, L> {
    catalog: Arc<Catalog>,
    engine: ScoringEngine,
    assessments: Arc<A>,
    leads: Arc<L>,
}

/// Upper bound on admin lead listings and exports.
const LEAD_LISTING_LIMIT: usize = 1000;

impl<A, L> CheckupService<A, L>
where
    A: AssessmentRepository + 'static,
    L: LeadRepository + 'static,
{
    pub fn new(catalog: Arc<Catalog>, assessments: Arc<A>, leads: Arc<L>) -> Self {
        let engine = ScoringEngine::new(catalog.clone());
        Self {
            catalog,
            engine,
            assessments,
            leads,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn modules(&self) -> &[Module] {
        &self.catalog.modules
    }

    pub fn module(&self, id: &ModuleId) -> Result<&Module, CheckupServiceError> {
        self.catalog
            .module(id)
            .ok_or_else(|| CheckupServiceError::UnknownModule(id.clone()))
    }

    /// Create a pending assessment for the requested modules.
    pub fn create_assessment(
        &self,
        modules: Vec<ModuleId>,
    ) -> Result<Assessment, CheckupServiceError> {
        for module in &modules {
            if self.catalog.module(module).is_none() {
                return Err(CheckupServiceError::UnknownModule(module.clone()));
            }
        }

        let assessment = Assessment {
            id: AssessmentId(Uuid::new_v4().to_string()),
            modules,
            answers: Vec::new(),
            progress_index: None,
            completed: false,
            result: None,
            created_at: Utc::now(),
        };
        let stored = self.assessments.insert(assessment)?;
        Ok(stored)
    }

    pub fn assessment(&self, id: &AssessmentId) -> Result<Assessment, CheckupServiceError> {
        let assessment = self.assessments.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(assessment)
    }

    /// Store partial answers on a pending assessment.
    pub fn save_progress(
        &self,
        id: &AssessmentId,
        answers: Vec<SubmittedAnswer>,
        progress_index: Option<u32>,
    ) -> Result<(), CheckupServiceError> {
        let assessment = self.assessments.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        if assessment.completed {
            return Err(RepositoryError::Conflict.into());
        }
        validate_answers(&self.catalog, &assessment.modules, &answers)?;
        self.assessments.save_progress(id, answers, progress_index)?;
        Ok(())
    }

    /// Score a full answer set and complete the assessment.
    ///
    /// Completion is conditional in the repository, so a second submit for
    /// the same id fails with a conflict instead of overwriting the result.
    pub fn submit(
        &self,
        id: &AssessmentId,
        answers: Vec<SubmittedAnswer>,
    ) -> Result<ScoreResult, CheckupServiceError> {
        let assessment = self.assessments.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        validate_answers(&self.catalog, &assessment.modules, &answers)?;

        let result = self.engine.score(&answers, &assessment.modules);
        self.assessments.complete(id, answers, result.clone())?;
        Ok(result)
    }

    /// Persist a lead, denormalizing the referenced assessment's outcome
    /// when it exists and is completed. A dangling assessment id still
    /// creates the lead with the snapshot fields unset.
    pub fn create_lead(&self, request: LeadRequest) -> Result<Lead, CheckupServiceError> {
        validate_lead(&request)?;

        let mut lead = Lead {
            id: LeadId(Uuid::new_v4().to_string()),
            name: request.name,
            email: request.email,
            phone: request.phone,
            business_name: request.business_name,
            region: request.region,
            modules: request.modules,
            situation: request.situation,
            assessment_id: request.assessment_id,
            score: None,
            risk_level: None,
            top_risks: Vec::new(),
            created_at: Utc::now(),
        };

        if let Some(assessment_id) = &lead.assessment_id {
            if let Some(assessment) = self.assessments.fetch(assessment_id)? {
                if assessment.completed {
                    if let Some(result) = assessment.result {
                        lead.score = Some(format!("{:.1}%", result.score_percentage));
                        lead.risk_level = Some(result.risk_level.label().to_string());
                        lead.top_risks = result
                            .top_risks
                            .into_iter()
                            .map(|risk| risk.title)
                            .collect();
                    }
                }
            }
        }

        let stored = self.leads.insert(lead)?;
        Ok(stored)
    }

    /// Admin listing, newest first.
    pub fn leads(&self) -> Result<Vec<Lead>, CheckupServiceError> {
        let leads = self.leads.list_recent(LEAD_LISTING_LIMIT)?;
        Ok(leads)
    }
}

/// Answers must reference questions of the selected modules, each at most
/// once. Points and trigger flags remain trusted as submitted.
fn validate_answers(
    catalog: &Catalog,
    modules: &[ModuleId],
    answers: &[SubmittedAnswer],
) -> Result<(), ValidationError> {
    let selected: HashSet<&ModuleId> = modules.iter().collect();
    let mut seen: HashSet<&QuestionId> = HashSet::new();

    for answer in answers {
        if !seen.insert(&answer.question_id) {
            return Err(ValidationError::DuplicateQuestion(answer.question_id.clone()));
        }
        let owner = catalog.module_of(&answer.question_id);
        let in_selection = owner.is_some_and(|module| selected.contains(&module.id));
        if !in_selection {
            return Err(ValidationError::QuestionOutsideModules(
                answer.question_id.clone(),
            ));
        }
    }
    Ok(())
}

fn validate_lead(request: &LeadRequest) -> Result<(), ValidationError> {
    if request.name.trim().is_empty() {
        return Err(ValidationError::MissingField("name"));
    }
    if request.email.trim().is_empty() {
        return Err(ValidationError::MissingField("email"));
    }
    if !plausible_email(&request.email) {
        return Err(ValidationError::InvalidEmail(request.email.clone()));
    }
    Ok(())
}

fn plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Rejections for submissions that do not match the catalog or form rules.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("question '{0}' is not part of the selected modules")]
    QuestionOutsideModules(QuestionId),
    #[error("question '{0}' was answered more than once")]
    DuplicateQuestion(QuestionId),
    #[error("{0} must not be empty")]
    MissingField(&'static str),
    #[error("email address '{0}' is not valid")]
    InvalidEmail(String),
}

/// Error raised by the checkup service.
#[derive(Debug, thiserror::Error)]
pub enum CheckupServiceError {
    #[error("module '{0}' not found")]
    UnknownModule(ModuleId),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
