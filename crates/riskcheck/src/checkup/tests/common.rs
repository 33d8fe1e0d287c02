use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::checkup::catalog::{AnswerOption, Catalog, Module, Question, RiskCatalog, RiskEntry};
use crate::checkup::domain::{
    Assessment, AssessmentId, Lead, LeadRequest, ModuleId, QuestionId, ScoreResult,
    SubmittedAnswer,
};
use crate::checkup::repository::{
    AssessmentRepository, LeadRepository, RepositoryError,
};
use crate::checkup::resolver::{ResolverPolicy, RiskKey};
use crate::checkup::router::{checkup_router, AdminAccess};
use crate::checkup::scoring::{
    FlagOverrides, MaxScorePolicy, ScorePolarity, ScoringConfig, ScoringEngine, TierThresholds,
};
use crate::checkup::service::CheckupService;

pub(super) fn catalog() -> Arc<Catalog> {
    Arc::new(Catalog::business_legal_v1())
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new(catalog())
}

pub(super) fn all_module_ids(catalog: &Catalog) -> Vec<ModuleId> {
    catalog.modules.iter().map(|module| module.id.clone()).collect()
}

pub(super) fn answer(
    question_id: &str,
    value: &str,
    points: i64,
    trigger_flag: bool,
) -> SubmittedAnswer {
    SubmittedAnswer {
        question_id: QuestionId::new(question_id),
        answer_value: value.to_string(),
        points,
        trigger_flag,
    }
}

/// One answer per question of the selected modules, choosing the option with
/// the given value token.
pub(super) fn answers_with_value(
    catalog: &Catalog,
    modules: &[ModuleId],
    value: &str,
) -> Vec<SubmittedAnswer> {
    modules
        .iter()
        .filter_map(|id| catalog.module(id))
        .flat_map(|module| module.questions.iter())
        .map(|question| {
            let option = question
                .options
                .iter()
                .find(|option| option.value == value)
                .expect("option value exists");
            SubmittedAnswer {
                question_id: question.id.clone(),
                answer_value: option.value.clone(),
                points: option.points,
                trigger_flag: option.trigger_flag,
            }
        })
        .collect()
}

/// All-green answers with the first `red_count` questions downgraded to red.
pub(super) fn answers_with_reds(
    catalog: &Catalog,
    modules: &[ModuleId],
    red_count: usize,
) -> Vec<SubmittedAnswer> {
    let mut answers = answers_with_value(catalog, modules, "green");
    for answer in answers.iter_mut().take(red_count) {
        let question = catalog.question(&answer.question_id).expect("known question");
        let red = question
            .options
            .iter()
            .find(|option| option.value == "red")
            .expect("red option exists");
        answer.answer_value = red.value.clone();
        answer.points = red.points;
        answer.trigger_flag = red.trigger_flag;
    }
    answers
}

/// Two-question catalog scored with the inverted convention: higher points
/// mean more exposure, and only the worst answer values resolve to risks.
pub(super) fn inverted_catalog() -> Arc<Catalog> {
    let options = |flag_worst: bool| {
        vec![
            AnswerOption {
                value: "low".to_string(),
                label: "Exposure is contained".to_string(),
                points: 0,
                trigger_flag: false,
            },
            AnswerOption {
                value: "mid".to_string(),
                label: "Exposure is partially contained".to_string(),
                points: 4,
                trigger_flag: false,
            },
            AnswerOption {
                value: "high".to_string(),
                label: "Exposure is uncontained".to_string(),
                points: 10,
                trigger_flag: flag_worst,
            },
        ]
    };

    let module = Module {
        id: ModuleId::new("exposure"),
        name: "Exposure".to_string(),
        description: "Inverted-convention demo module".to_string(),
        questions: vec![
            Question {
                id: QuestionId::new("e1"),
                prompt: "How much uninsured exposure do you carry?".to_string(),
                rationale: String::new(),
                module: ModuleId::new("exposure"),
                options: options(true),
            },
            Question {
                id: QuestionId::new("e2"),
                prompt: "How much unresolved litigation do you carry?".to_string(),
                rationale: String::new(),
                module: ModuleId::new("exposure"),
                options: options(true),
            },
        ],
    };

    let mut risks = RiskCatalog::default();
    let mut map = BTreeMap::new();
    for question in ["e1", "e2"] {
        let key = RiskKey::new(format!("{question}-high"));
        map.insert(
            (QuestionId::new(question), "high".to_string()),
            key.clone(),
        );
        risks.insert(
            key,
            RiskEntry {
                module: ModuleId::new("exposure"),
                title: format!("Uncontained exposure ({question})"),
                description: "Exposure is uncapped and uninsured.".to_string(),
            },
        );
    }

    Arc::new(Catalog {
        version: "inverted-test".to_string(),
        modules: vec![module],
        risks,
        resolver: ResolverPolicy::ValueKeyed(map),
        scoring: ScoringConfig {
            polarity: ScorePolarity::HigherIsWorse,
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
    })
}

pub(super) fn lead_request(assessment_id: Option<AssessmentId>) -> LeadRequest {
    LeadRequest {
        name: "Dana Whitfield".to_string(),
        email: "dana@whitfieldbuilt.com".to_string(),
        phone: "(515) 555-0144".to_string(),
        business_name: "Whitfield Built LLC".to_string(),
        region: "Iowa".to_string(),
        modules: vec![ModuleId::new("contracts")],
        situation: "Two partners, no operating agreement".to_string(),
        assessment_id,
    }
}

pub(super) type TestService = CheckupService<MemoryAssessments, MemoryLeads>;

pub(super) fn build_service() -> (Arc<TestService>, Arc<MemoryAssessments>, Arc<MemoryLeads>) {
    let assessments = Arc::new(MemoryAssessments::default());
    let leads = Arc::new(MemoryLeads::default());
    let service = Arc::new(CheckupService::new(
        catalog(),
        assessments.clone(),
        leads.clone(),
    ));
    (service, assessments, leads)
}

pub(super) fn router_with(service: Arc<TestService>, admin: AdminAccess) -> axum::Router {
    checkup_router(service, admin)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[derive(Default)]
pub(super) struct MemoryAssessments {
    records: Mutex<HashMap<AssessmentId, Assessment>>,
}

impl AssessmentRepository for MemoryAssessments {
    fn insert(&self, assessment: Assessment) -> Result<Assessment, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&assessment.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(assessment.id.clone(), assessment.clone());
        Ok(assessment)
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn save_progress(
        &self,
        id: &AssessmentId,
        answers: Vec<SubmittedAnswer>,
        progress_index: Option<u32>,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let assessment = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        if assessment.completed {
            return Err(RepositoryError::Conflict);
        }
        assessment.answers = answers;
        assessment.progress_index = progress_index;
        Ok(())
    }

    fn complete(
        &self,
        id: &AssessmentId,
        answers: Vec<SubmittedAnswer>,
        result: ScoreResult,
    ) -> Result<Assessment, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let assessment = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        if assessment.completed {
            return Err(RepositoryError::Conflict);
        }
        assessment.answers = answers;
        assessment.completed = true;
        assessment.result = Some(result);
        Ok(assessment.clone())
    }
}

#[derive(Default)]
pub(super) struct MemoryLeads {
    records: Mutex<Vec<Lead>>,
}

impl MemoryLeads {
    pub(super) fn stored(&self) -> Vec<Lead> {
        self.records.lock().expect("lead mutex poisoned").clone()
    }
}

impl LeadRepository for MemoryLeads {
    fn insert(&self, lead: Lead) -> Result<Lead, RepositoryError> {
        self.records
            .lock()
            .expect("lead mutex poisoned")
            .push(lead.clone());
        Ok(lead)
    }

    fn list_recent(&self, limit: usize) -> Result<Vec<Lead>, RepositoryError> {
        let guard = self.records.lock().expect("lead mutex poisoned");
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}

pub(super) struct UnavailableAssessments;

impl AssessmentRepository for UnavailableAssessments {
    fn insert(&self, _assessment: Assessment) -> Result<Assessment, RepositoryError> {
        Err(RepositoryError::Unavailable("storage offline".to_string()))
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError> {
        Err(RepositoryError::Unavailable("storage offline".to_string()))
    }

    fn save_progress(
        &self,
        _id: &AssessmentId,
        _answers: Vec<SubmittedAnswer>,
        _progress_index: Option<u32>,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("storage offline".to_string()))
    }

    fn complete(
        &self,
        _id: &AssessmentId,
        _answers: Vec<SubmittedAnswer>,
        _result: ScoreResult,
    ) -> Result<Assessment, RepositoryError> {
        Err(RepositoryError::Unavailable("storage offline".to_string()))
    }
}

pub(super) struct UnavailableLeads;

impl LeadRepository for UnavailableLeads {
    fn insert(&self, _lead: Lead) -> Result<Lead, RepositoryError> {
        Err(RepositoryError::Unavailable("storage offline".to_string()))
    }

    fn list_recent(&self, _limit: usize) -> Result<Vec<Lead>, RepositoryError> {
        Err(RepositoryError::Unavailable("storage offline".to_string()))
    }
}
