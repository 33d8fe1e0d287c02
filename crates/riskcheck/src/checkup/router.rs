use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{
    ActionItem, AssessmentId, LeadRequest, ModuleId, ModuleScore, QuestionId, RiskTier,
    ScoreResult, SubmittedAnswer, TopRisk,
};
use super::export::leads_to_csv;
use super::repository::{AssessmentRepository, LeadRepository, RepositoryError};
use super::service::{CheckupService, CheckupServiceError};

/// Shared-secret gate for the admin endpoints.
///
/// When no key is configured the endpoints are open, matching the MVP
/// deployment mode. The comparison runs over every byte so the check does
/// not leak the matching prefix length.
pub struct AdminAccess {
    key: Option<String>,
}

impl AdminAccess {
    pub fn new(key: Option<String>) -> Self {
        Self { key }
    }

    pub fn open() -> Self {
        Self { key: None }
    }

    pub fn authorize(&self, headers: &HeaderMap, query: &HashMap<String, String>) -> bool {
        let Some(expected) = &self.key else {
            return true;
        };
        let provided = headers
            .get("x-admin-key")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .or_else(|| query.get("admin_key").cloned());
        match provided {
            Some(provided) => constant_time_eq(provided.as_bytes(), expected.as_bytes()),
            None => false,
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Router state: the service plus the admin gate.
pub struct CheckupRouterState<A, L> {
    pub service: Arc<CheckupService<A, L>>,
    pub admin: Arc<AdminAccess>,
}

impl<A, L> Clone for CheckupRouterState<A, L> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            admin: self.admin.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateAssessmentRequest {
    pub modules: Vec<ModuleId>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitAssessmentRequest {
    pub assessment_id: AssessmentId,
    pub answers: Vec<SubmittedAnswer>,
}

#[derive(Debug, Deserialize)]
pub struct SaveProgressRequest {
    pub answers: Vec<SubmittedAnswer>,
    #[serde(default)]
    pub progress_index: Option<u32>,
}

/// Scored summary returned from a submission, with the stable wire names.
#[derive(Debug, Serialize)]
pub struct SubmissionView {
    pub assessment_id: AssessmentId,
    pub total_score: i64,
    pub max_possible_score: i64,
    pub score_percentage: f64,
    pub risk_level: RiskTier,
    pub confidence_level: i64,
    pub module_scores: Vec<ModuleScore>,
    pub trigger_flags: Vec<QuestionId>,
    pub top_risks: Vec<TopRisk>,
    pub action_plan: Vec<ActionItem>,
}

impl SubmissionView {
    fn from_result(assessment_id: AssessmentId, result: ScoreResult) -> Self {
        Self {
            assessment_id,
            total_score: result.total_score,
            max_possible_score: result.max_possible_score,
            score_percentage: result.score_percentage,
            risk_level: result.risk_level,
            confidence_level: result.confidence_level,
            module_scores: result.module_scores,
            trigger_flags: result.trigger_flags,
            top_risks: result.top_risks,
            action_plan: result.action_plan,
        }
    }
}

/// Router builder exposing the questionnaire, assessment, lead, and admin
/// endpoints.
pub fn checkup_router<A, L>(service: Arc<CheckupService<A, L>>, admin: AdminAccess) -> Router
where
    A: AssessmentRepository + 'static,
    L: LeadRepository + 'static,
{
    let state = CheckupRouterState {
        service,
        admin: Arc::new(admin),
    };
    Router::new()
        .route("/api/v1/checkup/questions", get(questions_handler::<A, L>))
        .route(
            "/api/v1/checkup/questions/:module",
            get(module_handler::<A, L>),
        )
        .route(
            "/api/v1/checkup/assessments",
            post(create_assessment_handler::<A, L>),
        )
        .route(
            "/api/v1/checkup/assessments/submit",
            post(submit_handler::<A, L>),
        )
        .route(
            "/api/v1/checkup/assessments/:assessment_id",
            get(assessment_handler::<A, L>),
        )
        .route(
            "/api/v1/checkup/assessments/:assessment_id/progress",
            post(progress_handler::<A, L>),
        )
        .route("/api/v1/checkup/leads", post(lead_handler::<A, L>))
        .route(
            "/api/v1/checkup/admin/leads",
            get(admin_leads_handler::<A, L>),
        )
        .route(
            "/api/v1/checkup/admin/leads/export",
            get(export_leads_handler::<A, L>),
        )
        .with_state(state)
}

impl IntoResponse for CheckupServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            CheckupServiceError::UnknownModule(_) => StatusCode::NOT_FOUND,
            CheckupServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CheckupServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            CheckupServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
            CheckupServiceError::Repository(RepositoryError::Unavailable(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        };
        let payload = json!({ "error": self.to_string() });
        (status, axum::Json(payload)).into_response()
    }
}

pub(crate) async fn questions_handler<A, L>(
    State(state): State<CheckupRouterState<A, L>>,
) -> Response
where
    A: AssessmentRepository + 'static,
    L: LeadRepository + 'static,
{
    let catalog = state.service.catalog();
    let payload = json!({
        "version": catalog.version,
        "modules": state.service.modules(),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn module_handler<A, L>(
    State(state): State<CheckupRouterState<A, L>>,
    Path(module): Path<String>,
) -> Response
where
    A: AssessmentRepository + 'static,
    L: LeadRepository + 'static,
{
    match state.service.module(&ModuleId(module)) {
        Ok(module) => (StatusCode::OK, axum::Json(module.clone())).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn create_assessment_handler<A, L>(
    State(state): State<CheckupRouterState<A, L>>,
    axum::Json(request): axum::Json<CreateAssessmentRequest>,
) -> Response
where
    A: AssessmentRepository + 'static,
    L: LeadRepository + 'static,
{
    match state.service.create_assessment(request.modules) {
        Ok(assessment) => {
            let payload = json!({
                "id": assessment.id,
                "modules": assessment.modules,
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn submit_handler<A, L>(
    State(state): State<CheckupRouterState<A, L>>,
    axum::Json(request): axum::Json<SubmitAssessmentRequest>,
) -> Response
where
    A: AssessmentRepository + 'static,
    L: LeadRepository + 'static,
{
    let SubmitAssessmentRequest {
        assessment_id,
        answers,
    } = request;
    match state.service.submit(&assessment_id, answers) {
        Ok(result) => {
            let view = SubmissionView::from_result(assessment_id, result);
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn progress_handler<A, L>(
    State(state): State<CheckupRouterState<A, L>>,
    Path(assessment_id): Path<String>,
    axum::Json(request): axum::Json<SaveProgressRequest>,
) -> Response
where
    A: AssessmentRepository + 'static,
    L: LeadRepository + 'static,
{
    let id = AssessmentId(assessment_id);
    match state
        .service
        .save_progress(&id, request.answers, request.progress_index)
    {
        Ok(()) => {
            let payload = json!({ "assessment_id": id, "status": "saved" });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn assessment_handler<A, L>(
    State(state): State<CheckupRouterState<A, L>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    A: AssessmentRepository + 'static,
    L: LeadRepository + 'static,
{
    match state.service.assessment(&AssessmentId(assessment_id)) {
        Ok(assessment) => (StatusCode::OK, axum::Json(assessment)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn lead_handler<A, L>(
    State(state): State<CheckupRouterState<A, L>>,
    axum::Json(request): axum::Json<LeadRequest>,
) -> Response
where
    A: AssessmentRepository + 'static,
    L: LeadRepository + 'static,
{
    match state.service.create_lead(request) {
        Ok(lead) => {
            let payload = json!({ "success": true, "lead_id": lead.id });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn admin_leads_handler<A, L>(
    State(state): State<CheckupRouterState<A, L>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response
where
    A: AssessmentRepository + 'static,
    L: LeadRepository + 'static,
{
    if !state.admin.authorize(&headers, &query) {
        return unauthorized();
    }
    match state.service.leads() {
        Ok(leads) => {
            let payload = json!({ "leads": leads });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error.into_response(),
    }
}

pub(crate) async fn export_leads_handler<A, L>(
    State(state): State<CheckupRouterState<A, L>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response
where
    A: AssessmentRepository + 'static,
    L: LeadRepository + 'static,
{
    if !state.admin.authorize(&headers, &query) {
        return unauthorized();
    }
    let leads = match state.service.leads() {
        Ok(leads) => leads,
        Err(error) => return error.into_response(),
    };

    let body = if leads.is_empty() {
        b"No leads found".to_vec()
    } else {
        match leads_to_csv(&leads) {
            Ok(bytes) => bytes,
            Err(error) => {
                let payload = json!({ "error": error.to_string() });
                return (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload))
                    .into_response();
            }
        }
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=checkup_leads.csv",
            ),
        ],
        body,
    )
        .into_response()
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        axum::Json(json!({ "error": "unauthorized" })),
    )
        .into_response()
}
