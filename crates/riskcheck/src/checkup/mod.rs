//! Questionnaire catalog, scoring engine, and the service/router surface of
//! the risk checkup.
//!
//! The scoring engine is the load-bearing piece: a pure function from a set
//! of submitted answers to a score, a risk tier, a ranked top-risks list,
//! and a capped action plan. Everything else here is the plumbing that
//! serves the catalog, persists assessments and leads through injected
//! repositories, and exposes the HTTP surface.

pub mod catalog;
pub mod domain;
pub mod export;
pub mod repository;
pub mod resolver;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{AnswerOption, Catalog, Module, Question, RiskCatalog, RiskEntry};
pub use domain::{
    ActionItem, Assessment, AssessmentId, Lead, LeadId, LeadRequest, ModuleId, ModuleScore,
    QuestionId, RiskTier, ScoreResult, Severity, SubmittedAnswer, TopRisk, Urgency,
};
pub use repository::{AssessmentRepository, LeadRepository, RepositoryError};
pub use resolver::{ResolverPolicy, RiskKey};
pub use router::{checkup_router, AdminAccess};
pub use scoring::{
    FlagOverrides, MaxScorePolicy, ScorePolarity, ScoringConfig, ScoringEngine, TierThresholds,
};
pub use service::{CheckupService, CheckupServiceError, ValidationError};
