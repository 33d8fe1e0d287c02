use super::domain::{Assessment, AssessmentId, Lead, ScoreResult, SubmittedAnswer};

/// Storage abstraction for assessments so the service can be exercised in
/// isolation and backed by any document store.
pub trait AssessmentRepository: Send + Sync {
    fn insert(&self, assessment: Assessment) -> Result<Assessment, RepositoryError>;

    fn fetch(&self, id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError>;

    /// Store partial answers on a pending assessment without scoring it.
    fn save_progress(
        &self,
        id: &AssessmentId,
        answers: Vec<SubmittedAnswer>,
        progress_index: Option<u32>,
    ) -> Result<(), RepositoryError>;

    /// Conditionally mark an assessment complete, storing the final answers
    /// and score. Implementations must reject a second completion with
    /// [`RepositoryError::Conflict`] so that submission is single-use even
    /// under concurrent submits.
    fn complete(
        &self,
        id: &AssessmentId,
        answers: Vec<SubmittedAnswer>,
        result: ScoreResult,
    ) -> Result<Assessment, RepositoryError>;
}

/// Storage abstraction for captured leads.
pub trait LeadRepository: Send + Sync {
    fn insert(&self, lead: Lead) -> Result<Lead, RepositoryError>;

    /// Most recent leads first.
    fn list_recent(&self, limit: usize) -> Result<Vec<Lead>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists or was already completed")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
