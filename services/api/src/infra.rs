use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use metrics_exporter_prometheus::PrometheusHandle;
use riskcheck::checkup::{
    Assessment, AssessmentId, AssessmentRepository, Lead, LeadRepository, RepositoryError,
    ScoreResult, SubmittedAnswer,
};
use riskcheck::config::StorageMode;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
pub(crate) struct InMemoryAssessmentRepository {
    records: Mutex<HashMap<AssessmentId, Assessment>>,
}

impl AssessmentRepository for InMemoryAssessmentRepository {
    fn insert(&self, assessment: Assessment) -> Result<Assessment, RepositoryError> {
        let mut guard = self.records.lock().expect("assessment mutex poisoned");
        if guard.contains_key(&assessment.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(assessment.id.clone(), assessment.clone());
        Ok(assessment)
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError> {
        let guard = self.records.lock().expect("assessment mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn save_progress(
        &self,
        id: &AssessmentId,
        answers: Vec<SubmittedAnswer>,
        progress_index: Option<u32>,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("assessment mutex poisoned");
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
        let mut guard = self.records.lock().expect("assessment mutex poisoned");
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
pub(crate) struct InMemoryLeadRepository {
    records: Mutex<Vec<Lead>>,
}

impl LeadRepository for InMemoryLeadRepository {
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

fn not_configured() -> RepositoryError {
    RepositoryError::Unavailable("storage is not configured".to_string())
}

/// Assessment store selected by configuration. `Disabled` is the explicit
/// not-configured state: every call answers unavailable instead of the
/// process holding a nullable handle.
pub(crate) enum AssessmentStore {
    Memory(InMemoryAssessmentRepository),
    Disabled,
}

impl AssessmentRepository for AssessmentStore {
    fn insert(&self, assessment: Assessment) -> Result<Assessment, RepositoryError> {
        match self {
            AssessmentStore::Memory(repository) => repository.insert(assessment),
            AssessmentStore::Disabled => Err(not_configured()),
        }
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError> {
        match self {
            AssessmentStore::Memory(repository) => repository.fetch(id),
            AssessmentStore::Disabled => Err(not_configured()),
        }
    }

    fn save_progress(
        &self,
        id: &AssessmentId,
        answers: Vec<SubmittedAnswer>,
        progress_index: Option<u32>,
    ) -> Result<(), RepositoryError> {
        match self {
            AssessmentStore::Memory(repository) => {
                repository.save_progress(id, answers, progress_index)
            }
            AssessmentStore::Disabled => Err(not_configured()),
        }
    }

    fn complete(
        &self,
        id: &AssessmentId,
        answers: Vec<SubmittedAnswer>,
        result: ScoreResult,
    ) -> Result<Assessment, RepositoryError> {
        match self {
            AssessmentStore::Memory(repository) => repository.complete(id, answers, result),
            AssessmentStore::Disabled => Err(not_configured()),
        }
    }
}

/// Lead store selected by configuration; see [`AssessmentStore`].
pub(crate) enum LeadStore {
    Memory(InMemoryLeadRepository),
    Disabled,
}

impl LeadRepository for LeadStore {
    fn insert(&self, lead: Lead) -> Result<Lead, RepositoryError> {
        match self {
            LeadStore::Memory(repository) => repository.insert(lead),
            LeadStore::Disabled => Err(not_configured()),
        }
    }

    fn list_recent(&self, limit: usize) -> Result<Vec<Lead>, RepositoryError> {
        match self {
            LeadStore::Memory(repository) => repository.list_recent(limit),
            LeadStore::Disabled => Err(not_configured()),
        }
    }
}

pub(crate) fn build_stores(mode: StorageMode) -> (Arc<AssessmentStore>, Arc<LeadStore>) {
    match mode {
        StorageMode::Memory => (
            Arc::new(AssessmentStore::Memory(
                InMemoryAssessmentRepository::default(),
            )),
            Arc::new(LeadStore::Memory(InMemoryLeadRepository::default())),
        ),
        StorageMode::Disabled => (
            Arc::new(AssessmentStore::Disabled),
            Arc::new(LeadStore::Disabled),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskcheck::checkup::{Catalog, CheckupService, CheckupServiceError, ModuleId};

    #[test]
    fn disabled_stores_answer_unavailable() {
        let (assessments, leads) = build_stores(StorageMode::Disabled);
        let service = CheckupService::new(
            Arc::new(Catalog::business_legal_v1()),
            assessments,
            leads,
        );
        let error = service
            .create_assessment(vec![ModuleId::new("contracts")])
            .expect_err("disabled storage rejects writes");
        assert!(matches!(
            error,
            CheckupServiceError::Repository(RepositoryError::Unavailable(_))
        ));
    }

    #[test]
    fn memory_store_completes_only_once() {
        let (assessments, leads) = build_stores(StorageMode::Memory);
        let catalog = Arc::new(Catalog::business_legal_v1());
        let service = CheckupService::new(catalog.clone(), assessments, leads);

        let assessment = service
            .create_assessment(vec![ModuleId::new("contracts")])
            .expect("assessment created");
        let answers: Vec<_> = catalog.modules[0]
            .questions
            .iter()
            .map(|question| riskcheck::checkup::SubmittedAnswer {
                question_id: question.id.clone(),
                answer_value: "green".to_string(),
                points: 3,
                trigger_flag: false,
            })
            .collect();

        service
            .submit(&assessment.id, answers.clone())
            .expect("first submit scores");
        let error = service
            .submit(&assessment.id, answers)
            .expect_err("second submit conflicts");
        assert!(matches!(
            error,
            CheckupServiceError::Repository(RepositoryError::Conflict)
        ));
    }
}
