use std::collections::BTreeMap;

use super::domain::QuestionId;

/// Key into the risk catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RiskKey(pub String);

impl RiskKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

/// Maps a submitted answer to a risk catalog key.
///
/// Which variant applies is a per-catalog-version configuration choice, not a
/// runtime branch on the shape of the data: one generation keys risks by
/// question alone, another keys them by (question, answer value) so that only
/// specific answers surface a risk.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolverPolicy {
    /// Any qualifying answer to the question resolves to the same key.
    QuestionKeyed(BTreeMap<QuestionId, RiskKey>),
    /// Only the listed (question, answer value) pairs resolve.
    ValueKeyed(BTreeMap<(QuestionId, String), RiskKey>),
}

impl ResolverPolicy {
    pub fn resolve(&self, question_id: &QuestionId, answer_value: &str) -> Option<&RiskKey> {
        match self {
            ResolverPolicy::QuestionKeyed(map) => map.get(question_id),
            ResolverPolicy::ValueKeyed(map) => {
                map.get(&(question_id.clone(), answer_value.to_string()))
            }
        }
    }
}
