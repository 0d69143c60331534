use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use super::domain::{
    AgentId, AgentProfileInput, CompositeLabel, ProfileStatus, RankLabel, SocialPresenceTier,
    StateCode, VerificationStatus,
};
use super::scoring::{AgentScorecard, CompositeScore};

/// Stored directory record: the untouched raw profile paired with the
/// scorecard the write path derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    pub profile: AgentProfileInput,
    pub scorecard: AgentScorecard,
}

impl AgentRecord {
    pub fn listing_view(&self, buyerhq: CompositeScore) -> AgentListingView {
        AgentListingView {
            agent_id: self.profile.id.clone(),
            name: self.profile.name.clone(),
            agency_name: self.profile.agency_name.clone(),
            state: self.profile.state,
            social_presence_tier: self.scorecard.social_presence_tier,
            authority_score: self.scorecard.authority_score,
            rank_label: self.scorecard.rank_label,
            verified: self.scorecard.verified,
            profile_status: self.scorecard.profile_status,
            buyerhq_score: buyerhq.score,
            buyerhq_label: buyerhq.label,
        }
    }
}

/// Storage abstraction so the service facade can be exercised in isolation;
/// persistence itself belongs to the hosting application.
pub trait AgentRepository: Send + Sync {
    fn upsert(&self, record: AgentRecord) -> Result<AgentRecord, RepositoryError>;
    fn fetch(&self, id: &AgentId) -> Result<Option<AgentRecord>, RepositoryError>;
    fn list(&self) -> Result<Vec<AgentRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Buyer-facing directory row: rank plus the composite BuyerHQ score, never
/// the internal breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentListingView {
    pub agent_id: AgentId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<StateCode>,
    pub social_presence_tier: SocialPresenceTier,
    pub authority_score: u8,
    pub rank_label: RankLabel,
    pub verified: VerificationStatus,
    pub profile_status: ProfileStatus,
    pub buyerhq_score: u8,
    pub buyerhq_label: CompositeLabel,
}

/// Full record view for admin and write-path responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentDetailView {
    pub profile: AgentProfileInput,
    pub scorecard: AgentScorecard,
    pub buyerhq: CompositeScore,
}

/// Hash-map-backed repository used by the bundled server and the CLI; a
/// hosted deployment substitutes its own implementation behind the trait.
#[derive(Default, Clone)]
pub struct InMemoryAgentRepository {
    records: Arc<Mutex<HashMap<AgentId, AgentRecord>>>,
}

impl AgentRepository for InMemoryAgentRepository {
    fn upsert(&self, record: AgentRecord) -> Result<AgentRecord, RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        guard.insert(record.profile.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &AgentId) -> Result<Option<AgentRecord>, RepositoryError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<AgentRecord>, RepositoryError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard.values().cloned().collect())
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> RepositoryError {
    RepositoryError::Unavailable("repository mutex poisoned".to_string())
}
