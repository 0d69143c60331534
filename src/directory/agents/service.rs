use std::sync::Arc;

use chrono::Utc;

use super::domain::{AgentId, AgentProfileInput};
use super::repository::{
    AgentDetailView, AgentListingView, AgentRecord, AgentRepository, RepositoryError,
};
use super::scoring::{AgentScoringEngine, ScoringConfig};

/// Facade composing the scoring engine with a repository.
///
/// The write path recomputes the scorecard before every persist so stored
/// records are always internally consistent with their raw inputs; the read
/// path attaches the buyer-facing composite score per record.
pub struct AgentDirectoryService<R> {
    repository: Arc<R>,
    engine: Arc<AgentScoringEngine>,
}

impl<R> AgentDirectoryService<R>
where
    R: AgentRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: ScoringConfig) -> Self {
        Self {
            repository,
            engine: Arc::new(AgentScoringEngine::new(config)),
        }
    }

    pub fn engine(&self) -> &AgentScoringEngine {
        &self.engine
    }

    /// Profile-write path: derive the scorecard and persist the layered
    /// record.
    pub fn upsert_profile(
        &self,
        profile: AgentProfileInput,
    ) -> Result<AgentRecord, DirectoryServiceError> {
        let scorecard = self.engine.score(&profile, Utc::now());
        let record = AgentRecord { profile, scorecard };
        Ok(self.repository.upsert(record)?)
    }

    pub fn get(&self, id: &AgentId) -> Result<AgentDetailView, DirectoryServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or_else(|| DirectoryServiceError::UnknownAgent(id.0.clone()))?;
        Ok(self.detail_view(&record))
    }

    /// Listing-read path: one composite score per record, ordered by
    /// BuyerHQ score descending with agent id as the stable tie-break.
    pub fn directory(&self, limit: usize) -> Result<Vec<AgentListingView>, DirectoryServiceError> {
        let mut listings: Vec<AgentListingView> = self
            .repository
            .list()?
            .iter()
            .map(|record| {
                let buyerhq = self.engine.composite(&record.scorecard, &record.profile);
                record.listing_view(buyerhq)
            })
            .collect();

        listings.sort_by(|left, right| {
            right
                .buyerhq_score
                .cmp(&left.buyerhq_score)
                .then_with(|| left.agent_id.cmp(&right.agent_id))
        });
        listings.truncate(limit);

        Ok(listings)
    }

    pub fn detail_view(&self, record: &AgentRecord) -> AgentDetailView {
        let buyerhq = self.engine.composite(&record.scorecard, &record.profile);
        AgentDetailView {
            profile: record.profile.clone(),
            scorecard: record.scorecard.clone(),
            buyerhq,
        }
    }
}

/// Error raised by the directory service.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryServiceError {
    #[error("agent '{0}' is not in the directory")]
    UnknownAgent(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
