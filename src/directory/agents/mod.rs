//! Agent profiles and the ranking/scoring engine.
//!
//! Data flows one way through the engine: raw profile -> social presence
//! classifier -> authority calculator -> scorecard. The composite BuyerHQ
//! score is a downstream consumer of the scorecard and never feeds back into
//! ranking.

pub mod domain;
pub mod repository;
pub mod router;
pub mod schema;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AgentId, AgentProfileInput, CompositeLabel, ProfileStatus, RankLabel, RawCount, ReviewSample,
    ReviewSource, SocialPlatform, SocialPresenceTier, StateCode, VerificationStatus,
};
pub use repository::{
    AgentDetailView, AgentListingView, AgentRecord, AgentRepository, InMemoryAgentRepository,
    RepositoryError,
};
pub use router::agent_router;
pub use schema::{validate_row, SchemaViolation};
pub use scoring::{
    buyerhq_score, AgentScorecard, AgentScoringEngine, AuthorityBreakdown, CompositeScore,
    ScoringConfig, SocialPresence,
};
pub use service::{AgentDirectoryService, DirectoryServiceError};
