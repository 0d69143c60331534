mod authority;
mod composite;
mod config;
mod presence;

pub use authority::AuthorityBreakdown;
pub use composite::CompositeScore;
pub use config::ScoringConfig;
pub use presence::SocialPresence;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    AgentId, AgentProfileInput, ProfileStatus, RankLabel, SocialPresenceTier, VerificationStatus,
};

/// Stateless engine composing the three scoring stages.
///
/// Every method is a pure function of its arguments: same profile and same
/// `now` always produce the same scorecard, so batch re-ranking can shard by
/// record with no coordination.
pub struct AgentScoringEngine {
    config: ScoringConfig,
}

impl AgentScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Run the classifier and authority calculator over a raw profile.
    ///
    /// Never fails: malformed numeric or string fields coerce to safe
    /// defaults, so even an empty profile yields a `STARTER`/`D` scorecard.
    pub fn score(&self, profile: &AgentProfileInput, now: DateTime<Utc>) -> AgentScorecard {
        let presence = presence::classify(&profile.followers);
        let (authority_score, rank_label, breakdown) =
            authority::score(profile, presence.tier, &self.config);
        let claim = authority::normalize_claim(profile, now);

        AgentScorecard {
            agent_id: profile.id.clone(),
            social_presence_tier: presence.tier,
            total_followers: presence.total_followers,
            authority_score,
            rank_label,
            breakdown,
            verified: claim.verified,
            profile_status: claim.profile_status,
            claimed_at: claim.claimed_at,
            last_updated: now,
        }
    }

    /// Compute the buyer-facing BuyerHQ score for a scored profile.
    ///
    /// Downstream of [`Self::score`] but independent of it: the composite
    /// reads the authority score plus the raw display inputs and feeds
    /// nothing back into ranking.
    pub fn composite(
        &self,
        scorecard: &AgentScorecard,
        profile: &AgentProfileInput,
    ) -> CompositeScore {
        composite::composite(
            scorecard.authority_score,
            profile.avg_rating,
            profile.review_count,
            profile.years_experience,
            &self.config,
        )
    }
}

impl Default for AgentScoringEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

/// Standalone composite entry point for read paths that already hold an
/// authority score and the raw display inputs.
pub fn buyerhq_score(
    authority_score: u8,
    avg_rating: Option<f64>,
    review_count: Option<i64>,
    years_experience: Option<i64>,
    config: &ScoringConfig,
) -> CompositeScore {
    composite::composite(
        authority_score,
        avg_rating,
        review_count,
        years_experience,
        config,
    )
}

/// Derived fields the write path layers on top of a profile before
/// persisting it. The raw input record is never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentScorecard {
    pub agent_id: AgentId,
    pub social_presence_tier: SocialPresenceTier,
    pub total_followers: u64,
    pub authority_score: u8,
    pub rank_label: RankLabel,
    pub breakdown: AuthorityBreakdown,
    pub verified: VerificationStatus,
    pub profile_status: ProfileStatus,
    pub claimed_at: Option<DateTime<Utc>>,
    /// Computation timestamp, not an edit timestamp: advances on every run
    /// even when nothing else changed.
    pub last_updated: DateTime<Utc>,
}
