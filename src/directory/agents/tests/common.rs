use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::directory::agents::domain::{
    AgentId, AgentProfileInput, RawCount, ReviewSample, ReviewSource, SocialPlatform,
};
use crate::directory::agents::repository::{
    AgentRecord, AgentRepository, InMemoryAgentRepository, RepositoryError,
};
use crate::directory::agents::scoring::{AgentScoringEngine, ScoringConfig};
use crate::directory::agents::service::AgentDirectoryService;
use crate::directory::agents::{agent_router, AgentScorecard};

pub(super) const ADMIN_EMAIL: &str = "ops@buyerhq.example";

pub(super) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 1, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn later_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 2, 14, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn engine() -> AgentScoringEngine {
    AgentScoringEngine::default()
}

/// Minimal profile: no followers, no reviews, no completeness signals.
pub(super) fn base_profile(id: &str) -> AgentProfileInput {
    AgentProfileInput {
        id: AgentId(id.to_string()),
        name: format!("Agent {id}"),
        agency_name: None,
        state: None,
        followers: BTreeMap::new(),
        reviews: BTreeMap::new(),
        suburbs: Vec::new(),
        specializations: Vec::new(),
        about: None,
        fee_structure: None,
        profile_status: None,
        verified: None,
        claimed_at: None,
        avg_rating: None,
        review_count: None,
        years_experience: None,
    }
}

pub(super) fn followers(
    entries: &[(SocialPlatform, RawCount)],
) -> BTreeMap<SocialPlatform, RawCount> {
    entries.iter().cloned().collect()
}

pub(super) fn profile_with_followers(id: &str, total: i64) -> AgentProfileInput {
    let mut profile = base_profile(id);
    profile
        .followers
        .insert(SocialPlatform::Instagram, RawCount::Integer(total));
    profile
}

pub(super) fn review(rating: f64, count: i64) -> ReviewSample {
    ReviewSample {
        rating: Some(rating),
        count: Some(count),
    }
}

/// The worked scenario from the scoring rubric: 8 000 followers across two
/// platforms, a single populated review source, suburbs as the only
/// completeness signal.
pub(super) fn scenario_profile() -> AgentProfileInput {
    let mut profile = base_profile("scenario");
    profile.followers = followers(&[
        (SocialPlatform::Instagram, RawCount::Integer(5_000)),
        (SocialPlatform::Facebook, RawCount::Integer(3_000)),
        (SocialPlatform::Tiktok, RawCount::Text(String::new())),
    ]);
    profile
        .reviews
        .insert(ReviewSource::Google, review(4.8, 120));
    profile.suburbs = vec!["Bondi".to_string()];
    profile.about = Some(String::new());
    profile.profile_status = Some("Unclaimed".to_string());
    profile
}

/// Every authority component at its ceiling.
pub(super) fn maxed_profile() -> AgentProfileInput {
    let mut profile = base_profile("maxed");
    profile
        .followers
        .insert(SocialPlatform::Instagram, RawCount::Integer(10_000));
    for source in ReviewSource::ALL {
        profile.reviews.insert(source, review(5.0, 2_500));
    }
    profile.suburbs = vec!["Paddington".to_string()];
    profile.specializations = vec!["Auction bidding".to_string()];
    profile.about = Some("Twenty years buying on the lower north shore.".to_string());
    profile.fee_structure = Some("Fixed fee".to_string());
    profile
}

pub(super) fn score_at_fixed_now(profile: &AgentProfileInput) -> AgentScorecard {
    engine().score(profile, fixed_now())
}

pub(super) fn build_service() -> (
    Arc<AgentDirectoryService<InMemoryAgentRepository>>,
    Arc<InMemoryAgentRepository>,
) {
    let repository = Arc::new(InMemoryAgentRepository::default());
    let service = Arc::new(AgentDirectoryService::new(
        repository.clone(),
        ScoringConfig::default(),
    ));
    (service, repository)
}

pub(super) fn admin_set() -> BTreeSet<String> {
    [ADMIN_EMAIL.to_string()].into_iter().collect()
}

pub(super) fn directory_router(
    service: Arc<AgentDirectoryService<InMemoryAgentRepository>>,
) -> axum::Router {
    agent_router(service, admin_set())
}

pub(super) struct UnavailableRepository;

impl AgentRepository for UnavailableRepository {
    fn upsert(&self, _record: AgentRecord) -> Result<AgentRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &AgentId) -> Result<Option<AgentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<AgentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
