use std::sync::Arc;

use super::common::*;
use crate::directory::agents::domain::{AgentId, ProfileStatus, RankLabel, VerificationStatus};
use crate::directory::agents::repository::AgentRepository;
use crate::directory::agents::scoring::ScoringConfig;
use crate::directory::agents::service::{AgentDirectoryService, DirectoryServiceError};

#[test]
fn upsert_persists_a_recomputed_scorecard() {
    let (service, repository) = build_service();

    let record = service
        .upsert_profile(scenario_profile())
        .expect("profile persists");

    assert_eq!(record.scorecard.authority_score, 46);
    assert_eq!(record.scorecard.rank_label, RankLabel::Active);
    assert_eq!(record.scorecard.profile_status, ProfileStatus::Unclaimed);
    assert_eq!(record.scorecard.verified, VerificationStatus::Unverified);
    assert_eq!(record.scorecard.claimed_at, None);

    let stored = repository
        .fetch(&record.profile.id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored.scorecard, record.scorecard);
    assert_eq!(stored.profile, record.profile);
}

#[test]
fn upsert_replaces_stale_derived_fields() {
    let (service, repository) = build_service();

    service
        .upsert_profile(base_profile("agent-x"))
        .expect("first write");

    let mut richer = base_profile("agent-x");
    richer.suburbs = vec!["Carlton".to_string()];
    richer.specializations = vec!["Townhouses".to_string()];
    service.upsert_profile(richer).expect("second write");

    let stored = repository
        .fetch(&AgentId("agent-x".to_string()))
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored.scorecard.breakdown.completeness, 10);
}

#[test]
fn get_reports_unknown_agents() {
    let (service, _) = build_service();

    match service.get(&AgentId("missing".to_string())) {
        Err(DirectoryServiceError::UnknownAgent(id)) => assert_eq!(id, "missing"),
        other => panic!("expected unknown agent error, got {other:?}"),
    }
}

#[test]
fn get_attaches_the_composite_score() {
    let (service, _) = build_service();
    let mut profile = maxed_profile();
    profile.avg_rating = Some(5.0);
    profile.review_count = Some(500);
    profile.years_experience = Some(20);
    service.upsert_profile(profile).expect("profile persists");

    let detail = service
        .get(&AgentId("maxed".to_string()))
        .expect("detail view");
    assert_eq!(detail.scorecard.authority_score, 100);
    assert_eq!(detail.buyerhq.score, 100);
}

#[test]
fn directory_orders_by_composite_score_with_stable_ties() {
    let (service, _) = build_service();

    let mut strong = base_profile("agent-strong");
    strong.avg_rating = Some(5.0);
    let mut middle = base_profile("agent-middle");
    middle.avg_rating = Some(3.0);
    let weak = base_profile("agent-weak");
    let tie = base_profile("agent-tie");

    for profile in [middle, weak, strong, tie] {
        service.upsert_profile(profile).expect("profile persists");
    }

    let listings = service.directory(10).expect("listing");
    let ids: Vec<&str> = listings
        .iter()
        .map(|listing| listing.agent_id.0.as_str())
        .collect();

    // agent-tie and agent-weak share a score; ids break the tie.
    assert_eq!(
        ids,
        vec!["agent-strong", "agent-middle", "agent-tie", "agent-weak"]
    );
}

#[test]
fn directory_truncates_to_the_requested_limit() {
    let (service, _) = build_service();
    for index in 0..5 {
        service
            .upsert_profile(base_profile(&format!("agent-{index}")))
            .expect("profile persists");
    }

    let listings = service.directory(3).expect("listing");
    assert_eq!(listings.len(), 3);
}

#[test]
fn repository_failures_propagate() {
    let service = AgentDirectoryService::new(
        Arc::new(UnavailableRepository),
        ScoringConfig::default(),
    );

    match service.get(&AgentId("any".to_string())) {
        Err(DirectoryServiceError::Repository(_)) => {}
        other => panic!("expected repository error, got {other:?}"),
    }

    match service.directory(10) {
        Err(DirectoryServiceError::Repository(_)) => {}
        other => panic!("expected repository error, got {other:?}"),
    }
}
