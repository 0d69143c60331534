use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::domain::{
    AgentProfileInput, ProfileStatus, RankLabel, ReviewSample, ReviewSource, SocialPresenceTier,
    VerificationStatus,
};
use super::config::ScoringConfig;

/// Point contribution of each authority component, kept on the scorecard so
/// admin tooling can audit how a score was assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityBreakdown {
    pub social: u8,
    pub review: u8,
    pub completeness: u8,
}

const SOCIAL_COMPONENT_MAX: f64 = 40.0;
const REVIEW_COMPONENT_MAX: f64 = 40.0;
const COMPLETENESS_SIGNAL_POINTS: u8 = 5;
const RATING_CEILING: f64 = 5.0;

const RANK_FLOORS: &[(u8, RankLabel)] = &[
    (90, RankLabel::ElitePlus),
    (80, RankLabel::Elite),
    (70, RankLabel::Premier),
    (60, RankLabel::Advanced),
    (50, RankLabel::Established),
    (35, RankLabel::Active),
    (20, RankLabel::Developing),
];

pub(crate) fn score(
    profile: &AgentProfileInput,
    tier: SocialPresenceTier,
    config: &ScoringConfig,
) -> (u8, RankLabel, AuthorityBreakdown) {
    let breakdown = AuthorityBreakdown {
        social: presence_points(tier),
        review: review_points(&profile.reviews, config),
        completeness: completeness_points(profile),
    };

    let total = breakdown.social as u16 + breakdown.review as u16 + breakdown.completeness as u16;
    let authority = total.min(100) as u8;
    let rank = rank_for(authority);

    (authority, rank, breakdown)
}

const fn presence_points(tier: SocialPresenceTier) -> u8 {
    match tier {
        SocialPresenceTier::APlus => 40,
        SocialPresenceTier::A => 36,
        SocialPresenceTier::BPlus => 32,
        SocialPresenceTier::B => 28,
        SocialPresenceTier::CPlus => 22,
        SocialPresenceTier::C => 16,
        SocialPresenceTier::DPlus => 10,
        SocialPresenceTier::D => 5,
    }
}

/// Log-weighted review aggregate: each source contributes
/// `rating * ln(1 + count)`, so extra volume on a single source has
/// diminishing effect and breadth across sources is what moves the score.
fn review_points(reviews: &BTreeMap<ReviewSource, ReviewSample>, config: &ScoringConfig) -> u8 {
    let raw: f64 = ReviewSource::ALL
        .iter()
        .map(|source| {
            reviews
                .get(source)
                .map(source_weight)
                .unwrap_or(0.0)
        })
        .sum();

    let ceiling = ReviewSource::ALL.len() as f64
        * RATING_CEILING
        * (1.0 + f64::from(config.review_reference_ceiling)).ln();

    let scaled = (raw / ceiling * REVIEW_COMPONENT_MAX).round();
    scaled.clamp(0.0, REVIEW_COMPONENT_MAX) as u8
}

fn source_weight(sample: &ReviewSample) -> f64 {
    let rating = sample
        .rating
        .filter(|value| value.is_finite())
        .map(|value| value.clamp(0.0, RATING_CEILING))
        .unwrap_or(0.0);
    let count = sample.count.unwrap_or(0).max(0) as f64;

    rating * (1.0 + count).ln()
}

fn completeness_points(profile: &AgentProfileInput) -> u8 {
    let signals = [
        !profile.suburbs.is_empty(),
        !profile.specializations.is_empty(),
        has_text(profile.about.as_deref()),
        has_text(profile.fee_structure.as_deref()),
    ];

    signals.iter().filter(|present| **present).count() as u8 * COMPLETENESS_SIGNAL_POINTS
}

fn has_text(value: Option<&str>) -> bool {
    value.map(|text| !text.trim().is_empty()).unwrap_or(false)
}

fn rank_for(authority: u8) -> RankLabel {
    RANK_FLOORS
        .iter()
        .find(|(floor, _)| authority >= *floor)
        .map(|(_, rank)| *rank)
        .unwrap_or(RankLabel::Starter)
}

/// Normalized claim and verification fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ClaimState {
    pub(crate) profile_status: ProfileStatus,
    pub(crate) verified: VerificationStatus,
    pub(crate) claimed_at: Option<DateTime<Utc>>,
}

/// Status decides verification, never the reverse: a claimed profile is
/// always `Verified`, and only a claimed profile keeps a claim timestamp.
/// Unclaimed profiles keep an exact-match raw flag (manual admin
/// verification) and nothing else.
pub(crate) fn normalize_claim(profile: &AgentProfileInput, now: DateTime<Utc>) -> ClaimState {
    if profile.profile_status.as_deref() == Some(ProfileStatus::Claimed.label()) {
        return ClaimState {
            profile_status: ProfileStatus::Claimed,
            verified: VerificationStatus::Verified,
            claimed_at: Some(profile.claimed_at.unwrap_or(now)),
        };
    }

    let verified = match profile.verified.as_deref() {
        Some(raw) if raw == VerificationStatus::Verified.label() => VerificationStatus::Verified,
        Some(raw) if raw == VerificationStatus::Unverified.label() => {
            VerificationStatus::Unverified
        }
        _ => VerificationStatus::Unverified,
    };

    ClaimState {
        profile_status: ProfileStatus::Unclaimed,
        verified,
        claimed_at: None,
    }
}
