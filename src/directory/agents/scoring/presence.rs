use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::super::domain::{RawCount, SocialPlatform, SocialPresenceTier};

/// Aggregated social footprint for one agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialPresence {
    pub tier: SocialPresenceTier,
    pub total_followers: u64,
}

const TIER_FLOORS: &[(u64, SocialPresenceTier)] = &[
    (10_000, SocialPresenceTier::APlus),
    (8_000, SocialPresenceTier::A),
    (6_000, SocialPresenceTier::BPlus),
    (4_000, SocialPresenceTier::B),
    (2_500, SocialPresenceTier::CPlus),
    (1_500, SocialPresenceTier::C),
    (750, SocialPresenceTier::DPlus),
];

/// Sum coerced follower counts across every platform and map the total onto a
/// presence tier. Never fails: malformed fields simply count as "no data".
pub(crate) fn classify(followers: &BTreeMap<SocialPlatform, RawCount>) -> SocialPresence {
    let mut total: u64 = 0;
    let mut any_supplied = false;

    for platform in SocialPlatform::ALL {
        if let Some(count) = followers
            .get(&platform)
            .and_then(RawCount::as_follower_count)
        {
            any_supplied = true;
            total += count;
        }
    }

    // A profile where no platform reported anything stays pinned at the
    // bottom tier even if the floor table is retuned later. Must run before
    // the table lookup.
    if !any_supplied {
        return SocialPresence {
            tier: SocialPresenceTier::D,
            total_followers: 0,
        };
    }

    let tier = TIER_FLOORS
        .iter()
        .find(|(floor, _)| total >= *floor)
        .map(|(_, tier)| *tier)
        .unwrap_or(SocialPresenceTier::D);

    SocialPresence {
        tier,
        total_followers: total,
    }
}
