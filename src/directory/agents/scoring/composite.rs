use serde::{Deserialize, Serialize};

use super::super::domain::CompositeLabel;
use super::config::ScoringConfig;

/// Buyer-facing BuyerHQ score. Computed beside the authority score, never
/// from the same table: the two scales serve different audiences and drift
/// independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeScore {
    pub score: u8,
    pub label: CompositeLabel,
}

const AUTHORITY_WEIGHT: f64 = 0.55;
const RATING_COMPONENT_MAX: f64 = 25.0;
const VOLUME_COMPONENT_MAX: f64 = 10.0;
const EXPERIENCE_COMPONENT_MAX: f64 = 10.0;

const LABEL_FLOORS: &[(u8, CompositeLabel)] = &[
    (90, CompositeLabel::Elite),
    (78, CompositeLabel::Premier),
    (62, CompositeLabel::Advanced),
];

pub(crate) fn composite(
    authority_score: u8,
    avg_rating: Option<f64>,
    review_count: Option<i64>,
    years_experience: Option<i64>,
    config: &ScoringConfig,
) -> CompositeScore {
    let authority_part = (f64::from(authority_score) * AUTHORITY_WEIGHT).round();

    let rating = avg_rating
        .filter(|value| value.is_finite())
        .map(|value| value.clamp(0.0, 5.0))
        .unwrap_or(0.0);
    let rating_part = (rating / 5.0 * RATING_COMPONENT_MAX).round();

    let volume_cap = f64::from(config.review_volume_cap);
    let volume = (review_count.unwrap_or(0).max(0) as f64).min(volume_cap);
    let review_part = (volume / volume_cap * VOLUME_COMPONENT_MAX).round();

    let experience_cap = f64::from(config.experience_cap_years);
    let years = (years_experience.unwrap_or(0).max(0) as f64).min(experience_cap);
    let experience_part = (years / experience_cap * EXPERIENCE_COMPONENT_MAX).round();

    let score = (authority_part + rating_part + review_part + experience_part).clamp(0.0, 100.0);
    let score = score as u8;

    CompositeScore {
        score,
        label: label_for(score),
    }
}

fn label_for(score: u8) -> CompositeLabel {
    LABEL_FLOORS
        .iter()
        .find(|(floor, _)| score >= *floor)
        .map(|(_, label)| *label)
        .unwrap_or(CompositeLabel::Established)
}
