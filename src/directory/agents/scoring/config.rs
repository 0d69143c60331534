use serde::{Deserialize, Serialize};

/// Dials for the scoring formulas.
///
/// The tier and rank threshold tables are business constants and live next to
/// the code that evaluates them; these values are the reference ceilings that
/// normalize open-ended inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Per-source review count at which a perfect 5.0 rating saturates the
    /// log-weighted review component.
    pub review_reference_ceiling: u32,
    /// Raw review volume cap for the composite score.
    pub review_volume_cap: u32,
    /// Years-of-experience cap for the composite score.
    pub experience_cap_years: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            review_reference_ceiling: 2_500,
            review_volume_cap: 500,
            experience_cap_years: 20,
        }
    }
}
