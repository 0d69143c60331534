use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for directory agents.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub String);

/// Social platforms the directory tracks follower counts for.
///
/// LinkedIn contributes two fields because the upstream profile form captures
/// connections and page followers separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SocialPlatform {
    Instagram,
    Facebook,
    Tiktok,
    Youtube,
    LinkedinConnections,
    LinkedinFollowers,
    Pinterest,
    X,
    Snapchat,
}

impl SocialPlatform {
    pub const ALL: [SocialPlatform; 9] = [
        SocialPlatform::Instagram,
        SocialPlatform::Facebook,
        SocialPlatform::Tiktok,
        SocialPlatform::Youtube,
        SocialPlatform::LinkedinConnections,
        SocialPlatform::LinkedinFollowers,
        SocialPlatform::Pinterest,
        SocialPlatform::X,
        SocialPlatform::Snapchat,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            SocialPlatform::Instagram => "instagram",
            SocialPlatform::Facebook => "facebook",
            SocialPlatform::Tiktok => "tiktok",
            SocialPlatform::Youtube => "youtube",
            SocialPlatform::LinkedinConnections => "linkedin-connections",
            SocialPlatform::LinkedinFollowers => "linkedin-followers",
            SocialPlatform::Pinterest => "pinterest",
            SocialPlatform::X => "x",
            SocialPlatform::Snapchat => "snapchat",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|platform| platform.key() == key)
    }
}

/// Review aggregation sources feeding the authority score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReviewSource {
    Google,
    Facebook,
    RateMyAgent,
    Trustpilot,
    ProductReview,
}

impl ReviewSource {
    pub const ALL: [ReviewSource; 5] = [
        ReviewSource::Google,
        ReviewSource::Facebook,
        ReviewSource::RateMyAgent,
        ReviewSource::Trustpilot,
        ReviewSource::ProductReview,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            ReviewSource::Google => "google",
            ReviewSource::Facebook => "facebook",
            ReviewSource::RateMyAgent => "rate-my-agent",
            ReviewSource::Trustpilot => "trustpilot",
            ReviewSource::ProductReview => "product-review",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|source| source.key() == key)
    }
}

/// Australian state and territory codes accepted on agent profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StateCode {
    Nsw,
    Vic,
    Qld,
    Sa,
    Wa,
    Tas,
    Nt,
    Act,
}

impl StateCode {
    pub const ALL: [StateCode; 8] = [
        StateCode::Nsw,
        StateCode::Vic,
        StateCode::Qld,
        StateCode::Sa,
        StateCode::Wa,
        StateCode::Tas,
        StateCode::Nt,
        StateCode::Act,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            StateCode::Nsw => "NSW",
            StateCode::Vic => "VIC",
            StateCode::Qld => "QLD",
            StateCode::Sa => "SA",
            StateCode::Wa => "WA",
            StateCode::Tas => "TAS",
            StateCode::Nt => "NT",
            StateCode::Act => "ACT",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|state| state.code() == code)
    }
}

/// Follower-count field exactly as upstream collaborators deliver it.
///
/// Profile forms and spreadsheet exports hand over numbers, numeric strings,
/// and free text interchangeably, so the value stays raw until the classifier
/// coerces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCount {
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl RawCount {
    /// Coerce into a usable follower count.
    ///
    /// Blank and non-numeric values carry no data and yield `None`; numeric
    /// values are truncated toward zero and clamped at zero.
    pub fn as_follower_count(&self) -> Option<u64> {
        match self {
            RawCount::Integer(value) => Some((*value).max(0) as u64),
            RawCount::Decimal(value) => clamp_numeric(*value),
            RawCount::Text(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok().and_then(clamp_numeric)
            }
        }
    }
}

fn clamp_numeric(value: f64) -> Option<u64> {
    if !value.is_finite() {
        return None;
    }
    Some(value.trunc().max(0.0) as u64)
}

/// Rating/count pair collected from one review source; either half may be
/// missing when the source has never been synced for the agent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReviewSample {
    pub rating: Option<f64>,
    pub count: Option<i64>,
}

/// Raw agent profile handed to the scoring engine.
///
/// The shape is closed: platform and review keys come from the fixed
/// enumerations above, never from arbitrary upstream columns. String fields
/// for claim/verification stay raw because normalization is a scoring-engine
/// responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentProfileInput {
    pub id: AgentId,
    pub name: String,
    #[serde(default)]
    pub agency_name: Option<String>,
    #[serde(default)]
    pub state: Option<StateCode>,
    #[serde(default)]
    pub followers: BTreeMap<SocialPlatform, RawCount>,
    #[serde(default)]
    pub reviews: BTreeMap<ReviewSource, ReviewSample>,
    #[serde(default)]
    pub suburbs: Vec<String>,
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub fee_structure: Option<String>,
    #[serde(default)]
    pub profile_status: Option<String>,
    #[serde(default)]
    pub verified: Option<String>,
    #[serde(default)]
    pub claimed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub avg_rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<i64>,
    #[serde(default)]
    pub years_experience: Option<i64>,
}

/// Discrete social presence tiers, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SocialPresenceTier {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "C+")]
    CPlus,
    C,
    #[serde(rename = "D+")]
    DPlus,
    D,
}

impl SocialPresenceTier {
    pub const ALL: [SocialPresenceTier; 8] = [
        SocialPresenceTier::APlus,
        SocialPresenceTier::A,
        SocialPresenceTier::BPlus,
        SocialPresenceTier::B,
        SocialPresenceTier::CPlus,
        SocialPresenceTier::C,
        SocialPresenceTier::DPlus,
        SocialPresenceTier::D,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            SocialPresenceTier::APlus => "A+",
            SocialPresenceTier::A => "A",
            SocialPresenceTier::BPlus => "B+",
            SocialPresenceTier::B => "B",
            SocialPresenceTier::CPlus => "C+",
            SocialPresenceTier::C => "C",
            SocialPresenceTier::DPlus => "D+",
            SocialPresenceTier::D => "D",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| tier.label() == label)
    }
}

/// Internal ranking tiers derived from the authority score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RankLabel {
    #[serde(rename = "ELITE+")]
    ElitePlus,
    Elite,
    Premier,
    Advanced,
    Established,
    Active,
    Developing,
    Starter,
}

impl RankLabel {
    pub const fn label(self) -> &'static str {
        match self {
            RankLabel::ElitePlus => "ELITE+",
            RankLabel::Elite => "ELITE",
            RankLabel::Premier => "PREMIER",
            RankLabel::Advanced => "ADVANCED",
            RankLabel::Established => "ESTABLISHED",
            RankLabel::Active => "ACTIVE",
            RankLabel::Developing => "DEVELOPING",
            RankLabel::Starter => "STARTER",
        }
    }
}

/// Normalized verification state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationStatus {
    Verified,
    Unverified,
}

impl VerificationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            VerificationStatus::Verified => "Verified",
            VerificationStatus::Unverified => "Unverified",
        }
    }
}

/// Normalized claim state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileStatus {
    Claimed,
    Unclaimed,
}

impl ProfileStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ProfileStatus::Claimed => "Claimed",
            ProfileStatus::Unclaimed => "Unclaimed",
        }
    }
}

/// Buyer-facing labels for the composite BuyerHQ score. Coarser than
/// [`RankLabel`] and tuned on its own thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompositeLabel {
    Elite,
    Premier,
    Advanced,
    Established,
}

impl CompositeLabel {
    pub const fn label(self) -> &'static str {
        match self {
            CompositeLabel::Elite => "Elite",
            CompositeLabel::Premier => "Premier",
            CompositeLabel::Advanced => "Advanced",
            CompositeLabel::Established => "Established",
        }
    }
}
