use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{
    AgentId, AgentProfileInput, ProfileStatus, RawCount, ReviewSample, ReviewSource,
    SocialPlatform, SocialPresenceTier, StateCode, VerificationStatus,
};

/// One field failure reported by the import schema. Rows are checked in
/// full, so a bad row surfaces every problem at once instead of the first.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[error("{field}: {message}")]
pub struct SchemaViolation {
    pub field: String,
    pub message: String,
}

impl SchemaViolation {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

static ALLOWED_COLUMNS: OnceLock<BTreeSet<String>> = OnceLock::new();

const LIST_SEPARATOR: char = '|';

fn allowed_columns() -> &'static BTreeSet<String> {
    ALLOWED_COLUMNS.get_or_init(|| {
        let mut columns: BTreeSet<String> = [
            "id",
            "name",
            "agency-name",
            "state",
            "suburbs",
            "specializations",
            "about",
            "fee-structure",
            "profile-status",
            "verified",
            "claimed-at",
            "avg-rating",
            "review-count",
            "years-experience",
            "social-presence-tier",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();

        for platform in SocialPlatform::ALL {
            columns.insert(platform.key().to_string());
        }
        for source in ReviewSource::ALL {
            columns.insert(format!("review-{}-rating", source.key()));
            columns.insert(format!("review-{}-count", source.key()));
        }

        columns
    })
}

pub fn is_allowed_column(name: &str) -> bool {
    allowed_columns().contains(name)
}

/// Validate one raw row against the fixed import schema and convert it into
/// an [`AgentProfileInput`].
///
/// This boundary is strict where the engine is lenient: unknown columns,
/// unparsable numbers, and values outside the enumerated sets are all
/// violations here, so a row that passes can never trip the engine's
/// defensive defaults by accident.
pub fn validate_row(
    row: &BTreeMap<String, String>,
) -> Result<AgentProfileInput, Vec<SchemaViolation>> {
    let mut violations = Vec::new();

    for column in row.keys() {
        if !is_allowed_column(column) {
            violations.push(SchemaViolation::new(column, "unknown column"));
        }
    }

    let id = required_text(row, "id", &mut violations);
    let name = required_text(row, "name", &mut violations);
    let agency_name = optional_text(row, "agency-name");

    let state = optional_text(row, "state").and_then(|value| {
        let state = StateCode::from_code(&value);
        if state.is_none() {
            violations.push(SchemaViolation::new(
                "state",
                format!("'{value}' is not one of the eight state codes"),
            ));
        }
        state
    });

    let mut followers = BTreeMap::new();
    for platform in SocialPlatform::ALL {
        if let Some(value) = optional_text(row, platform.key()) {
            if value.parse::<f64>().is_err() {
                violations.push(SchemaViolation::new(
                    platform.key(),
                    "expected a follower count",
                ));
            }
            followers.insert(platform, RawCount::Text(value));
        }
    }

    let mut reviews = BTreeMap::new();
    for source in ReviewSource::ALL {
        let rating_column = format!("review-{}-rating", source.key());
        let count_column = format!("review-{}-count", source.key());
        let rating = parse_rating(row, &rating_column, &mut violations);
        let count = parse_nonnegative(row, &count_column, &mut violations);
        if rating.is_some() || count.is_some() {
            reviews.insert(source, ReviewSample { rating, count });
        }
    }

    // Recomputed by the engine; the column is only checked against the
    // enumerated tier labels when present.
    if let Some(value) = optional_text(row, "social-presence-tier") {
        if SocialPresenceTier::from_label(&value).is_none() {
            violations.push(SchemaViolation::new(
                "social-presence-tier",
                format!("'{value}' is not one of the eight presence tiers"),
            ));
        }
    }

    let profile_status = optional_text(row, "profile-status");
    if let Some(value) = profile_status.as_deref() {
        let known =
            value == ProfileStatus::Claimed.label() || value == ProfileStatus::Unclaimed.label();
        if !known {
            violations.push(SchemaViolation::new(
                "profile-status",
                "expected 'Claimed' or 'Unclaimed'",
            ));
        }
    }

    let verified = optional_text(row, "verified");
    if let Some(value) = verified.as_deref() {
        let known = value == VerificationStatus::Verified.label()
            || value == VerificationStatus::Unverified.label();
        if !known {
            violations.push(SchemaViolation::new(
                "verified",
                "expected 'Verified' or 'Unverified'",
            ));
        }
    }

    let claimed_at = optional_text(row, "claimed-at").and_then(|value| {
        let parsed = DateTime::parse_from_rfc3339(&value)
            .ok()
            .map(|stamp| stamp.with_timezone(&Utc));
        if parsed.is_none() {
            violations.push(SchemaViolation::new(
                "claimed-at",
                "expected an RFC 3339 timestamp",
            ));
        }
        parsed
    });

    let avg_rating = parse_rating(row, "avg-rating", &mut violations);
    let review_count = parse_nonnegative(row, "review-count", &mut violations);
    let years_experience = parse_nonnegative(row, "years-experience", &mut violations);

    if violations.is_empty() {
        if let (Some(id), Some(name)) = (id, name) {
            return Ok(AgentProfileInput {
                id: AgentId(id),
                name,
                agency_name,
                state,
                followers,
                reviews,
                suburbs: parse_list(row, "suburbs"),
                specializations: parse_list(row, "specializations"),
                about: optional_text(row, "about"),
                fee_structure: optional_text(row, "fee-structure"),
                profile_status,
                verified,
                claimed_at,
                avg_rating,
                review_count,
                years_experience,
            });
        }
    }

    Err(violations)
}

fn optional_text(row: &BTreeMap<String, String>, column: &str) -> Option<String> {
    row.get(column)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn required_text(
    row: &BTreeMap<String, String>,
    column: &str,
    violations: &mut Vec<SchemaViolation>,
) -> Option<String> {
    let value = optional_text(row, column);
    if value.is_none() {
        violations.push(SchemaViolation::new(column, "required field is missing"));
    }
    value
}

fn parse_list(row: &BTreeMap<String, String>, column: &str) -> Vec<String> {
    optional_text(row, column)
        .map(|value| {
            value
                .split(LIST_SEPARATOR)
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn parse_rating(
    row: &BTreeMap<String, String>,
    column: &str,
    violations: &mut Vec<SchemaViolation>,
) -> Option<f64> {
    let value = optional_text(row, column)?;
    match value.parse::<f64>() {
        Ok(rating) if rating.is_finite() && (0.0..=5.0).contains(&rating) => Some(rating),
        _ => {
            violations.push(SchemaViolation::new(
                column,
                "expected a rating between 0.0 and 5.0",
            ));
            None
        }
    }
}

fn parse_nonnegative(
    row: &BTreeMap<String, String>,
    column: &str,
    violations: &mut Vec<SchemaViolation>,
) -> Option<i64> {
    let value = optional_text(row, column)?;
    match value.parse::<i64>() {
        Ok(count) if count >= 0 => Some(count),
        _ => {
            violations.push(SchemaViolation::new(
                column,
                "expected a non-negative whole number",
            ));
            None
        }
    }
}
