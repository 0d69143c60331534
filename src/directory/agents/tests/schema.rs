use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};

use crate::directory::agents::domain::{
    RawCount, ReviewSource, SocialPlatform, StateCode,
};
use crate::directory::agents::schema::validate_row;

fn row(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

fn canonical_row() -> BTreeMap<String, String> {
    row(&[
        ("id", "agent-001"),
        ("name", "Sophie Chen"),
        ("agency-name", "Chen Buyer Advocates"),
        ("state", "NSW"),
        ("instagram", "5000"),
        ("facebook", "3000"),
        ("review-google-rating", "4.8"),
        ("review-google-count", "120"),
        ("suburbs", "Bondi|Coogee"),
        ("specializations", "Auction bidding"),
        ("about", "Eastern suburbs buyer's agent."),
        ("fee-structure", "Fixed fee"),
        ("profile-status", "Unclaimed"),
        ("verified", "Verified"),
        ("claimed-at", ""),
        ("avg-rating", "4.8"),
        ("review-count", "120"),
        ("years-experience", "9"),
        ("social-presence-tier", "A"),
    ])
}

#[test]
fn canonical_row_converts_into_a_profile() {
    let profile = validate_row(&canonical_row()).expect("row validates");

    assert_eq!(profile.id.0, "agent-001");
    assert_eq!(profile.name, "Sophie Chen");
    assert_eq!(profile.state, Some(StateCode::Nsw));
    assert_eq!(
        profile.followers.get(&SocialPlatform::Instagram),
        Some(&RawCount::Text("5000".to_string()))
    );
    let google = profile
        .reviews
        .get(&ReviewSource::Google)
        .expect("google review pair");
    assert_eq!(google.rating, Some(4.8));
    assert_eq!(google.count, Some(120));
    assert_eq!(profile.suburbs, vec!["Bondi", "Coogee"]);
    assert_eq!(profile.specializations, vec!["Auction bidding"]);
    assert_eq!(profile.profile_status.as_deref(), Some("Unclaimed"));
    assert_eq!(profile.verified.as_deref(), Some("Verified"));
    assert_eq!(profile.claimed_at, None);
    assert_eq!(profile.years_experience, Some(9));
}

#[test]
fn minimal_row_needs_only_identity() {
    let profile = validate_row(&row(&[("id", "agent-002"), ("name", "Liam Moore")]))
        .expect("identity-only row validates");
    assert!(profile.followers.is_empty());
    assert!(profile.reviews.is_empty());
    assert_eq!(profile.state, None);
}

#[test]
fn unknown_columns_are_rejected_by_path() {
    let mut bad = canonical_row();
    bad.insert("specialisations".to_string(), "Prestige".to_string());
    bad.insert("favourite-colour".to_string(), "teal".to_string());

    let violations = validate_row(&bad).expect_err("unknown columns rejected");
    assert!(violations
        .iter()
        .any(|violation| violation.field == "specialisations"
            && violation.message == "unknown column"));
    assert!(violations
        .iter()
        .any(|violation| violation.field == "favourite-colour"));
}

#[test]
fn enumerated_values_are_enforced() {
    let mut bad = canonical_row();
    bad.insert("state".to_string(), "QLDX".to_string());
    bad.insert("profile-status".to_string(), "claimed".to_string());
    bad.insert("verified".to_string(), "true".to_string());
    bad.insert("social-presence-tier".to_string(), "AA".to_string());

    let violations = validate_row(&bad).expect_err("bad enums rejected");
    for field in ["state", "profile-status", "verified", "social-presence-tier"] {
        assert!(
            violations.iter().any(|violation| violation.field == field),
            "expected a violation for {field}"
        );
    }
}

#[test]
fn numeric_fields_are_type_checked() {
    let mut bad = canonical_row();
    bad.insert("instagram".to_string(), "many".to_string());
    bad.insert("review-google-rating".to_string(), "6.1".to_string());
    bad.insert("review-google-count".to_string(), "-5".to_string());
    bad.insert("years-experience".to_string(), "three".to_string());

    let violations = validate_row(&bad).expect_err("bad numbers rejected");
    for field in [
        "instagram",
        "review-google-rating",
        "review-google-count",
        "years-experience",
    ] {
        assert!(
            violations.iter().any(|violation| violation.field == field),
            "expected a violation for {field}"
        );
    }
}

#[test]
fn missing_identity_fields_are_reported() {
    let violations = validate_row(&row(&[("state", "VIC")])).expect_err("identity required");
    assert!(violations
        .iter()
        .any(|violation| violation.field == "id"
            && violation.message == "required field is missing"));
    assert!(violations.iter().any(|violation| violation.field == "name"));
}

#[test]
fn every_violation_in_a_row_is_reported_at_once() {
    let bad = row(&[
        ("name", "No Id"),
        ("state", "ZZZ"),
        ("tiktok", "viral"),
        ("verified", "maybe"),
    ]);

    let violations = validate_row(&bad).expect_err("row rejected");
    assert_eq!(violations.len(), 4);
}

#[test]
fn claim_timestamps_must_be_rfc3339() {
    let mut good = canonical_row();
    good.insert(
        "claimed-at".to_string(),
        "2026-02-10T03:00:00Z".to_string(),
    );
    let profile = validate_row(&good).expect("timestamp accepted");
    assert_eq!(
        profile.claimed_at,
        Utc.with_ymd_and_hms(2026, 2, 10, 3, 0, 0).single()
    );

    let mut bad = canonical_row();
    bad.insert("claimed-at".to_string(), "yesterday".to_string());
    let violations = validate_row(&bad).expect_err("timestamp rejected");
    assert!(violations
        .iter()
        .any(|violation| violation.field == "claimed-at"));
}
