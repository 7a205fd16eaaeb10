use super::*;
use yare::parameterized;

#[test]
fn empty_location_returns_default() {
    let norm = normalize_location(None);
    assert_eq!(norm.raw, "");
    assert!(norm.city.is_none());
    assert!(!norm.remote);
}

#[test]
fn city_state_pair_is_parsed() {
    let norm = normalize_location(Some("Raleigh, NC"));
    assert_eq!(norm.city.as_deref(), Some("Raleigh"));
    assert_eq!(norm.state.as_deref(), Some("NC"));
    assert_eq!(norm.state_full.as_deref(), Some("North Carolina"));
}

#[test]
fn full_state_name_resolves_to_code() {
    let norm = normalize_location(Some("Austin, Texas"));
    assert_eq!(norm.state.as_deref(), Some("TX"));
}

#[parameterized(
    remote_usa = {"Remote - USA", RemoteScope::Usa},
    us_remote = {"US Remote", RemoteScope::Usa},
    remote_paren_usa = {"Remote (USA)", RemoteScope::Usa},
    global_remote = {"Remote", RemoteScope::Global},
    worldwide = {"Worldwide", RemoteScope::Global},
)]
fn remote_scope_detection(raw: &str, expected: RemoteScope) {
    let norm = normalize_location(Some(raw));
    assert!(norm.remote);
    assert_eq!(norm.remote_scope, Some(expected));
}

#[test]
fn non_us_country_skips_state_matching_even_with_substring_city() {
    // "Indianapolis" contains "india" but is not Indian, so word-boundary
    // matching must not treat it as a non-US location.
    let norm = normalize_location(Some("Indianapolis, IN"));
    assert_eq!(norm.state.as_deref(), Some("IN"));

    let foreign = normalize_location(Some("Bangalore, India"));
    assert!(foreign.state.is_none());
    assert_eq!(foreign.city.as_deref(), Some("Bangalore"));
}

#[test]
fn multi_state_location_picks_alphabetically_first_as_primary() {
    // Open Question 2: primary state is the first alphabetically, not the
    // first encountered in the raw string.
    let norm = normalize_location(Some("New York, NY; Austin, TX"));
    assert_eq!(norm.states, vec!["NY".to_string(), "TX".to_string()]);
    assert_eq!(norm.state.as_deref(), Some("NY"));
}

#[test]
fn classify_role_matches_product_keyword() {
    let cfg = RoleClassifierConfig::default();
    let (family, confidence, _) = classify_role(Some("Senior Product Manager"), None, &cfg);
    assert_eq!(family, RoleFamily::Product);
    assert_eq!(confidence, 1.0);
}

#[test]
fn classify_role_negative_keyword_wins_over_positive_match() {
    let cfg = RoleClassifierConfig::default();
    // Contains "program manager" but also "engineer" — negatives checked first.
    let (family, _, reason) = classify_role(Some("Program Manager, Engineer Tools"), None, &cfg);
    assert_eq!(family, RoleFamily::Other);
    assert!(reason.contains("engineer"));
}

#[test]
fn classify_role_no_title_is_zero_confidence() {
    let cfg = RoleClassifierConfig::default();
    let (family, confidence, _) = classify_role(None, None, &cfg);
    assert_eq!(family, RoleFamily::Other);
    assert_eq!(confidence, 0.0);
}

#[test]
fn geo_bucket_local_city_in_target_state() {
    let cfg = GeoConfig::default();
    let loc = LocationNorm {
        city: Some("Raleigh".to_string()),
        state: Some("NC".to_string()),
        ..Default::default()
    };
    assert_eq!(compute_geo_bucket_and_score(&loc, &cfg), (GeoBucket::Local, 100));
}

#[test]
fn geo_bucket_remote_usa() {
    let cfg = GeoConfig::default();
    let loc = LocationNorm {
        remote: true,
        remote_scope: Some(RemoteScope::Usa),
        ..Default::default()
    };
    assert_eq!(compute_geo_bucket_and_score(&loc, &cfg), (GeoBucket::RemoteUsa, 50));
}

#[test]
fn geo_bucket_unknown_for_empty_location() {
    let cfg = GeoConfig::default();
    let loc = LocationNorm::default();
    assert_eq!(compute_geo_bucket_and_score(&loc, &cfg), (GeoBucket::Unknown, 0));
}
