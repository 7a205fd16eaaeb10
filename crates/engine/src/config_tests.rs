use super::*;

#[test]
fn role_classifier_defaults_match_original_keyword_sets() {
    let cfg = RoleClassifierConfig::default();
    assert!(cfg.negatives.iter().any(|s| s == "engineer"));
    assert!(cfg.product_keywords.iter().any(|s| s == "product manager"));
    assert!(cfg.tpm_keywords.iter().any(|s| s == "technical program manager"));
    assert!(cfg.project_keywords.iter().any(|s| s == "project manager"));
}

#[test]
fn geo_config_defaults_are_non_empty() {
    let cfg = GeoConfig::default();
    assert_eq!(cfg.target_state, "NC");
    assert!(cfg.neighbor_states.contains(&"VA".to_string()));
    assert!(cfg.local_cities.contains(&"raleigh".to_string()));
}

#[test]
fn scoring_config_default_matches_weights() {
    let cfg = ScoringConfig::default();
    assert_eq!(cfg.state_match_bonus, 30);
    assert_eq!(cfg.stale_after_days, 60);
}
