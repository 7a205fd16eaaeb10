use super::*;

#[test]
fn registry_covers_every_built_in_ats_tag() {
    let registry = build_registry(reqwest::Client::new());
    for tag in ["greenhouse", "lever", "ashby", "smartrecruiters", "workday"] {
        assert!(registry.contains_key(tag), "missing parser for {tag}");
    }
    assert_eq!(registry.len(), 5);
}
