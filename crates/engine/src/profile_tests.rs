use super::*;
use crate::config::DemographicDefaults;

fn sample_profile() -> Profile {
    Profile {
        personal: Personal {
            first_name: "Jordan".to_string(),
            last_name: "Rivera".to_string(),
            email: "jordan@example.com".to_string(),
            ..Default::default()
        },
        work_experience: vec![WorkExperienceEntry {
            company: "Acme Corp".to_string(),
            title: "Senior TPM".to_string(),
            current: true,
            ..Default::default()
        }],
        education: vec![EducationEntry {
            school: "State University".to_string(),
            ..Default::default()
        }],
        ..Default::default()
    }
}

#[test]
fn get_path_resolves_nested_personal_field() {
    let profile = sample_profile();
    assert_eq!(profile.get_path("personal.first_name").as_deref(), Some("Jordan"));
}

#[test]
fn get_path_resolves_indexed_collection() {
    let profile = sample_profile();
    assert_eq!(profile.get_path("work_experience.0.company").as_deref(), Some("Acme Corp"));
    assert_eq!(profile.get_path("education.0.school").as_deref(), Some("State University"));
}

#[test]
fn get_path_returns_none_for_empty_value() {
    let profile = sample_profile();
    assert_eq!(profile.get_path("personal.zip_code"), None);
}

#[test]
fn get_path_returns_none_for_out_of_range_index() {
    let profile = sample_profile();
    assert_eq!(profile.get_path("work_experience.5.company"), None);
}

#[test]
fn get_path_returns_none_for_unknown_field() {
    let profile = sample_profile();
    assert_eq!(profile.get_path("personal.nonexistent"), None);
}

#[test]
fn find_by_label_matches_email() {
    let profile = sample_profile();
    let (value, key) = profile.find_by_label("Email Address").unwrap();
    assert_eq!(value, "jordan@example.com");
    assert_eq!(key, "personal.email");
}

#[test]
fn find_by_label_prefers_education_date_pattern_over_generic() {
    let mut profile = sample_profile();
    profile.education[0].start_month = "09".to_string();
    let (value, key) = profile.find_by_label("Education Start Month").unwrap();
    assert_eq!(key, "education.0.start_month");
    assert_eq!(value, "09");
}

#[test]
fn find_yes_no_non_compete_overrides_agree() {
    let profile = sample_profile();
    let answer = profile.find_yes_no("Do you work under a non-compete agreement?");
    assert_eq!(answer, Some("No"));
}

#[test]
fn find_yes_no_generic_agree() {
    let profile = sample_profile();
    assert_eq!(profile.find_yes_no("Do you agree to the terms?"), Some("Yes"));
}

#[test]
fn find_demographic_prefers_profile_value_over_default() {
    let mut profile = sample_profile();
    profile.demographics.gender = "Non-binary".to_string();
    let defaults = DemographicDefaults::default();
    assert_eq!(profile.find_demographic("Gender", &defaults).as_deref(), Some("Non-binary"));
}

#[test]
fn find_demographic_falls_back_to_default() {
    let profile = sample_profile();
    let defaults = DemographicDefaults::default();
    assert_eq!(
        profile.find_demographic("Veteran status", &defaults).as_deref(),
        Some(defaults.veteran.as_str())
    );
}

#[test]
fn find_text_default_reads_from_profile_map() {
    let mut profile = sample_profile();
    profile.text_defaults.insert("desired salary".to_string(), "150000".to_string());
    assert_eq!(profile.find_text_default("Desired Salary ($)").as_deref(), Some("150000"));
}

#[test]
fn current_role_reflects_first_work_experience_entry() {
    assert!(sample_profile().current_role());
    assert!(!Profile::default().current_role());
}

#[test]
fn files_for_role_matches_tpm_pattern() {
    let mut profile = sample_profile();
    profile.files.default_role = "TPM".to_string();
    profile.files.by_role.insert(
        "TPM".to_string(),
        RoleFiles { cv: Some("tpm_cv.pdf".to_string()), cover_letter: None },
    );
    let (cv, cover) = profile.files_for_role("Technical Program Manager, Platform");
    assert_eq!(cv.as_deref(), Some("tpm_cv.pdf"));
    assert!(cover.is_none());
}
