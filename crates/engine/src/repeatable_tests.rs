use super::*;

#[test]
fn detects_work_experience_company_field_by_index() {
    let field_type = detect_known_selector("#company-name-0", "company-name-0", "company-name-0");
    assert_eq!(field_type, Some(FieldType::Text));
}

#[test]
fn detects_work_experience_start_month_as_date() {
    let field_type = detect_known_selector("#start-date-month-2", "start-date-month-2", "");
    assert_eq!(field_type, Some(FieldType::Date));
}

#[test]
fn detects_greenhouse_education_name_selector() {
    let field_type = detect_known_selector(
        "",
        "",
        "job_application[educations][][start_date][month]",
    );
    assert_eq!(field_type, Some(FieldType::Date));
}

#[test]
fn does_not_match_unrelated_selector() {
    assert_eq!(detect_known_selector("#favorite-color", "favorite-color", ""), None);
}

#[test]
fn work_experience_section_skips_end_date_when_current() {
    let section = all_sections().iter().find(|s| s.name == "work_experience").unwrap();
    assert!(section.skip_end_date_if_current);
}

#[test]
fn education_section_does_not_skip_end_date_when_current() {
    let section = all_sections().iter().find(|s| s.name == "education").unwrap();
    assert!(!section.skip_end_date_if_current);
}
