use super::*;

#[test]
fn build_location_joins_non_empty_parts() {
    let loc = SmartRecruitersLocation {
        city: Some("Raleigh".to_string()),
        region: Some("".to_string()),
        country: Some("US".to_string()),
    };
    assert_eq!(
        SmartRecruitersParser::build_location(&loc),
        "Raleigh, US"
    );
}

#[test]
fn resolve_url_passes_through_absolute_refs() {
    let url = SmartRecruitersParser::resolve_url(
        "https://jobs.smartrecruiters.com/Acme",
        "https://other.example.com/job/1",
    );
    assert_eq!(url, "https://other.example.com/job/1");
}

#[test]
fn resolve_url_joins_relative_refs_against_board_url() {
    let url = SmartRecruitersParser::resolve_url(
        "https://jobs.smartrecruiters.com/Acme",
        "/job/1",
    );
    assert_eq!(url, "https://jobs.smartrecruiters.com/Acme/job/1");
}
