use super::*;

#[test]
fn slug_takes_last_path_segment() {
    assert_eq!(
        GreenhouseParser::slug("https://boards.greenhouse.io/acme"),
        "acme"
    );
    assert_eq!(
        GreenhouseParser::slug("https://boards.greenhouse.io/acme/"),
        "acme"
    );
}

#[test]
fn ats_tag_is_greenhouse() {
    let parser = GreenhouseParser::new(reqwest::Client::new());
    assert_eq!(parser.ats_tag(), "greenhouse");
}
