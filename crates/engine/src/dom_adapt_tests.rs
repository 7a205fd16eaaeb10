use super::*;

#[test]
fn month_to_number_accepts_full_name() {
    assert_eq!(month_to_number("September"), Some("09".to_string()));
}

#[test]
fn month_to_number_accepts_abbreviation() {
    assert_eq!(month_to_number("Sep"), Some("09".to_string()));
}

#[test]
fn month_to_number_accepts_numeric_passthrough() {
    assert_eq!(month_to_number("9"), Some("09".to_string()));
}

#[test]
fn month_to_number_rejects_out_of_range() {
    assert_eq!(month_to_number("13"), None);
}

#[test]
fn month_to_number_rejects_unrecognized_text() {
    assert_eq!(month_to_number("banana"), None);
}

#[test]
fn rule1_mm_placeholder_converts_month_name() {
    let hints = DomHints { placeholder: Some("MM"), ..Default::default() };
    let (value, warning) = adapt_value_to_dom("March", &hints);
    assert_eq!(value, "03");
    assert!(warning.is_none());
}

#[test]
fn rule2_yyyy_placeholder_passes_year_through() {
    let hints = DomHints { placeholder: Some("YYYY"), ..Default::default() };
    let (value, _) = adapt_value_to_dom("2021", &hints);
    assert_eq!(value, "2021");
}

#[test]
fn rule2_yy_placeholder_truncates_to_last_two_digits() {
    let hints = DomHints { placeholder: Some("YY"), ..Default::default() };
    let (value, _) = adapt_value_to_dom("2021", &hints);
    assert_eq!(value, "21");
}

#[test]
fn rule3_short_maxlength_non_digit_converts_month() {
    let hints = DomHints { maxlength: Some(2), ..Default::default() };
    let (value, _) = adapt_value_to_dom("December", &hints);
    assert_eq!(value, "12");
}

#[test]
fn rule4_number_input_type_converts_month() {
    let hints = DomHints { input_type: Some("number"), ..Default::default() };
    let (value, _) = adapt_value_to_dom("July", &hints);
    assert_eq!(value, "07");
}

#[test]
fn rule5_digit_pattern_converts_month() {
    let hints = DomHints { pattern: Some("[0-9]{1,2}"), ..Default::default() };
    let (value, _) = adapt_value_to_dom("April", &hints);
    assert_eq!(value, "04");
}

#[test]
fn rule6_general_maxlength_truncates_with_warning() {
    let hints = DomHints { maxlength: Some(5), ..Default::default() };
    let (value, warning) = adapt_value_to_dom("Supercalifragilistic", &hints);
    assert_eq!(value, "Super");
    assert!(warning.is_some());
}

#[test]
fn no_hints_passes_value_through_unchanged() {
    let hints = DomHints::default();
    let (value, warning) = adapt_value_to_dom("hello world", &hints);
    assert_eq!(value, "hello world");
    assert!(warning.is_none());
}
