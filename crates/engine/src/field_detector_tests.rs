use super::*;

fn base_element() -> RawElement {
    RawElement {
        selector: "#email".to_string(),
        visible: true,
        ..Default::default()
    }
}

#[test]
fn detects_textarea_from_html_tag() {
    let el = RawElement { html_tag: "textarea".to_string(), ..base_element() };
    assert_eq!(detect_type(&el), (FieldType::Textarea, DetectionMethod::Html));
}

#[test]
fn detects_email_from_input_type() {
    let el = RawElement { html_tag: "input".to_string(), input_type: "email".to_string(), ..base_element() };
    assert_eq!(detect_type(&el), (FieldType::Email, DetectionMethod::Html));
}

#[test]
fn detects_autocomplete_from_aria_combobox_role() {
    let el = RawElement { html_tag: "div".to_string(), role: "combobox".to_string(), ..base_element() };
    assert_eq!(detect_type(&el), (FieldType::Autocomplete, DetectionMethod::Aria));
}

#[test]
fn detects_autocomplete_from_aria_haspopup_listbox() {
    let el = RawElement { html_tag: "input".to_string(), aria_haspopup: "listbox".to_string(), ..base_element() };
    assert_eq!(detect_type(&el), (FieldType::Autocomplete, DetectionMethod::Aria));
}

#[test]
fn detects_repeatable_section_field_via_known_selector_table() {
    let el = RawElement {
        html_tag: "input".to_string(),
        element_id: "start-date-month-1".to_string(),
        ..base_element()
    };
    assert_eq!(detect_type(&el), (FieldType::Date, DetectionMethod::Pattern));
}

#[test]
fn falls_back_to_default_text() {
    let el = RawElement { html_tag: "div".to_string(), ..base_element() };
    assert_eq!(detect_type(&el), (FieldType::Text, DetectionMethod::Default));
}

#[test]
fn find_label_prefers_label_for_text_over_other_sources() {
    let el = RawElement {
        label_for_text: "Email Address".to_string(),
        aria_label: "fallback".to_string(),
        name: "email".to_string(),
        ..base_element()
    };
    assert_eq!(find_label(&el), "Email Address [email]");
}

#[test]
fn find_label_falls_back_through_cascade_to_aria_label() {
    let el = RawElement { aria_label: "Phone Number".to_string(), name: "phone".to_string(), ..base_element() };
    assert_eq!(find_label(&el), "Phone Number [phone]");
}

#[test]
fn find_label_falls_back_to_name_when_nothing_else_present() {
    let el = RawElement { name: "custom_field_1".to_string(), ..base_element() };
    assert_eq!(find_label(&el), "custom_field_1");
}

#[test]
fn find_label_falls_back_to_element_id_when_name_is_empty() {
    let el = RawElement { element_id: "field-42".to_string(), ..base_element() };
    assert_eq!(find_label(&el), "field-42");
}

#[test]
fn classify_combines_detection_and_label() {
    let el = RawElement {
        html_tag: "input".to_string(),
        input_type: "email".to_string(),
        label_for_text: "Email".to_string(),
        name: "email".to_string(),
        required: true,
        ..base_element()
    };
    let field = classify(&el);
    assert_eq!(field.field_type, FieldType::Email);
    assert_eq!(field.detection_method, DetectionMethod::Html);
    assert!(field.required);
    assert_eq!(field.label, "Email [email]");
}
