// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Field Detector: classifies each `RawElement` the page transport
//! scanned into a `FieldType`, and derives a human-readable label for it.
//! Grounded in `engine.py`'s `_detect_type` and `_find_label`.

use jobpipe_adapters::page::RawElement;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Email,
    Phone,
    Textarea,
    Select,
    Autocomplete,
    Checkbox,
    Radio,
    File,
    Date,
    Hidden,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    Html,
    Aria,
    Probe,
    Vision,
    Pattern,
    Default,
}

/// A classified, labeled form field, ready for the Answer Resolver.
#[derive(Debug, Clone)]
pub struct FormField {
    pub selector: String,
    pub frame: Option<String>,
    pub field_type: FieldType,
    pub detection_method: DetectionMethod,
    pub label: String,
    pub required: bool,
    pub repeatable_key: Option<String>,
}

/// One entry in the known-selector table: an element id/name template
/// (with a `{N}` placeholder for the repeat index) known in advance to
/// belong to a repeatable section, mapped to the profile field it fills.
/// Seeded from `REPEATABLE_SECTIONS` — see `repeatable.rs`.
pub fn detect_type(el: &RawElement) -> (FieldType, DetectionMethod) {
    // Layer 1: HTML tag/type is authoritative when present.
    let tag = el.html_tag.to_lowercase();
    let input_type = el.input_type.to_lowercase();
    match tag.as_str() {
        "textarea" => return (FieldType::Textarea, DetectionMethod::Html),
        "select" => return (FieldType::Select, DetectionMethod::Html),
        _ => {}
    }
    match input_type.as_str() {
        "email" => return (FieldType::Email, DetectionMethod::Html),
        "tel" => return (FieldType::Phone, DetectionMethod::Html),
        "checkbox" => return (FieldType::Checkbox, DetectionMethod::Html),
        "radio" => return (FieldType::Radio, DetectionMethod::Html),
        "file" => return (FieldType::File, DetectionMethod::Html),
        "date" => return (FieldType::Date, DetectionMethod::Html),
        "hidden" => return (FieldType::Hidden, DetectionMethod::Html),
        "" => {}
        _ => return (FieldType::Text, DetectionMethod::Html),
    }

    // Layer 2: ARIA role / aria-haspopup, for custom widgets with no
    // native input type (Select2, combo boxes, React-rendered dropdowns).
    let role = el.role.to_lowercase();
    let haspopup = el.aria_haspopup.to_lowercase();
    if role == "combobox" || haspopup == "listbox" || haspopup == "true" {
        return (FieldType::Autocomplete, DetectionMethod::Aria);
    }
    if role == "listbox" {
        return (FieldType::Select, DetectionMethod::Aria);
    }

    // Layer 3: known-selector table for repeatable-section date/select
    // fields whose HTML/ARIA gives no reliable hint (bare numeric text
    // inputs used as Greenhouse's month/year selects).
    if let Some(field_type) = crate::repeatable::detect_known_selector(&el.selector, &el.element_id, &el.name) {
        return (field_type, DetectionMethod::Pattern);
    }

    // Default.
    (FieldType::Text, DetectionMethod::Default)
}

/// Derives a label for `el` by the cascade's 4 sources, in priority
/// order, then falls back to aria-label/placeholder, then name/id.
/// Appends `[name]` when the element's `name` differs from the derived
/// label (disambiguates repeated labels like "Month" across sections).
pub fn find_label(el: &RawElement) -> String {
    let base = if !el.label_for_text.trim().is_empty() {
        Some(el.label_for_text.trim().to_string())
    } else if !el.parent_label_text.trim().is_empty() {
        Some(el.parent_label_text.trim().to_string())
    } else if !el.field_div_label_text.trim().is_empty() {
        Some(el.field_div_label_text.trim().to_string())
    } else if !el.fieldset_legend_text.trim().is_empty() {
        Some(el.fieldset_legend_text.trim().to_string())
    } else if !el.aria_label.trim().is_empty() {
        Some(el.aria_label.trim().to_string())
    } else if !el.placeholder.trim().is_empty() {
        Some(el.placeholder.trim().to_string())
    } else if !el.context_discovery_text.trim().is_empty() {
        Some(el.context_discovery_text.trim().to_string())
    } else {
        None
    };

    let label = base.unwrap_or_else(|| {
        if !el.name.is_empty() {
            el.name.clone()
        } else {
            el.element_id.clone()
        }
    });

    if !el.name.is_empty() && !label.eq_ignore_ascii_case(&el.name) {
        format!("{label} [{}]", el.name)
    } else {
        label
    }
}

/// Runs detection and label derivation together, producing a `FormField`
/// ready for the resolver. Elements marked not `visible` or with
/// `FieldType::Hidden` are still classified (the caller decides whether
/// to skip them during fill).
pub fn classify(el: &RawElement) -> FormField {
    let (field_type, detection_method) = detect_type(el);
    FormField {
        selector: el.selector.clone(),
        frame: el.frame.clone(),
        field_type,
        detection_method,
        label: find_label(el),
        required: el.required,
        repeatable_key: None,
    }
}

#[cfg(test)]
#[path = "field_detector_tests.rs"]
mod tests;
