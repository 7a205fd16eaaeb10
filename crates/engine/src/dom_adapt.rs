// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapts a resolved answer value to the conventions a specific DOM
//! element expects before it is typed in — chiefly month names vs.
//! numbers and year truncation. Grounded in `engine.py`'s
//! `_adapt_value_to_dom`/`_adapt_value_to_dom_element`/`_month_to_number`.

use std::sync::OnceLock;

const MONTH_NAMES: &[(&str, &str)] = &[
    ("january", "01"),
    ("jan", "01"),
    ("february", "02"),
    ("feb", "02"),
    ("march", "03"),
    ("mar", "03"),
    ("april", "04"),
    ("apr", "04"),
    ("may", "05"),
    ("june", "06"),
    ("jun", "06"),
    ("july", "07"),
    ("jul", "07"),
    ("august", "08"),
    ("aug", "08"),
    ("september", "09"),
    ("sep", "09"),
    ("sept", "09"),
    ("october", "10"),
    ("oct", "10"),
    ("november", "11"),
    ("nov", "11"),
    ("december", "12"),
    ("dec", "12"),
];

fn month_map() -> &'static std::collections::HashMap<&'static str, &'static str> {
    static MAP: OnceLock<std::collections::HashMap<&'static str, &'static str>> = OnceLock::new();
    MAP.get_or_init(|| MONTH_NAMES.iter().copied().collect())
}

/// Resolves a month name (any casing, full or abbreviated) or a numeric
/// string to a zero-padded two-digit month number. Returns `None` if
/// `value` is not recognizable as a month.
pub fn month_to_number(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if let Ok(n) = trimmed.parse::<u32>() {
        if (1..=12).contains(&n) {
            return Some(format!("{n:02}"));
        }
        return None;
    }
    month_map().get(trimmed.to_lowercase().as_str()).map(|s| s.to_string())
}

/// Hints about the target DOM element, gathered by the caller from
/// `RawElement` fields, used to decide which adaptation rule applies.
#[derive(Debug, Clone, Default)]
pub struct DomHints<'a> {
    pub placeholder: Option<&'a str>,
    pub maxlength: Option<u32>,
    pub input_type: Option<&'a str>,
    pub pattern: Option<&'a str>,
}

/// Adapts `value` to what the element described by `hints` expects.
/// Applies the first matching rule; falls through unchanged if none
/// apply. Returns `(adapted_value, warning)` — `warning` is set when
/// rule 6 truncates a value that wasn't otherwise recognized.
pub fn adapt_value_to_dom(value: &str, hints: &DomHints<'_>) -> (String, Option<String>) {
    // Rule 1: placeholder is a month-number template (MM or M) -> convert name to number.
    if let Some(ph) = hints.placeholder {
        let ph_lower = ph.to_lowercase();
        if ph_lower == "mm" || ph_lower == "m" {
            if let Some(converted) = month_to_number(value) {
                return (converted, None);
            }
        }
        // Rule 2: placeholder is a year template (YYYY or YY) -> numeric passthrough, YY truncates.
        if ph_lower == "yyyy" {
            if value.chars().all(|c| c.is_ascii_digit()) {
                return (value.to_string(), None);
            }
        } else if ph_lower == "yy" {
            if value.chars().all(|c| c.is_ascii_digit()) && value.len() >= 2 {
                return (value[value.len() - 2..].to_string(), None);
            }
        }
    }

    // Rule 3: short maxlength with a non-digit value -> try month conversion.
    if let Some(maxlength) = hints.maxlength {
        if maxlength <= 2 && !value.chars().all(|c| c.is_ascii_digit()) {
            if let Some(converted) = month_to_number(value) {
                return (converted, None);
            }
        }
    }

    // Rule 4: numeric-ish input types -> try month conversion.
    if matches!(hints.input_type, Some("number") | Some("tel")) {
        if let Some(converted) = month_to_number(value) {
            return (converted, None);
        }
    }

    // Rule 5: HTML5 pattern starting with a digit class -> try month conversion.
    if let Some(pattern) = hints.pattern {
        if pattern.starts_with("[0-9]") {
            if let Some(converted) = month_to_number(value) {
                return (converted, None);
            }
        }
    }

    // Rule 6: general maxlength truncation, with a warning since the value
    // wasn't otherwise recognized as something this element expects.
    if let Some(maxlength) = hints.maxlength {
        let maxlength = maxlength as usize;
        if value.len() > maxlength {
            let truncated: String = value.chars().take(maxlength).collect();
            let warning = format!(
                "truncated value '{value}' to {maxlength} characters to fit maxlength: '{truncated}'"
            );
            return (truncated, Some(warning));
        }
    }

    (value.to_string(), None)
}

#[cfg(test)]
#[path = "dom_adapt_tests.rs"]
mod tests;
