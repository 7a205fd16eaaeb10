// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Repeatable section definitions: `work_experience` and `education`
//! entries render as N near-identical blocks of fields, each following a
//! known id/name template. Grounded in `engine.py`'s
//! `REPEATABLE_SECTIONS` seed data, used both as a known-selector table
//! (Field Detector layer 3) and to drive the Autofill Engine's
//! add-another-entry loop.

use crate::field_detector::FieldType;
use std::sync::OnceLock;

/// One field within a repeatable section template: a selector fragment
/// containing a `{N}` placeholder for the repeat index, the profile
/// field it maps to, and the type it should be detected as.
#[derive(Debug, Clone)]
pub struct RepeatableFieldPattern {
    pub id_template: &'static str,
    pub profile_field: &'static str,
    pub field_type: FieldType,
}

#[derive(Debug, Clone)]
pub struct RepeatableSection {
    pub name: &'static str,
    pub profile_list: &'static str,
    pub field_patterns: &'static [RepeatableFieldPattern],
    pub skip_end_date_if_current: bool,
}

fn sections() -> &'static [RepeatableSection] {
    static SECTIONS: OnceLock<Vec<RepeatableSection>> = OnceLock::new();
    SECTIONS
        .get_or_init(|| {
            vec![
                RepeatableSection {
                    name: "work_experience",
                    profile_list: "work_experience",
                    field_patterns: &[
                        RepeatableFieldPattern {
                            id_template: "company-name-{N}",
                            profile_field: "company",
                            field_type: FieldType::Text,
                        },
                        RepeatableFieldPattern {
                            id_template: "title-{N}",
                            profile_field: "title",
                            field_type: FieldType::Text,
                        },
                        RepeatableFieldPattern {
                            id_template: "start-date-month-{N}",
                            profile_field: "start_month",
                            field_type: FieldType::Date,
                        },
                        RepeatableFieldPattern {
                            id_template: "start-date-year-{N}",
                            profile_field: "start_year",
                            field_type: FieldType::Date,
                        },
                        RepeatableFieldPattern {
                            id_template: "end-date-month-{N}",
                            profile_field: "end_month",
                            field_type: FieldType::Date,
                        },
                        RepeatableFieldPattern {
                            id_template: "end-date-year-{N}",
                            profile_field: "end_year",
                            field_type: FieldType::Date,
                        },
                        RepeatableFieldPattern {
                            id_template: "current-{N}",
                            profile_field: "current",
                            field_type: FieldType::Checkbox,
                        },
                    ],
                    skip_end_date_if_current: true,
                },
                RepeatableSection {
                    name: "education",
                    profile_list: "education",
                    field_patterns: &[
                        RepeatableFieldPattern {
                            id_template: "job_application[educations][][school_name]",
                            profile_field: "school",
                            field_type: FieldType::Autocomplete,
                        },
                        RepeatableFieldPattern {
                            id_template: "job_application[educations][][discipline]",
                            profile_field: "discipline",
                            field_type: FieldType::Autocomplete,
                        },
                        RepeatableFieldPattern {
                            id_template: "job_application[educations][][degree]",
                            profile_field: "degree",
                            field_type: FieldType::Select,
                        },
                        RepeatableFieldPattern {
                            id_template: "job_application[educations][][start_date][month]",
                            profile_field: "start_month",
                            field_type: FieldType::Date,
                        },
                        RepeatableFieldPattern {
                            id_template: "job_application[educations][][start_date][year]",
                            profile_field: "start_year",
                            field_type: FieldType::Date,
                        },
                        RepeatableFieldPattern {
                            id_template: "job_application[educations][][end_date][month]",
                            profile_field: "end_month",
                            field_type: FieldType::Date,
                        },
                        RepeatableFieldPattern {
                            id_template: "job_application[educations][][end_date][year]",
                            profile_field: "end_year",
                            field_type: FieldType::Date,
                        },
                        // legacy dual-id Select2 format, no `[]` index segment
                        RepeatableFieldPattern {
                            id_template: "education_school_name_{N}",
                            profile_field: "school",
                            field_type: FieldType::Autocomplete,
                        },
                    ],
                    skip_end_date_if_current: false,
                },
            ]
        })
        .as_slice()
}

pub fn all_sections() -> &'static [RepeatableSection] {
    sections()
}

/// Extracts the repeat index `{N}` stands for from whichever of
/// `selector`/`element_id`/`name` matches `template`'s fixed prefix/suffix,
/// or `None` if `template` has no `{N}` placeholder (an exact, unindexed
/// match) or none of the three candidates fit the template shape.
fn extract_index(template: &str, selector: &str, element_id: &str, name: &str) -> Option<usize> {
    let prefix_suffix: Vec<&str> = template.splitn(2, "{N}").collect();
    let (prefix, suffix) = (prefix_suffix[0], prefix_suffix[1]);
    let candidates = [selector, element_id, name];
    candidates.iter().find_map(|candidate| {
        if candidate.starts_with(prefix)
            && candidate.ends_with(suffix)
            && candidate.len() >= prefix.len() + suffix.len()
        {
            let digits = &candidate[prefix.len()..candidate.len() - suffix.len()];
            (!digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
                .then(|| digits.parse::<usize>().ok())
                .flatten()
        } else {
            None
        }
    })
}

fn template_matches(template: &str, selector: &str, element_id: &str, name: &str) -> bool {
    if !template.contains("{N}") {
        return element_id == template || name == template;
    }
    extract_index(template, selector, element_id, name).is_some()
}

/// Looks up whether `selector`/`element_id`/`name` matches a known
/// repeatable-section field template, returning the type that template
/// declares. Used as the Field Detector's third cascade layer.
pub fn detect_known_selector(selector: &str, element_id: &str, name: &str) -> Option<FieldType> {
    for section in sections() {
        for pattern in section.field_patterns {
            if template_matches(pattern.id_template, selector, element_id, name) {
                return Some(pattern.field_type);
            }
        }
    }
    None
}

/// Matches `selector`/`element_id`/`name` against every repeatable-section
/// field template, returning the owning section, the specific field
/// pattern, and the repeat index `{N}` resolved to — the data the
/// Autofill Engine needs to fill entry `N` of a profile list (`company-
/// name-1` fills `work_experience.1.company`) and to apply the
/// skip-end-date-if-current rule for that specific entry. Unindexed
/// templates (no `{N}`) never match here, since there is no entry index
/// to resolve a profile list against.
pub fn match_repeatable(
    selector: &str,
    element_id: &str,
    name: &str,
) -> Option<(&'static RepeatableSection, &'static RepeatableFieldPattern, usize)> {
    for section in sections() {
        for pattern in section.field_patterns {
            if !pattern.id_template.contains("{N}") {
                continue;
            }
            if let Some(idx) = extract_index(pattern.id_template, selector, element_id, name) {
                return Some((section, pattern, idx));
            }
        }
    }
    None
}

#[cfg(test)]
#[path = "repeatable_tests.rs"]
mod tests;
