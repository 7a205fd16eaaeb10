// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Autofill Engine: drives a [`PageController`] through a scan →
//! resolve → fill → verify cycle for a single application form.
//! Grounded in `engine.py`'s `_fill_all_fields`/`_fill_field`/
//! `_validate_field` and the per-type `_fill_*` helpers.

use crate::config::DemographicDefaults;
use crate::dom_adapt::{self, DomHints};
use crate::error::AutofillError;
use crate::field_detector::{self, FieldType, FormField};
use crate::knowledge_base::KnowledgeBase;
use crate::profile::{GetByPath, Profile};
use crate::repeatable;
use crate::resolver::{self, AnswerSource};
use jobpipe_adapters::oracle::Oracle;
use jobpipe_adapters::page::{PageController, RawElement};
use jobpipe_storage::LearnedDb;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillStatus {
    Ready,
    Filled,
    Verified,
    NeedsInput,
    Skipped,
    Error,
}

/// One field's outcome after a fill/verify pass.
#[derive(Debug, Clone)]
pub struct FillReport {
    pub selector: String,
    pub label: String,
    pub field_type: FieldType,
    pub value: Option<String>,
    pub source: Option<AnswerSource>,
    pub status: FillStatus,
}

/// Dependencies the fill loop consults, bundled so call sites don't thread
/// five separate references through every helper.
pub struct FillContext<'a> {
    pub profile: &'a Profile,
    pub learned: &'a LearnedDb,
    pub knowledge_base: &'a KnowledgeBase,
    pub demographics: &'a DemographicDefaults,
    pub primary_oracle: Option<&'a dyn Oracle>,
    pub remote_oracle: Option<&'a dyn Oracle>,
}

const ACTION_TIMEOUT: Duration = Duration::from_secs(10);

pub(crate) fn dom_hints(el: &RawElement) -> DomHints<'_> {
    DomHints {
        placeholder: (!el.placeholder.is_empty()).then_some(el.placeholder.as_str()),
        maxlength: el.maxlength.map(|m| m as u32),
        input_type: (!el.input_type.is_empty()).then_some(el.input_type.as_str()),
        pattern: (!el.pattern.is_empty()).then_some(el.pattern.as_str()),
    }
}

/// Outcome of resolving one scanned element, distinguishing "no answer
/// available" (surfaced as `needs_input`) from "this field is
/// intentionally left blank" (the repeatable-section skip-end-date-if-
/// current rule, surfaced as `skipped` rather than flagged for attention).
pub(crate) enum Resolution {
    Value(String, AnswerSource),
    Skip,
    None,
}

/// Checks whether `el` is a known repeatable-section field (`company-
/// name-{N}`, `education_school_name_{N}`, …) and if so resolves it
/// directly against the indexed profile-list entry (`work_experience.N.
/// company`) rather than the generic always-index-0 label cascade.
/// Applies the skip-end-date-if-current rule for the matched entry along
/// the way (§4.G's skip rule applies to work-experience entries only, not
/// education — encoded per-section via `skip_end_date_if_current`).
pub(crate) fn resolve_repeatable(el: &RawElement, profile: &Profile) -> Option<Resolution> {
    let (section, pattern, idx) = repeatable::match_repeatable(&el.selector, &el.element_id, &el.name)?;

    if section.skip_end_date_if_current
        && matches!(pattern.profile_field, "end_month" | "end_year")
        && profile.work_experience.get(idx).is_some_and(|w| w.current)
    {
        return Some(Resolution::Skip);
    }

    let path = format!("{}.{}.{}", section.profile_list, idx, pattern.profile_field);
    match profile.get_path(&path) {
        Some(value) => Some(Resolution::Value(value, AnswerSource::Profile)),
        None => Some(Resolution::None),
    }
}

/// Resolves an answer for one scanned element, consulting the local
/// cascade first and the oracle only if nothing local matched. Dropdown-
/// shaped fields additionally try `resolver::match_option` once a
/// candidate free-text answer is in hand.
pub(crate) async fn resolve_for_element(el: &RawElement, field: &FormField, ctx: &FillContext<'_>) -> Resolution {
    if let Some(resolution) = resolve_repeatable(el, ctx.profile) {
        if !matches!(resolution, Resolution::None) {
            return resolution;
        }
    }

    if let Some(resolved) =
        resolver::resolve_local(&field.label, field.field_type, ctx.profile, ctx.learned, ctx.knowledge_base, ctx.demographics)
    {
        return Resolution::Value(resolved.value, resolved.source);
    }

    if matches!(field.field_type, FieldType::Select | FieldType::Autocomplete | FieldType::Radio) && !el.options.is_empty() {
        if let Some(opt) = resolver::prefer_united_states(&field.label, &el.options) {
            return Resolution::Value(opt.value, AnswerSource::Default);
        }
        let is_school_field = field.label.to_lowercase().contains("school") || field.label.to_lowercase().contains("university");
        let min_score = resolver::select2_min_score(is_school_field);
        if let Some(opt) = resolver::match_option(&field.label, &el.options, min_score) {
            return Resolution::Value(opt.value, AnswerSource::Profile);
        }
        if is_school_field {
            if let Some(opt) = resolver::select2_fallback_other(&el.options) {
                return Resolution::Value(opt.value, AnswerSource::Default);
            }
        }
    }

    let context = ctx.knowledge_base.context_for_question(&field.label);
    let ai_context = format!("{}\n{}", ctx.profile.ai_context(), context);
    if let Some(resolved) =
        resolver::resolve_with_oracle(&field.label, &ai_context, ctx.primary_oracle, ctx.remote_oracle).await
    {
        return Resolution::Value(resolved.value, resolved.source);
    }

    Resolution::None
}

/// Types `value` into a field per its detected type, adapting the value
/// to DOM conventions for text/date fields first.
pub(crate) async fn fill_by_type(
    page: &dyn PageController,
    el: &RawElement,
    field: &FormField,
    value: &str,
) -> Result<String, AutofillError> {
    match field.field_type {
        FieldType::Text | FieldType::Email | FieldType::Phone | FieldType::Textarea | FieldType::Date => {
            let (adapted, _warning) = dom_adapt::adapt_value_to_dom(value, &dom_hints(el));
            page.type_text(&field.selector, &adapted).await?;
            Ok(adapted)
        }
        FieldType::Select | FieldType::Autocomplete => {
            page.click(&field.selector, ACTION_TIMEOUT).await?;
            page.type_text(&field.selector, value).await?;
            Ok(value.to_string())
        }
        FieldType::Checkbox | FieldType::Radio => {
            let checked = matches!(value.to_lowercase().as_str(), "yes" | "true" | "1" | "checked");
            if checked {
                page.click(&field.selector, ACTION_TIMEOUT).await?;
            }
            Ok(if checked { "checked".to_string() } else { "unchecked".to_string() })
        }
        FieldType::File => {
            page.click(&field.selector, ACTION_TIMEOUT).await?;
            Ok(value.to_string())
        }
        FieldType::Hidden | FieldType::Unknown => Ok(value.to_string()),
    }
}

/// Outcome of re-reading a field's value during verification. Kept
/// distinct from a plain bool so callers can tell an aria-invalid field
/// (§4.H phase 13: "A field flagged `aria-invalid=true` → `error`") apart
/// from an ordinary value mismatch, which only needs human input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldVerification {
    Verified,
    Invalid,
    Mismatch,
}

/// Re-reads the field's value and decides whether it verified. File
/// fields can't be read back so they default to verified; autocomplete
/// fields get the benefit of the doubt on a partial (either-direction
/// substring) match since the displayed text often differs slightly from
/// the typed value (it resolves to the picked option's label). A value
/// match is checked before consulting `aria-invalid` so a field that
/// verified correctly never gets flagged merely because the page also
/// marked it invalid.
pub(crate) async fn validate_field(
    page: &dyn PageController,
    field: &FormField,
    expected: &str,
) -> Result<FieldVerification, AutofillError> {
    if field.field_type == FieldType::File {
        return Ok(FieldVerification::Verified);
    }
    let actual = page.read_value(&field.selector).await?;
    let actual_lower = actual.to_lowercase();
    let expected_lower = expected.to_lowercase();
    if actual_lower == expected_lower {
        return Ok(FieldVerification::Verified);
    }
    // Autocomplete fields get the same either-direction substring check as
    // everything else, but arrive here more often since the displayed
    // text is an option label rather than the literal typed value.
    if !actual_lower.is_empty()
        && !expected_lower.is_empty()
        && (actual_lower.contains(&expected_lower) || expected_lower.contains(&actual_lower))
    {
        return Ok(FieldVerification::Verified);
    }
    if page.is_invalid(&field.selector).await? {
        return Ok(FieldVerification::Invalid);
    }
    Ok(FieldVerification::Mismatch)
}

/// Runs the scan → resolve → fill → verify cycle over every element the
/// page transport reports, skipping hidden fields the page itself
/// doesn't surface for interaction. Persists newly resolved answers back
/// to the learned DB so repeat applications reuse them without an oracle
/// round trip.
pub async fn fill_form(page: &dyn PageController, ctx: &FillContext<'_>) -> Result<Vec<FillReport>, AutofillError> {
    let elements = page.scan_elements().await?;
    let mut reports = Vec::with_capacity(elements.len());

    for el in &elements {
        if !el.visible {
            reports.push(FillReport {
                selector: el.selector.clone(),
                label: field_detector::find_label(el),
                field_type: FieldType::Hidden,
                value: None,
                source: None,
                status: FillStatus::Skipped,
            });
            continue;
        }

        let field = field_detector::classify(el);
        if field.field_type == FieldType::Hidden {
            reports.push(FillReport {
                selector: field.selector,
                label: field.label,
                field_type: field.field_type,
                value: None,
                source: None,
                status: FillStatus::Skipped,
            });
            continue;
        }

        let (value, source) = match resolve_for_element(el, &field, ctx).await {
            Resolution::Value(value, source) => (value, source),
            Resolution::Skip => {
                reports.push(FillReport {
                    selector: field.selector,
                    label: field.label,
                    field_type: field.field_type,
                    value: None,
                    source: None,
                    status: FillStatus::Skipped,
                });
                continue;
            }
            Resolution::None => {
                reports.push(FillReport {
                    selector: field.selector,
                    label: field.label,
                    field_type: field.field_type,
                    value: None,
                    source: None,
                    status: FillStatus::NeedsInput,
                });
                continue;
            }
        };

        // `value` is reported as whatever was actually typed/selected
        // (post DOM-adapt), not the resolver's raw answer, so the verify
        // pass below compares against what the page was told to show.
        let (status, filled_value) = match fill_by_type(page, el, &field, &value).await {
            Ok(typed_value) => (FillStatus::Filled, typed_value),
            Err(_) => (FillStatus::Error, value),
        };

        reports.push(FillReport {
            selector: field.selector,
            label: field.label,
            field_type: field.field_type,
            value: Some(filled_value),
            source: Some(source),
            status,
        });
    }

    page.blur_all().await?;

    for report in &mut reports {
        if report.status != FillStatus::Filled {
            continue;
        }
        let field = FormField {
            selector: report.selector.clone(),
            frame: None,
            field_type: report.field_type,
            detection_method: crate::field_detector::DetectionMethod::Default,
            label: report.label.clone(),
            required: false,
            repeatable_key: None,
        };
        let expected = report.value.clone().unwrap_or_default();
        report.status = match validate_field(page, &field, &expected).await {
            Ok(FieldVerification::Verified) => FillStatus::Verified,
            Ok(FieldVerification::Invalid) => FillStatus::Error,
            Ok(FieldVerification::Mismatch) => FillStatus::NeedsInput,
            Err(_) => FillStatus::Error,
        };
    }

    // Learn: only fields that both verified and were answered by the
    // oracle feed back into the learned DB (§4.H phase 14) — a profile/
    // default-sourced fill needs no learning, and an unverified AI guess
    // shouldn't poison future sessions with a wrong answer. Dropdown-
    // shaped fields (select/autocomplete) learn into the dropdown bucket
    // so a later session's cascade (`resolver::resolve_local` step 1)
    // finds them there instead of the free-text map.
    for report in &reports {
        if report.status == FillStatus::Verified && report.source == Some(AnswerSource::Ai) {
            if let Some(value) = &report.value {
                let result = if resolver::is_dropdown_field(report.field_type) {
                    ctx.learned.learn_dropdown_choice(&report.label, value)
                } else {
                    ctx.learned.learn_answer(&report.label, value)
                };
                let _ = result;
            }
        }
    }

    Ok(reports)
}

#[cfg(test)]
#[path = "autofill_tests.rs"]
mod tests;
