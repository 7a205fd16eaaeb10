// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The page-level autofill session: the outer state machine that drives a
//! full application-form fill starting from a bare URL, wrapping the
//! field-level mechanics in `autofill.rs` with the phases `engine.py`'s
//! `fill()` runs in order — navigate, settle iframes, click through from
//! a job-description page to the form, hand logins off to a human,
//! extract job info, scan, prescan dropdown options, fill repeatable
//! sections (clicking "Add another" between entries), mark overlap, run
//! the bounded re-scan fill loop, blur, verify, learn.

use crate::autofill::{self, FieldVerification, FillContext, FillReport, FillStatus};
use crate::error::AutofillError;
use crate::field_detector::{self, FieldType};
use crate::repeatable;
use crate::resolver::{self, AnswerSource};
use jobpipe_adapters::page::{PageController, RawElement};
use std::collections::HashSet;
use std::time::Duration;

/// Timeouts and loop bounds for one session, matching the defaults in
/// §5 (page load 30s, element wait 10s, network-idle 2s, stable-DOM
/// settle 2s) plus the two bounds the fill loop and prescan need.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub page_load_timeout: Duration,
    pub element_wait_timeout: Duration,
    pub network_idle_timeout: Duration,
    pub dom_settle_timeout: Duration,
    /// Bound on the scan → fill → re-scan loop (phase 11); the original
    /// engine defaults to 5.
    pub max_fill_iterations: usize,
    /// Above this many visible text-shaped fields, the page is assumed to
    /// already be the application form rather than a job-description page
    /// that still needs an Apply click.
    pub apply_click_field_threshold: usize,
    /// Cap on options read per dropdown during prescan.
    pub prescan_option_cap: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            page_load_timeout: Duration::from_secs(30),
            element_wait_timeout: Duration::from_secs(10),
            network_idle_timeout: Duration::from_secs(2),
            dom_settle_timeout: Duration::from_secs(2),
            max_fill_iterations: 5,
            apply_click_field_threshold: 3,
            prescan_option_cap: 25,
        }
    }
}

/// Curated iframe-src fragments that tell the settle phase a known ATS
/// form has attached, rather than the page's own chrome.
const ATS_IFRAME_MARKERS: &[&str] = &["greenhouse", "lever", "workday", "icims"];

/// Curated Apply-button selectors, most-specific first, tried in both the
/// main document and every nested frame.
const APPLY_SELECTORS: &[&str] = &[
    "a.iCIMS_ApplyButton",
    "a[title='Apply for this job online']",
    "a#apply_button",
    "a.postings-btn",
    "button[data-automation-id='jobPostingApplyButton']",
    "a[class*='apply']",
    "button[class*='apply']",
];

const LOGIN_URL_MARKERS: &[&str] = &["login", "signin", "auth"];

/// Labels excluded from prescan because they're API-driven search fields
/// (location autocomplete, school lookup) rather than a fixed option set —
/// opening and reading them would just return the empty/initial result.
const PRESCAN_SEARCH_LABEL_MARKERS: &[&str] = &["location", "city", "school", "university"];

/// Outcome of one full session: the per-field reports plus the
/// session-scoped metadata downstream collaborators (résumé/cover-letter
/// personalization, human auth escalation) need alongside them.
#[derive(Debug, Clone, Default)]
pub struct SessionReport {
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    /// Set when the session landed on what looks like a login page. The
    /// caller is expected to surface an auth prompt to a human and
    /// re-invoke the session once authenticated; this engine has no
    /// channel of its own to block on human input.
    pub auth_required: bool,
    pub fields: Vec<FillReport>,
}

/// Runs the full page-level state machine against `url`, returning the
/// session report once the fill loop settles (no new fields appear) or
/// `max_fill_iterations` is exhausted.
pub async fn run_session(
    page: &dyn PageController,
    url: &str,
    ctx: &FillContext<'_>,
    config: &SessionConfig,
) -> Result<SessionReport, AutofillError> {
    page.navigate(url, config.page_load_timeout).await?;

    settle_iframes(page, config).await;

    let mut report = SessionReport::default();

    let current_url = page.evaluate("window.location.href").await.unwrap_or_default();
    if !current_url.is_empty() && LOGIN_URL_MARKERS.iter().any(|m| current_url.to_lowercase().contains(m)) {
        // A login page that disappeared by the time the caller re-invokes
        // (post human auth) simply won't match here on the retry.
        report.auth_required = true;
    }

    click_apply_if_needed(page, config).await;

    extract_job_info(page, &mut report).await;

    let mut elements = page.scan_elements().await?;
    dedup_by_selector(&mut elements);

    prescan_options(page, &mut elements, config).await;

    let mut handled: HashSet<String> = HashSet::new();
    fill_repeatable_sections(page, &mut elements, ctx, config, &mut report.fields, &mut handled).await?;

    run_fill_loop(page, &mut elements, ctx, config, &mut report.fields, &mut handled).await?;

    page.blur_all().await?;
    verify_reports(page, &mut report.fields).await;
    learn_from_reports(&report.fields, ctx);

    Ok(report)
}

fn dedup_by_selector(elements: &mut Vec<RawElement>) {
    let mut seen = HashSet::new();
    elements.retain(|el| seen.insert(el.selector.clone()));
}

/// Phase 2: best-effort wait for a known ATS iframe to attach. A
/// single-page application with no iframe at all (most Greenhouse/Lever
/// embeds, Ashby, SmartRecruiters) simply times out here and the session
/// proceeds against the main document.
async fn settle_iframes(page: &dyn PageController, config: &SessionConfig) {
    for marker in ATS_IFRAME_MARKERS {
        let selector = format!("iframe[src*='{marker}']");
        if page.wait_for_selector(&selector, config.dom_settle_timeout).await.is_ok() {
            return;
        }
    }
}

/// Phase 3: if the page looks like a job-description page rather than
/// the application form itself (few visible text-shaped fields), search
/// the curated Apply-button selectors and click the first that's present.
async fn click_apply_if_needed(page: &dyn PageController, config: &SessionConfig) {
    let Ok(elements) = page.scan_elements().await else { return };
    let visible_field_count = elements
        .iter()
        .filter(|el| el.visible && matches!(field_detector::detect_type(el).0, FieldType::Text | FieldType::Email | FieldType::Select | FieldType::Textarea))
        .count();
    if visible_field_count > config.apply_click_field_threshold {
        return;
    }
    for selector in APPLY_SELECTORS {
        if page.click(selector, config.element_wait_timeout).await.is_ok() {
            return;
        }
    }
}

/// Phase 5: best-effort job-info extraction from the document title,
/// following the Greenhouse convention `"Job Application for {TITLE} at
/// {COMPANY}"`; any other title shape is left for the caller's own
/// résumé-personalization collaborator to parse further.
async fn extract_job_info(page: &dyn PageController, report: &mut SessionReport) {
    let Ok(title_text) = page.evaluate("document.title").await else { return };
    if let Some((title_part, company_part)) = title_text.split_once(" at ") {
        let title = title_part.trim_start_matches("Job Application for ").trim();
        let company = company_part
            .trim()
            .trim_end_matches(" Careers Page")
            .trim_end_matches(" Careers")
            .trim();
        if !title.is_empty() {
            report.job_title = Some(title.to_string());
        }
        if !company.is_empty() {
            report.company_name = Some(company.to_string());
        }
    }
}

/// Phase 7: opens every fixed-option dropdown (excluding API-driven
/// search fields) and records its live option set on the element, so the
/// resolve/fill phases never have to type-and-guess against an unknown
/// option list. Caps at `prescan_option_cap` per field.
async fn prescan_options(page: &dyn PageController, elements: &mut [RawElement], config: &SessionConfig) {
    for el in elements.iter_mut() {
        if !el.visible || !el.options.is_empty() {
            continue;
        }
        let field_type = field_detector::detect_type(el).0;
        if !matches!(field_type, FieldType::Autocomplete | FieldType::Select) {
            continue;
        }
        let label_lower = field_detector::find_label(el).to_lowercase();
        if PRESCAN_SEARCH_LABEL_MARKERS.iter().any(|m| label_lower.contains(m)) {
            continue;
        }
        if let Ok(mut options) = page.query_options(&el.selector).await {
            options.truncate(config.prescan_option_cap);
            el.options = options;
        }
    }
}

/// Phases 9-10: fills every repeatable-section entry the profile has,
/// clicking "Add another" between entries when the next index's fields
/// aren't already pre-rendered, and marks every selector it touches as
/// `handled` so the main fill loop (phase 11) never re-resolves it.
async fn fill_repeatable_sections(
    page: &dyn PageController,
    elements: &mut Vec<RawElement>,
    ctx: &FillContext<'_>,
    config: &SessionConfig,
    out: &mut Vec<FillReport>,
    handled: &mut HashSet<String>,
) -> Result<(), AutofillError> {
    for section in repeatable::all_sections() {
        let entries_len = match section.profile_list {
            "work_experience" => ctx.profile.work_experience.len(),
            "education" => ctx.profile.education.len(),
            _ => 0,
        };
        if entries_len == 0 {
            continue;
        }

        for idx in 0..entries_len {
            let mut matches = entry_elements(elements, section.name, idx);

            if matches.is_empty() {
                if idx == 0 {
                    // No fields for the first entry at all: this form
                    // doesn't have this section, skip the rest of it.
                    break;
                }
                let add_selector = format!("#add-another-{}", section.name);
                let _ = page.click(&add_selector, config.element_wait_timeout).await;
                if let Ok(rescanned) = page.scan_elements().await {
                    for el in rescanned {
                        if !elements.iter().any(|existing| existing.selector == el.selector) {
                            elements.push(el);
                        }
                    }
                }
                matches = entry_elements(elements, section.name, idx);
                if matches.is_empty() {
                    // Couldn't add the slot and it wasn't pre-rendered
                    // either — try the remaining entries anyway in case
                    // the form pre-renders a fixed number of slots.
                    continue;
                }
            }

            for el in &matches {
                let Some(resolution) = autofill::resolve_repeatable(el, ctx.profile) else { continue };
                let field = field_detector::classify(el);
                let (value, source) = match resolution {
                    autofill::Resolution::Value(value, source) => (value, source),
                    autofill::Resolution::Skip | autofill::Resolution::None => {
                        handled.insert(el.selector.clone());
                        out.push(skipped_report(&field));
                        continue;
                    }
                };
                let (status, filled_value) = match autofill::fill_by_type(page, el, &field, &value).await {
                    Ok(typed) => (FillStatus::Filled, typed),
                    Err(_) => (FillStatus::Error, value),
                };
                handled.insert(el.selector.clone());
                out.push(FillReport {
                    selector: field.selector,
                    label: field.label,
                    field_type: field.field_type,
                    value: Some(filled_value),
                    source: Some(source),
                    status,
                });
            }
        }
    }
    Ok(())
}

fn entry_elements(elements: &[RawElement], section_name: &str, idx: usize) -> Vec<RawElement> {
    elements
        .iter()
        .filter(|el| {
            repeatable::match_repeatable(&el.selector, &el.element_id, &el.name)
                .is_some_and(|(section, _, matched_idx)| section.name == section_name && matched_idx == idx)
        })
        .cloned()
        .collect()
}

fn skipped_report(field: &field_detector::FormField) -> FillReport {
    FillReport {
        selector: field.selector.clone(),
        label: field.label.clone(),
        field_type: field.field_type,
        value: None,
        source: None,
        status: FillStatus::Skipped,
    }
}

/// Phase 11: fills every not-yet-`handled` visible field, waits for the
/// DOM to settle, re-scans, and repeats until no new field appears or
/// `max_fill_iterations` is reached — covering forms that render a next
/// section only after the previous one is answered.
async fn run_fill_loop(
    page: &dyn PageController,
    elements: &mut Vec<RawElement>,
    ctx: &FillContext<'_>,
    config: &SessionConfig,
    out: &mut Vec<FillReport>,
    handled: &mut HashSet<String>,
) -> Result<(), AutofillError> {
    for _ in 0..config.max_fill_iterations {
        let pending: Vec<RawElement> = elements
            .iter()
            .filter(|el| el.visible && !handled.contains(&el.selector))
            .cloned()
            .collect();

        for el in &pending {
            handled.insert(el.selector.clone());
            let field = field_detector::classify(el);
            if field.field_type == FieldType::Hidden {
                out.push(skipped_report(&field));
                continue;
            }
            let (value, source) = match autofill::resolve_for_element(el, &field, ctx).await {
                autofill::Resolution::Value(value, source) => (value, source),
                autofill::Resolution::Skip => {
                    out.push(FillReport {
                        selector: field.selector,
                        label: field.label,
                        field_type: field.field_type,
                        value: None,
                        source: None,
                        status: FillStatus::Skipped,
                    });
                    continue;
                }
                autofill::Resolution::None => {
                    out.push(FillReport {
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
            let (status, filled_value) = match autofill::fill_by_type(page, el, &field, &value).await {
                Ok(typed) => (FillStatus::Filled, typed),
                Err(_) => (FillStatus::Error, value),
            };
            out.push(FillReport {
                selector: field.selector,
                label: field.label,
                field_type: field.field_type,
                value: Some(filled_value),
                source: Some(source),
                status,
            });
        }

        let rescanned = page.scan_elements().await?;
        let mut found_new = false;
        for el in rescanned {
            if !elements.iter().any(|existing| existing.selector == el.selector) {
                elements.push(el);
                found_new = true;
            }
        }
        if !found_new {
            break;
        }
    }
    Ok(())
}

/// Phase 13: re-reads every `filled` field's value and flags verification
/// failures, reusing the same either-direction substring check the
/// single-pass `fill_form` entry point uses.
async fn verify_reports(page: &dyn PageController, reports: &mut [FillReport]) {
    for report in reports.iter_mut() {
        if report.status != FillStatus::Filled {
            continue;
        }
        let field = field_detector::FormField {
            selector: report.selector.clone(),
            frame: None,
            field_type: report.field_type,
            detection_method: field_detector::DetectionMethod::Default,
            label: report.label.clone(),
            required: false,
            repeatable_key: None,
        };
        let expected = report.value.clone().unwrap_or_default();
        report.status = match autofill::validate_field(page, &field, &expected).await {
            Ok(FieldVerification::Verified) => FillStatus::Verified,
            Ok(FieldVerification::Invalid) => FillStatus::Error,
            Ok(FieldVerification::Mismatch) => FillStatus::NeedsInput,
            Err(_) => FillStatus::Error,
        };
    }
}

/// Phase 14: persists verified AI-sourced answers into the learned DB so
/// the next session resolves the same question without an oracle call.
/// Dropdown-shaped fields (select/autocomplete) learn into the dropdown
/// bucket, mirroring `autofill::fill_form`'s single-pass learn step.
fn learn_from_reports(reports: &[FillReport], ctx: &FillContext<'_>) {
    for report in reports {
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
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
