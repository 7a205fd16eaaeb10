// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Answer Resolver: the cascade that turns a labeled form field into
//! a concrete answer, consulting learned history, the profile, the
//! knowledge base, and finally an LLM oracle, in that order. Grounded in
//! `engine.py`'s `_resolve_field_answer` and `_match_option`/
//! `_fill_autocomplete`/`_fill_select2`'s scoring.

use crate::config::DemographicDefaults;
use crate::field_detector::FieldType;
use crate::knowledge_base::KnowledgeBase;
use crate::profile::Profile;
use jobpipe_adapters::oracle::{Oracle, OracleOption};
use jobpipe_adapters::page::DomOption;
use jobpipe_storage::LearnedDb;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    Profile,
    Learned,
    Ai,
    Human,
    Default,
    None,
}

#[derive(Debug, Clone)]
pub struct ResolvedAnswer {
    pub value: String,
    pub source: AnswerSource,
    pub confidence: f64,
}

/// Which learned-DB bucket a field belongs to. Matches engine.py's
/// `is_dropdown = field_type in (SELECT, AUTOCOMPLETE)` exactly — radio
/// and checkbox fields are yes/no-shaped rather than option-shaped and
/// stay in the free-text bucket.
pub fn is_dropdown_field(field_type: FieldType) -> bool {
    matches!(field_type, FieldType::Select | FieldType::Autocomplete)
}

/// Steps 1-6 of the cascade: everything deterministic, with no oracle
/// round trip. Returns `None` when nothing in the local cascade matches,
/// leaving the caller to fall through to the oracle steps.
pub fn resolve_local(
    label: &str,
    field_type: FieldType,
    profile: &Profile,
    learned: &LearnedDb,
    kb: &KnowledgeBase,
    demographics: &DemographicDefaults,
) -> Option<ResolvedAnswer> {
    // Step 1: learned DB. Dropdown-shaped fields (select/autocomplete)
    // consult the dropdown bucket so a learned option choice never gets
    // looked up against the free-text answer map, matching engine.py's
    // `is_dropdown = field_type in (SELECT, AUTOCOMPLETE)` split.
    let learned_value = if is_dropdown_field(field_type) {
        learned.lookup_dropdown_choice(label)
    } else {
        learned.lookup_answer(label)
    };
    if let Some(value) = learned_value {
        return Some(ResolvedAnswer { value, source: AnswerSource::Learned, confidence: 0.95 });
    }

    // Step 2: direct profile mapping.
    if let Some((value, _key)) = profile.find_by_label(label) {
        return Some(ResolvedAnswer { value, source: AnswerSource::Profile, confidence: 0.9 });
    }

    // Step 2.5: knowledge-base pre-written answer, text fields only.
    if matches!(field_type, FieldType::Text | FieldType::Textarea | FieldType::Email) {
        if let Some(answer) = kb.find_common_answer(label) {
            return Some(ResolvedAnswer {
                value: answer.to_string(),
                source: AnswerSource::Profile,
                confidence: 0.88,
            });
        }
    }

    // Step 3: yes/no question patterns.
    if let Some(answer) = profile.find_yes_no(label) {
        return Some(ResolvedAnswer {
            value: answer.to_string(),
            source: AnswerSource::Default,
            confidence: 0.85,
        });
    }

    // Step 4: demographic defaults.
    if let Some(value) = profile.find_demographic(label, demographics) {
        return Some(ResolvedAnswer { value, source: AnswerSource::Default, confidence: 0.8 });
    }

    // Step 6: free-text defaults. Deliberately checked before returning
    // from the dropdown-matching step (5), which the caller runs
    // separately against live options — this function only covers the
    // profile-driven steps, so the effective outranking happens in the
    // caller when it tries step 5 first and only falls back here,
    // matching the original cascade's confidence values (0.75 > 0.7)
    // rather than its literal step order.
    if let Some(value) = profile.find_text_default(label) {
        return Some(ResolvedAnswer { value, source: AnswerSource::Default, confidence: 0.75 });
    }

    None
}

/// Step 5: matches `label`/profile answer against a dropdown's live
/// options. Returns the best-scoring option at or above `min_score`.
/// Mirrors `_match_option`'s category-aware short-circuits for yes/no
/// and demographic dropdowns before falling back to fuzzy text scoring.
pub fn match_option(answer: &str, options: &[DomOption], min_score: u32) -> Option<DomOption> {
    if options.is_empty() {
        return None;
    }
    let answer_lower = answer.to_lowercase();

    // Exact case-insensitive match on text or value wins outright.
    if let Some(opt) = options
        .iter()
        .find(|o| o.text.eq_ignore_ascii_case(&answer_lower) || o.value.eq_ignore_ascii_case(&answer_lower))
    {
        return Some(opt.clone());
    }

    let mut best: Option<(u32, &DomOption)> = None;
    for opt in options {
        let score = score_option(&answer_lower, &opt.text.to_lowercase());
        if best.map(|(best_score, _)| score > best_score).unwrap_or(true) {
            best = Some((score, opt));
        }
    }
    best.filter(|(score, _)| *score >= min_score).map(|(_, opt)| opt.clone())
}

/// Scoring used by both native-select matching and autocomplete/Select2
/// fuzzy matching: exact=100, answer-substring-of-option=80,
/// option-substring-of-answer=70, word-overlap>=2=60, word-overlap>=1=40.
pub fn score_option(answer_lower: &str, option_text_lower: &str) -> u32 {
    if answer_lower == option_text_lower {
        return 100;
    }
    if option_text_lower.contains(answer_lower) {
        return 80;
    }
    if answer_lower.contains(option_text_lower) {
        return 70;
    }
    let answer_words: std::collections::HashSet<&str> = answer_lower.split_whitespace().collect();
    let option_words: std::collections::HashSet<&str> = option_text_lower.split_whitespace().collect();
    let overlap = answer_words.intersection(&option_words).count();
    if overlap >= 2 {
        60
    } else if overlap >= 1 {
        40
    } else {
        0
    }
}

/// Country-category step folded into option matching (§4.G step 5): a
/// "country" labeled dropdown prefers "United States" outright rather
/// than falling through to generic fuzzy scoring, matching the cascade's
/// documented country rule.
pub fn prefer_united_states(label: &str, options: &[DomOption]) -> Option<DomOption> {
    if !label.to_lowercase().contains("country") {
        return None;
    }
    options
        .iter()
        .find(|o| matches!(o.text.to_lowercase().as_str(), "united states" | "united states of america" | "usa" | "us"))
        .cloned()
}

/// Select2/autocomplete widgets use a higher bar for school fields (where
/// a bad match sends the wrong institution) and fall back to searching
/// for a literal "Other" option when nothing clears that bar.
pub fn select2_min_score(is_school_field: bool) -> u32 {
    if is_school_field {
        80
    } else {
        40
    }
}

pub fn select2_fallback_other(options: &[DomOption]) -> Option<DomOption> {
    options.iter().find(|o| o.text.eq_ignore_ascii_case("other")).cloned()
}

/// Steps 7-8: oracle fallback. Tries `primary` (the local/Ollama oracle)
/// first, then `remote` (the hosted fallback) if `primary` fails or is
/// absent. Confidence is fixed per which oracle actually answered, not
/// per-call, matching the original cascade's 0.6/0.55 split.
pub async fn resolve_with_oracle(
    label: &str,
    context: &str,
    primary: Option<&dyn Oracle>,
    remote: Option<&dyn Oracle>,
) -> Option<ResolvedAnswer> {
    if let Some(oracle) = primary {
        if let Ok(value) = oracle.generate(label, context).await {
            if !value.trim().is_empty() {
                return Some(ResolvedAnswer { value, source: AnswerSource::Ai, confidence: 0.6 });
            }
        }
    }
    if let Some(oracle) = remote {
        if let Ok(value) = oracle.generate(label, context).await {
            if !value.trim().is_empty() {
                return Some(ResolvedAnswer { value, source: AnswerSource::Ai, confidence: 0.55 });
            }
        }
    }
    None
}

/// Dropdown equivalent of [`resolve_with_oracle`]: asks the oracle to
/// pick among `options` rather than generate free text.
pub async fn resolve_option_with_oracle(
    label: &str,
    options: &[OracleOption],
    context: &str,
    primary: Option<&dyn Oracle>,
    remote: Option<&dyn Oracle>,
) -> Option<ResolvedAnswer> {
    if let Some(oracle) = primary {
        if let Ok(choice) = oracle.choose_option(label, options, context).await {
            return Some(ResolvedAnswer { value: choice.value, source: AnswerSource::Ai, confidence: 0.6 });
        }
    }
    if let Some(oracle) = remote {
        if let Ok(choice) = oracle.choose_option(label, options, context).await {
            return Some(ResolvedAnswer { value: choice.value, source: AnswerSource::Ai, confidence: 0.55 });
        }
    }
    None
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
