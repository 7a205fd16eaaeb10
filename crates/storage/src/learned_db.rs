// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The learned-answer DB: two string-keyed maps the Answer Resolver
//! consults before falling through to profile defaults or the LLM oracle.
//!
//! Persisted through the Storage Kernel rather than the original source's
//! raw `json.dump` overwrite — a deliberate hardening, not a behavior
//! change to the lookup semantics below.

use crate::kernel;
use indexmap::IndexMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// On-disk shape. `answers` and `dropdown_choices` preserve insertion
/// order since lookup is first-match-in-insertion-order, not best-match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LearnedData {
    #[serde(default)]
    answers: IndexMap<String, String>,
    #[serde(default)]
    dropdown_choices: IndexMap<String, String>,
    /// Tolerated on load for data written by the V3 variant; never written.
    #[serde(default, rename = "field_answers", skip_serializing)]
    legacy_field_answers: IndexMap<String, String>,
}

impl LearnedData {
    fn migrate(mut self) -> Self {
        if self.answers.is_empty() && !self.legacy_field_answers.is_empty() {
            self.answers = std::mem::take(&mut self.legacy_field_answers);
        }
        self.legacy_field_answers.clear();
        self
    }
}

pub struct LearnedDb {
    path: PathBuf,
    data: Mutex<LearnedData>,
}

impl LearnedDb {
    pub fn load(path: PathBuf) -> Result<Self, kernel::KernelError> {
        let data = kernel::load::<LearnedData>(&path)?
            .unwrap_or_default()
            .migrate();
        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    fn persist(&self, data: &LearnedData) -> Result<(), kernel::KernelError> {
        kernel::save(&self.path, data)
    }

    /// Records a free-text answer for `question`, keyed by its normalized
    /// form, and persists immediately.
    pub fn learn_answer(&self, question: &str, answer: &str) -> Result<(), kernel::KernelError> {
        let key = normalize_key(question);
        let mut data = self.data.lock();
        data.answers.insert(key, answer.to_string());
        self.persist(&data)
    }

    /// Records a chosen dropdown/radio option for `question`.
    pub fn learn_dropdown_choice(
        &self,
        question: &str,
        choice: &str,
    ) -> Result<(), kernel::KernelError> {
        let key = normalize_key(question);
        let mut data = self.data.lock();
        data.dropdown_choices.insert(key, choice.to_string());
        self.persist(&data)
    }

    /// Exact-then-substring lookup in the free-text answer map. First
    /// match in insertion order wins on both sides of the substring check.
    pub fn lookup_answer(&self, question: &str) -> Option<String> {
        lookup(&self.data.lock().answers, question)
    }

    /// Same cascade as [`Self::lookup_answer`] over the dropdown map.
    pub fn lookup_dropdown_choice(&self, question: &str) -> Option<String> {
        lookup(&self.data.lock().dropdown_choices, question)
    }
}

fn lookup(map: &IndexMap<String, String>, question: &str) -> Option<String> {
    let key = normalize_key(question);
    if let Some(v) = map.get(&key) {
        return Some(v.clone());
    }
    for (k, v) in map {
        if k.contains(&key) || key.contains(k.as_str()) {
            return Some(v.clone());
        }
    }
    None
}

/// lowercase → strip punctuation → collapse whitespace → truncate to 100
/// chars. Idempotent: `normalize_key(normalize_key(s)) == normalize_key(s)`.
pub fn normalize_key(raw: &str) -> String {
    const STRIP: &[char] = &['*', '?', '!', ':', '-', '_', '(', ')', '"', '\''];

    let lowered = raw.to_lowercase();
    let stripped: String = lowered.chars().filter(|c| !STRIP.contains(c)).collect();
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(100).collect()
}

#[cfg(test)]
#[path = "learned_db_tests.rs"]
mod tests;
