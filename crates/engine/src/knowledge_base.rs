// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Knowledge Base: experience snippets and pre-written answers for
//! common open-ended questions, consulted by the Answer Resolver (as a
//! cascade step) and to enrich the LLM oracle's context.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommonAnswer {
    pub keywords: Vec<String>,
    pub answer: String,
}

/// Experience snippets, skills, and pre-written answers an applicant
/// maintains once and reuses across applications.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeBase {
    /// keyword → snippet of experience text.
    pub experience_snippets: HashMap<String, String>,
    /// answer key → keyword list + pre-written answer (salary
    /// expectations, "why this role", etc).
    pub common_answers: HashMap<String, CommonAnswer>,
    pub skills: HashMap<String, String>,
    pub achievements: Vec<String>,
}

impl KnowledgeBase {
    /// Up to 3 experience snippets relevant to `question`: a direct
    /// keyword match, or (for multi-word keywords) any constituent word
    /// longer than 3 characters appearing in the question.
    pub fn find_relevant_snippets(&self, question: &str) -> Vec<&str> {
        let question_lower = question.to_lowercase();
        let mut found = Vec::new();

        for (keyword, snippet) in &self.experience_snippets {
            let keyword_lower = keyword.to_lowercase();
            let matches = if question_lower.contains(&keyword_lower) {
                true
            } else if keyword_lower.split_whitespace().count() > 1 {
                keyword_lower
                    .split_whitespace()
                    .any(|w| w.len() > 3 && question_lower.contains(w))
            } else {
                false
            };
            if matches {
                found.push(snippet.as_str());
                if found.len() >= 3 {
                    break;
                }
            }
        }
        found
    }

    /// Formatted context block for the LLM oracle's prompt, empty if
    /// nothing is relevant.
    pub fn context_for_question(&self, question: &str) -> String {
        let snippets = self.find_relevant_snippets(question);
        if snippets.is_empty() {
            return String::new();
        }
        let mut out = String::from("Relevant experience:\n");
        for s in snippets {
            out.push_str("- ");
            out.push_str(s);
            out.push('\n');
        }
        out.trim_end().to_string()
    }

    /// Cascade step 2.5 of the Answer Resolver: a pre-written answer
    /// whose keyword list matches `question`.
    pub fn find_common_answer(&self, question: &str) -> Option<&str> {
        let question_lower = question.to_lowercase();
        self.common_answers.values().find_map(|entry| {
            entry
                .keywords
                .iter()
                .any(|kw| question_lower.contains(&kw.to_lowercase()))
                .then_some(entry.answer.as_str())
        })
    }
}

#[cfg(test)]
#[path = "knowledge_base_tests.rs"]
mod tests;
