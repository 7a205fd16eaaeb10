// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scriptable in-memory [`Oracle`] for Answer Resolver tests.

use super::{Oracle, OracleError, OracleOption};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Default)]
pub struct FakeOracle {
    generate_answers: Mutex<HashMap<String, String>>,
    option_choices: Mutex<HashMap<String, String>>,
    fail_generate: Mutex<bool>,
    fail_choose: Mutex<bool>,
}

impl FakeOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_answer(&self, question: &str, answer: &str) {
        self.generate_answers
            .lock()
            .insert(question.to_string(), answer.to_string());
    }

    pub fn set_choice(&self, question: &str, value: &str) {
        self.option_choices
            .lock()
            .insert(question.to_string(), value.to_string());
    }

    pub fn fail_generate_calls(&self) {
        *self.fail_generate.lock() = true;
    }

    pub fn fail_choose_calls(&self) {
        *self.fail_choose.lock() = true;
    }
}

#[async_trait]
impl Oracle for FakeOracle {
    async fn generate(&self, question: &str, _context: &str) -> Result<String, OracleError> {
        if *self.fail_generate.lock() {
            return Err(OracleError::RequestFailed("scripted failure".to_string()));
        }
        self.generate_answers
            .lock()
            .get(question)
            .cloned()
            .ok_or(OracleError::Empty)
    }

    async fn choose_option(
        &self,
        question: &str,
        options: &[OracleOption],
        _context: &str,
    ) -> Result<OracleOption, OracleError> {
        if *self.fail_choose.lock() {
            return Err(OracleError::RequestFailed("scripted failure".to_string()));
        }
        let value = self
            .option_choices
            .lock()
            .get(question)
            .cloned()
            .ok_or(OracleError::Empty)?;
        options
            .iter()
            .find(|o| o.value == value)
            .cloned()
            .ok_or(OracleError::Empty)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
