// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory [`PageController`] so the Autofill Engine's state machine is
//! fully testable without a browser.

use super::{DomOption, PageController, PageError, RawElement};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedAction {
    Navigate(String),
    Click(String),
    Type(String, String),
    Blur,
}

pub struct FakePageController {
    values: Mutex<HashMap<String, String>>,
    options: Mutex<HashMap<String, Vec<DomOption>>>,
    missing_selectors: Mutex<Vec<String>>,
    actions: Mutex<Vec<RecordedAction>>,
    elements: Mutex<Vec<RawElement>>,
    invalid_selectors: Mutex<Vec<String>>,
    evaluate_responses: Mutex<HashMap<String, String>>,
    reveals: Mutex<HashMap<String, Vec<RawElement>>>,
}

impl Default for FakePageController {
    fn default() -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
            options: Mutex::new(HashMap::new()),
            missing_selectors: Mutex::new(Vec::new()),
            actions: Mutex::new(Vec::new()),
            elements: Mutex::new(Vec::new()),
            invalid_selectors: Mutex::new(Vec::new()),
            evaluate_responses: Mutex::new(HashMap::new()),
            reveals: Mutex::new(HashMap::new()),
        }
    }
}

impl FakePageController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_value(&self, selector: &str, value: &str) {
        self.values
            .lock()
            .insert(selector.to_string(), value.to_string());
    }

    pub fn set_options(&self, selector: &str, options: Vec<DomOption>) {
        self.options.lock().insert(selector.to_string(), options);
    }

    /// Marks `selector` as absent from the page, so `click`/`type_text`/
    /// `wait_for_selector` return `ElementNotFound`/`Timeout`.
    pub fn mark_missing(&self, selector: &str) {
        self.missing_selectors.lock().push(selector.to_string());
    }

    pub fn actions(&self) -> Vec<RecordedAction> {
        self.actions.lock().clone()
    }

    /// Seeds the elements a subsequent `scan_elements()` call returns.
    /// Appends rather than replaces, so tests can simulate dynamically
    /// appearing fields across main-loop iterations by calling this again
    /// between scans.
    pub fn push_element(&self, element: RawElement) {
        self.elements.lock().push(element);
    }

    pub fn set_elements(&self, elements: Vec<RawElement>) {
        *self.elements.lock() = elements;
    }

    pub fn mark_invalid(&self, selector: &str) {
        self.invalid_selectors.lock().push(selector.to_string());
    }

    /// Scripts `evaluate(script)`'s return value for an exact `script`
    /// match, so tests can drive the session's job-info extraction and
    /// login-page detection (both read `document.title` /
    /// `window.location.href` via `evaluate`) without a real browser.
    pub fn set_evaluate_response(&self, script: &str, response: &str) {
        self.evaluate_responses.lock().insert(script.to_string(), response.to_string());
    }

    /// Registers `elements` to appear in the result of the next
    /// `scan_elements()` call after `selector` is clicked — simulating an
    /// "Add another" button (or any click-triggered render) revealing new
    /// fields, the way a real page would after a React re-render.
    pub fn reveal_on_click(&self, selector: &str, elements: Vec<RawElement>) {
        self.reveals.lock().insert(selector.to_string(), elements);
    }

    fn is_missing(&self, selector: &str) -> bool {
        self.missing_selectors.lock().iter().any(|s| s == selector)
    }
}

#[async_trait]
impl PageController for FakePageController {
    async fn navigate(&self, url: &str, _timeout: Duration) -> Result<(), PageError> {
        self.actions.lock().push(RecordedAction::Navigate(url.to_string()));
        Ok(())
    }

    async fn click(&self, selector: &str, _timeout: Duration) -> Result<(), PageError> {
        if self.is_missing(selector) {
            return Err(PageError::ElementNotFound(selector.to_string()));
        }
        self.actions.lock().push(RecordedAction::Click(selector.to_string()));
        // Checkboxes/radios have no separate "type" step — clicking them is
        // the whole interaction, so approximate the DOM's own read-back of
        // `checked` the way a real controller's `read_value` would. A
        // later `type_text` on the same selector (select/autocomplete open)
        // overwrites this.
        self.values.lock().entry(selector.to_string()).or_insert_with(|| "checked".to_string());
        if let Some(revealed) = self.reveals.lock().remove(selector) {
            self.elements.lock().extend(revealed);
        }
        Ok(())
    }

    async fn type_text(&self, selector: &str, text: &str) -> Result<(), PageError> {
        if self.is_missing(selector) {
            return Err(PageError::ElementNotFound(selector.to_string()));
        }
        self.values.lock().insert(selector.to_string(), text.to_string());
        self.actions
            .lock()
            .push(RecordedAction::Type(selector.to_string(), text.to_string()));
        Ok(())
    }

    async fn read_value(&self, selector: &str) -> Result<String, PageError> {
        if self.is_missing(selector) {
            return Err(PageError::ElementNotFound(selector.to_string()));
        }
        Ok(self.values.lock().get(selector).cloned().unwrap_or_default())
    }

    async fn query_options(&self, selector: &str) -> Result<Vec<DomOption>, PageError> {
        if self.is_missing(selector) {
            return Err(PageError::ElementNotFound(selector.to_string()));
        }
        Ok(self.options.lock().get(selector).cloned().unwrap_or_default())
    }

    async fn screenshot(&self) -> Result<Vec<u8>, PageError> {
        Ok(Vec::new())
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<(), PageError> {
        if self.is_missing(selector) {
            return Err(PageError::Timeout(format!(
                "{selector} (after {}ms)",
                timeout.as_millis()
            )));
        }
        Ok(())
    }

    async fn evaluate(&self, script: &str) -> Result<String, PageError> {
        Ok(self.evaluate_responses.lock().get(script).cloned().unwrap_or_default())
    }

    async fn blur_all(&self) -> Result<(), PageError> {
        self.actions.lock().push(RecordedAction::Blur);
        Ok(())
    }

    async fn scan_elements(&self) -> Result<Vec<RawElement>, PageError> {
        Ok(self.elements.lock().clone())
    }

    async fn is_invalid(&self, selector: &str) -> Result<bool, PageError> {
        Ok(self.invalid_selectors.lock().iter().any(|s| s == selector))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
