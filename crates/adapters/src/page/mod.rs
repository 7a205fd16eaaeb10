// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The page controller: a validated action surface the Autofill Engine's
//! state machine drives, rather than a raw CDP/Playwright binding.
//! Driving an actual browser process is outside this crate's scope; this
//! trait is the seam between the state machine and whatever transport a
//! deployment wires in.

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakePageController, RecordedAction};

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("navigation failed: {0}")]
    NavigationFailed(String),
    #[error("element not found: {0}")]
    ElementNotFound(String),
    #[error("timed out waiting for {0}")]
    Timeout(String),
    #[error("page crashed: {0}")]
    Crashed(String),
    #[error("action failed: {0}")]
    ActionFailed(String),
}

/// One selectable option as read back from a live `<select>` or listbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomOption {
    pub value: String,
    pub text: String,
}

/// A single candidate form element as reported by the page transport's
/// scan pass (inputs, selects, textareas across the main document and
/// every nested frame). The transport is responsible for the underlying
/// DOM/accessibility-tree walk; this struct is the validated, flattened
/// shape the Field Detector cascade classifies — the engine never reaches
/// past this seam to touch raw HTML/JS itself.
///
/// The four `*_label_text` fields mirror the label-derivation cascade's
/// data sources directly (`label[for]`, a wrapping `<label>`'s direct text
/// nodes, a `div.field > label` sibling, and a `fieldset > legend`
/// ancestor) so the Detector can apply the priority order without needing
/// its own DOM access.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawElement {
    pub selector: String,
    pub frame: Option<String>,
    pub html_tag: String,
    pub input_type: String,
    pub element_id: String,
    pub name: String,
    pub role: String,
    pub aria_haspopup: String,
    pub aria_label: String,
    pub placeholder: String,
    pub maxlength: Option<usize>,
    pub pattern: String,
    pub required: bool,
    pub visible: bool,
    pub label_for_text: String,
    pub parent_label_text: String,
    pub field_div_label_text: String,
    pub fieldset_legend_text: String,
    pub context_discovery_text: String,
    pub options: Vec<DomOption>,
}

/// Narrow, validated action surface for headless-browser automation,
/// mirroring a bridge-style trait (execute discrete, named actions)
/// rather than exposing the underlying browser object directly.
#[async_trait]
pub trait PageController: Send + Sync {
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), PageError>;

    async fn click(&self, selector: &str, timeout: Duration) -> Result<(), PageError>;

    async fn type_text(&self, selector: &str, text: &str) -> Result<(), PageError>;

    /// Reads the current value of a field (input `value`, checkbox
    /// `checked`, select's selected option, etc.) as plain text.
    async fn read_value(&self, selector: &str) -> Result<String, PageError>;

    /// Lists the live options for a select/listbox/autocomplete field.
    async fn query_options(&self, selector: &str) -> Result<Vec<DomOption>, PageError>;

    /// Captures a PNG screenshot, consumed by the optional vision oracle.
    async fn screenshot(&self) -> Result<Vec<u8>, PageError>;

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<(), PageError>;

    /// Evaluates a snippet of page JavaScript and returns its string
    /// result — used for DOM-settle checks and shadow-DOM discovery.
    async fn evaluate(&self, script: &str) -> Result<String, PageError>;

    /// Removes focus from the currently active element, matching the
    /// state machine's "Blur" phase.
    async fn blur_all(&self) -> Result<(), PageError>;

    /// Walks every candidate input/select/textarea in the main document
    /// and every nested frame, returning the flattened, validated
    /// descriptors the Field Detector cascade classifies. Hidden and
    /// non-visible elements may still be reported (the Detector is
    /// responsible for filtering on `visible`/`input_type`).
    async fn scan_elements(&self) -> Result<Vec<RawElement>, PageError>;

    /// Reports whether `aria-invalid="true"` is currently set on
    /// `selector`, used by the Verify phase to flag validation errors the
    /// page itself surfaced.
    async fn is_invalid(&self, selector: &str) -> Result<bool, PageError>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
