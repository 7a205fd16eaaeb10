// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The LLM Oracle: a narrow trait the Answer Resolver falls back to once
//! every deterministic cascade step has failed.

mod anthropic;
mod ollama;

pub use anthropic::AnthropicOracle;
pub use ollama::OllamaOracle;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeOracle;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("empty response")]
    Empty,
}

/// A dropdown/radio option offered to the model for [`Oracle::choose_option`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleOption {
    pub value: String,
    pub label: String,
}

/// Narrow LLM contract consulted as the last resort in the Answer
/// Resolver cascade. Both implementations are fallible-with-no-retry: on
/// error the caller treats it as "no answer" and the cascade falls
/// through rather than surfacing the error to the user.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Free-text generation for a field labeled `question`, given
    /// `context` (the surrounding job/profile context as plain text).
    async fn generate(&self, question: &str, context: &str) -> Result<String, OracleError>;

    /// Picks the best-fitting option for a dropdown/radio field.
    async fn choose_option(
        &self,
        question: &str,
        options: &[OracleOption],
        context: &str,
    ) -> Result<OracleOption, OracleError>;
}

/// Optional capability: analyzes a field from a screenshot when the DOM
/// alone doesn't resolve it. Not every deployment configures a
/// vision-capable model, so this is consulted via `Option<&dyn
/// VisionOracle>` rather than folded into `Oracle` itself.
#[async_trait]
pub trait VisionOracle: Send + Sync {
    async fn vision_analyze_field(
        &self,
        question: &str,
        screenshot_png: &[u8],
    ) -> Result<String, OracleError>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
