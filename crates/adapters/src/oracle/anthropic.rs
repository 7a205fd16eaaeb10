// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote LLM provider via the Anthropic Messages API.

use super::{Oracle, OracleError, OracleOption};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";
const API_VERSION: &str = "2023-06-01";

pub struct AnthropicOracle {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl AnthropicOracle {
    /// Reads the API key from `ANTHROPIC_API_KEY`. Returns `None` if the
    /// variable isn't set, matching the original source's "no provider
    /// configured, fall through" behavior rather than panicking at
    /// startup.
    pub fn from_env(client: reqwest::Client) -> Option<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY").ok()?;
        Some(Self::new(client, api_key))
    }

    pub fn new(client: reqwest::Client, api_key: String) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    async fn request(&self, prompt: &str) -> Result<String, OracleError> {
        let payload = MessagesRequest {
            model: &self.model,
            max_tokens: 256,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&payload)
            .send()
            .await
            .map_err(|e| OracleError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(OracleError::RequestFailed(format!(
                "anthropic returned {}",
                response.status()
            )));
        }

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| OracleError::RequestFailed(e.to_string()))?;

        let text = body
            .content
            .into_iter()
            .find_map(|block| block.text)
            .unwrap_or_default()
            .trim()
            .to_string();

        if text.is_empty() {
            Err(OracleError::Empty)
        } else {
            Ok(text)
        }
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[async_trait]
impl Oracle for AnthropicOracle {
    async fn generate(&self, question: &str, context: &str) -> Result<String, OracleError> {
        let prompt = format!(
            "Answer the following job application question concisely, in plain text with no preamble.\n\nQuestion: {question}\n\nContext:\n{context}\n\nAnswer:"
        );
        self.request(&prompt).await
    }

    async fn choose_option(
        &self,
        question: &str,
        options: &[OracleOption],
        context: &str,
    ) -> Result<OracleOption, OracleError> {
        let listed = options
            .iter()
            .enumerate()
            .map(|(i, o)| format!("{i}: {}", o.label))
            .collect::<Vec<_>>()
            .join("\n");

        let prompt = format!(
            "Question: {question}\n\nOptions:\n{listed}\n\nContext:\n{context}\n\nRespond with only the best option's index number."
        );

        let raw = self.request(&prompt).await?;
        let index: usize = raw
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect::<String>()
            .parse()
            .map_err(|_| OracleError::RequestFailed(format!("non-numeric response: {raw}")))?;

        options
            .get(index)
            .cloned()
            .ok_or_else(|| OracleError::RequestFailed(format!("option index {index} out of range")))
    }
}

#[cfg(test)]
#[path = "anthropic_tests.rs"]
mod tests;
