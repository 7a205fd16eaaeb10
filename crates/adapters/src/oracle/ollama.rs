// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local LLM provider via the Ollama HTTP API.

use super::{Oracle, OracleError, OracleOption};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "llama3.2:3b";

pub struct OllamaOracle {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaOracle {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    async fn request(&self, prompt: &str, system: Option<&str>) -> Result<String, OracleError> {
        let payload = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            system,
            options: GenerateOptions { temperature: 0.1 },
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&payload)
            .send()
            .await
            .map_err(|e| OracleError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(OracleError::RequestFailed(format!(
                "ollama returned {}",
                response.status()
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| OracleError::RequestFailed(e.to_string()))?;

        let trimmed = body.response.trim().to_string();
        if trimmed.is_empty() {
            Err(OracleError::Empty)
        } else {
            Ok(trimmed)
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f64,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

#[async_trait]
impl Oracle for OllamaOracle {
    async fn generate(&self, question: &str, context: &str) -> Result<String, OracleError> {
        let prompt = format!(
            "Answer the following job application question concisely, in plain text with no preamble.\n\nQuestion: {question}\n\nContext:\n{context}\n\nAnswer:"
        );
        self.request(&prompt, None).await
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

        let system =
            "You choose the single best-fitting option index for a job application dropdown. Respond with only the index number.";
        let prompt = format!(
            "Question: {question}\n\nOptions:\n{listed}\n\nContext:\n{context}\n\nBest option index:"
        );

        let raw = self.request(&prompt, Some(system)).await?;
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
#[path = "ollama_tests.rs"]
mod tests;
