// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Greenhouse job board parser.

use super::{fetch_with_retry, AtsParser, RawPosting};
use async_trait::async_trait;
use jobpipe_core::FetchError;
use serde::Deserialize;

pub struct GreenhouseParser {
    client: reqwest::Client,
}

impl GreenhouseParser {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// The board token is the last path segment of the configured board
    /// URL (e.g. `https://boards.greenhouse.io/acme` -> `acme`).
    fn slug(board_url: &str) -> &str {
        board_url.trim_end_matches('/').rsplit('/').next().unwrap_or("")
    }
}

#[derive(Debug, Deserialize)]
struct JobsResponse {
    jobs: Vec<GreenhouseJob>,
}

#[derive(Debug, Deserialize)]
struct GreenhouseJob {
    id: i64,
    title: String,
    #[serde(default)]
    location: Option<GreenhouseLocation>,
    #[serde(default)]
    departments: Vec<GreenhouseDepartment>,
    absolute_url: Option<String>,
    first_published: Option<String>,
    updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GreenhouseLocation {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GreenhouseDepartment {
    name: Option<String>,
}

#[async_trait]
impl AtsParser for GreenhouseParser {
    fn ats_tag(&self) -> &'static str {
        "greenhouse"
    }

    async fn parse(
        &self,
        _company_name: &str,
        board_url: &str,
    ) -> Result<Vec<RawPosting>, FetchError> {
        let slug = Self::slug(board_url).to_string();
        fetch_with_retry(|| self.fetch_once(&slug)).await
    }
}

impl GreenhouseParser {
    async fn fetch_once(&self, slug: &str) -> Result<Vec<RawPosting>, FetchError> {
        let url = format!("https://boards-api.greenhouse.io/v1/boards/{slug}/jobs");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transient(e.to_string()))?;

        if response.status().is_server_error() {
            return Err(FetchError::Transient(format!(
                "greenhouse returned {}",
                response.status()
            )));
        }
        if !response.status().is_success() {
            return Err(FetchError::Permanent(format!(
                "greenhouse returned {}",
                response.status()
            )));
        }

        let body: JobsResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Permanent(format!("malformed greenhouse response: {e}")))?;

        Ok(body
            .jobs
            .into_iter()
            .map(|j| RawPosting {
                ats_job_id: j.id.to_string(),
                title: j.title,
                location: j
                    .location
                    .and_then(|l| l.name)
                    .unwrap_or_default(),
                department: j
                    .departments
                    .into_iter()
                    .next()
                    .and_then(|d| d.name)
                    .unwrap_or_default(),
                url: j.absolute_url.unwrap_or_default(),
                first_published: j.first_published.unwrap_or_default(),
                updated_at: j.updated_at.unwrap_or_default(),
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "greenhouse_tests.rs"]
mod tests;
