// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ashby job board parser. Single request, no native retry loop — wrapped
//! in the shared retry helper for consistency with the other parsers.

use super::{fetch_with_retry, AtsParser, RawPosting};
use async_trait::async_trait;
use jobpipe_core::FetchError;
use serde::Deserialize;

const USER_AGENT: &str = "jobpipe-ingestion/1.0 (+https://jobpipe.invalid)";

pub struct AshbyParser {
    client: reqwest::Client,
}

impl AshbyParser {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn slug(board_url: &str) -> &str {
        board_url.trim_end_matches('/').rsplit('/').next().unwrap_or("")
    }
}

#[derive(Debug, Deserialize)]
struct AshbyResponse {
    jobs: Vec<AshbyJob>,
}

#[derive(Debug, Deserialize)]
struct AshbyJob {
    id: String,
    title: String,
    #[serde(default)]
    location: Option<String>,
    department: Option<String>,
    #[serde(rename = "jobUrl")]
    job_url: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    #[serde(rename = "updatedAt")]
    updated_at: Option<String>,
}

#[async_trait]
impl AtsParser for AshbyParser {
    fn ats_tag(&self) -> &'static str {
        "ashby"
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

impl AshbyParser {
    async fn fetch_once(&self, slug: &str) -> Result<Vec<RawPosting>, FetchError> {
        let url = format!("https://api.ashbyhq.com/posting-api/job-board/{slug}");
        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| FetchError::Transient(e.to_string()))?;

        if response.status().is_server_error() {
            return Err(FetchError::Transient(format!(
                "ashby returned {}",
                response.status()
            )));
        }
        if !response.status().is_success() {
            return Err(FetchError::Permanent(format!(
                "ashby returned {}",
                response.status()
            )));
        }

        let body: AshbyResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Permanent(format!("malformed ashby response: {e}")))?;

        Ok(body
            .jobs
            .into_iter()
            .map(|j| RawPosting {
                ats_job_id: j.id,
                title: j.title,
                location: j.location.unwrap_or_default(),
                department: j.department.unwrap_or_default(),
                url: j.job_url.unwrap_or_default(),
                first_published: j.published_at.unwrap_or_default(),
                updated_at: j.updated_at.unwrap_or_default(),
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "ashby_tests.rs"]
mod tests;
