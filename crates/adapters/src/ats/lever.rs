// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lever job board parser.

use super::{fetch_with_retry, AtsParser, RawPosting};
use async_trait::async_trait;
use chrono::DateTime;
use jobpipe_core::FetchError;
use serde::Deserialize;

pub struct LeverParser {
    client: reqwest::Client,
}

impl LeverParser {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn slug(board_url: &str) -> &str {
        board_url.trim_end_matches('/').rsplit('/').next().unwrap_or("")
    }

    /// Lever timestamps are epoch-milliseconds, but some boards have been
    /// observed returning epoch-seconds. Anything above 1e12 is treated as
    /// milliseconds; anything below is seconds.
    fn format_epoch(raw: i64) -> String {
        let millis = if raw > 1_000_000_000_000 { raw } else { raw * 1000 };
        DateTime::from_timestamp_millis(millis)
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct LeverPosting {
    id: String,
    text: String,
    #[serde(default)]
    categories: LeverCategories,
    #[serde(rename = "hostedUrl")]
    hosted_url: Option<String>,
    #[serde(rename = "createdAt")]
    created_at: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct LeverCategories {
    location: Option<String>,
    department: Option<String>,
}

#[async_trait]
impl AtsParser for LeverParser {
    fn ats_tag(&self) -> &'static str {
        "lever"
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

impl LeverParser {
    async fn fetch_once(&self, slug: &str) -> Result<Vec<RawPosting>, FetchError> {
        let url = format!("https://api.lever.co/v0/postings/{slug}?mode=json");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transient(e.to_string()))?;

        if response.status().is_server_error() {
            return Err(FetchError::Transient(format!(
                "lever returned {}",
                response.status()
            )));
        }
        if !response.status().is_success() {
            return Err(FetchError::Permanent(format!(
                "lever returned {}",
                response.status()
            )));
        }

        let postings: Vec<LeverPosting> = response
            .json()
            .await
            .map_err(|e| FetchError::Permanent(format!("malformed lever response: {e}")))?;

        Ok(postings
            .into_iter()
            .map(|p| {
                let stamp = p.created_at.map(Self::format_epoch).unwrap_or_default();
                RawPosting {
                    ats_job_id: p.id,
                    title: p.text,
                    location: p.categories.location.unwrap_or_default(),
                    department: p.categories.department.unwrap_or_default(),
                    url: p.hosted_url.unwrap_or_default(),
                    first_published: stamp.clone(),
                    updated_at: stamp,
                }
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "lever_tests.rs"]
mod tests;
