// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workday job board parser. Workday rejects bare API clients, so every
//! request spoofs a real-browser `Origin`/`Referer`/`User-Agent` — this
//! is load-bearing, not decoration.

use super::{fetch_with_retry, AtsParser, RawPosting};
use async_trait::async_trait;
use jobpipe_core::FetchError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, ORIGIN, REFERER, USER_AGENT};
use serde::{Deserialize, Serialize};

const BATCH_SIZE: u32 = 50;
/// Outer cap on jobs paginated per fetch, mirroring the original's
/// `while offset < limit` with `limit=20` — Workday boards can list
/// thousands of postings and most of a large board is irrelevant to a
/// single profile's search, so pagination stops well short of `total`.
const PAGE_LIMIT: u32 = 20;
const BROWSER_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub struct WorkdayParser {
    client: reqwest::Client,
}

impl WorkdayParser {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// `board_url` is the full API endpoint:
    /// `https://{company}.{wd}.myworkdayjobs.com/wday/cxs/{company}/{site}/jobs`.
    /// Returns `(domain, site_id)`.
    fn parse_domain_and_site(board_url: &str) -> (String, String) {
        let Some((domain, rest)) = board_url.split_once("/wday/cxs/") else {
            return (String::new(), String::new());
        };
        let site_id = rest.split('/').nth(1).unwrap_or("").to_string();
        (domain.to_string(), site_id)
    }

    fn build_headers(domain: &str, site_id: &str) -> HeaderMap {
        let referer = if site_id.is_empty() {
            domain.to_string()
        } else {
            format!("{domain}/{site_id}")
        };

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("en-US,en;q=0.9"),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_UA));
        if let Ok(v) = HeaderValue::from_str(domain) {
            headers.insert(ORIGIN, v);
        }
        if let Ok(v) = HeaderValue::from_str(&referer) {
            headers.insert(REFERER, v);
        }
        headers
    }
}

#[derive(Debug, Serialize)]
struct SearchRequest {
    #[serde(rename = "appliedFacets")]
    applied_facets: serde_json::Map<String, serde_json::Value>,
    limit: u32,
    offset: u32,
    #[serde(rename = "searchText")]
    search_text: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "jobPostings", default)]
    job_postings: Vec<WorkdayPosting>,
    #[serde(default)]
    total: u32,
}

#[derive(Debug, Deserialize)]
struct WorkdayPosting {
    title: String,
    #[serde(rename = "locationsText", default)]
    locations_text: String,
    #[serde(rename = "externalPath", default)]
    external_path: String,
    #[serde(rename = "postedOn", default)]
    posted_on: String,
}

#[async_trait]
impl AtsParser for WorkdayParser {
    fn ats_tag(&self) -> &'static str {
        "workday"
    }

    async fn parse(
        &self,
        _company_name: &str,
        board_url: &str,
    ) -> Result<Vec<RawPosting>, FetchError> {
        let board_url = board_url.to_string();
        fetch_with_retry(|| self.fetch_all_pages(&board_url)).await
    }
}

impl WorkdayParser {
    async fn fetch_all_pages(&self, api_url: &str) -> Result<Vec<RawPosting>, FetchError> {
        let (domain, site_id) = Self::parse_domain_and_site(api_url);
        let headers = Self::build_headers(&domain, &site_id);
        let base_url = format!("{domain}/{site_id}");

        let mut postings = Vec::new();
        let mut offset = 0u32;

        while offset < PAGE_LIMIT {
            let payload = SearchRequest {
                applied_facets: serde_json::Map::new(),
                limit: BATCH_SIZE,
                offset,
                search_text: String::new(),
            };

            let response = self
                .client
                .post(api_url)
                .headers(headers.clone())
                .json(&payload)
                .send()
                .await
                .map_err(|e| FetchError::Transient(e.to_string()))?;

            if response.status().is_server_error() {
                return Err(FetchError::Transient(format!(
                    "workday returned {}",
                    response.status()
                )));
            }
            if !response.status().is_success() {
                return Err(FetchError::Permanent(format!(
                    "workday returned {}",
                    response.status()
                )));
            }

            let page: SearchResponse = response
                .json()
                .await
                .map_err(|e| FetchError::Permanent(format!("malformed workday response: {e}")))?;

            if page.job_postings.is_empty() {
                break;
            }

            for p in &page.job_postings {
                let url = if p.external_path.is_empty() {
                    base_url.clone()
                } else {
                    format!("{base_url}{}", p.external_path)
                };
                postings.push(RawPosting {
                    ats_job_id: p.external_path.clone(),
                    title: p.title.clone(),
                    location: p.locations_text.clone(),
                    department: String::new(),
                    url,
                    first_published: p.posted_on.clone(),
                    updated_at: p.posted_on.clone(),
                });
            }

            offset += BATCH_SIZE;
            if offset >= page.total {
                break;
            }
        }

        Ok(postings)
    }
}

#[cfg(test)]
#[path = "workday_tests.rs"]
mod tests;
