// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! SmartRecruiters job board parser. Paginated, 100 postings per page.

use super::{fetch_with_retry, AtsParser, RawPosting};
use async_trait::async_trait;
use jobpipe_core::FetchError;
use serde::Deserialize;

const PAGE_SIZE: u32 = 100;

pub struct SmartRecruitersParser {
    client: reqwest::Client,
}

impl SmartRecruitersParser {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn slug(board_url: &str) -> &str {
        board_url.trim_end_matches('/').rsplit('/').next().unwrap_or("")
    }

    fn build_location(loc: &SmartRecruitersLocation) -> String {
        [loc.city.as_deref(), loc.region.as_deref(), loc.country.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn resolve_url(board_url: &str, ref_path: &str) -> String {
        if ref_path.starts_with("http://") || ref_path.starts_with("https://") {
            ref_path.to_string()
        } else {
            format!(
                "{}/{}",
                board_url.trim_end_matches('/'),
                ref_path.trim_start_matches('/')
            )
        }
    }
}

#[derive(Debug, Deserialize)]
struct PostingsResponse {
    content: Vec<SmartRecruitersPosting>,
    #[serde(rename = "totalFound")]
    total_found: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct SmartRecruitersPosting {
    id: String,
    name: String,
    #[serde(default)]
    location: SmartRecruitersLocation,
    department: Option<SmartRecruitersDepartment>,
    #[serde(rename = "ref")]
    ref_path: Option<String>,
    #[serde(rename = "releasedDate")]
    released_date: Option<String>,
    #[serde(rename = "updatedOn")]
    updated_on: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SmartRecruitersLocation {
    city: Option<String>,
    region: Option<String>,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SmartRecruitersDepartment {
    label: Option<String>,
}

#[async_trait]
impl AtsParser for SmartRecruitersParser {
    fn ats_tag(&self) -> &'static str {
        "smartrecruiters"
    }

    async fn parse(
        &self,
        _company_name: &str,
        board_url: &str,
    ) -> Result<Vec<RawPosting>, FetchError> {
        let slug = Self::slug(board_url).to_string();
        let board_url = board_url.to_string();
        fetch_with_retry(|| self.fetch_all_pages(&slug, &board_url)).await
    }
}

impl SmartRecruitersParser {
    async fn fetch_all_pages(
        &self,
        slug: &str,
        board_url: &str,
    ) -> Result<Vec<RawPosting>, FetchError> {
        let mut postings = Vec::new();
        let mut offset = 0u32;

        loop {
            let url = format!(
                "https://api.smartrecruiters.com/v1/companies/{slug}/postings?limit={PAGE_SIZE}&offset={offset}"
            );
            let response = self
                .client
                .get(&url)
                .send()
                .await
                .map_err(|e| FetchError::Transient(e.to_string()))?;

            if response.status().is_server_error() {
                return Err(FetchError::Transient(format!(
                    "smartrecruiters returned {}",
                    response.status()
                )));
            }
            if !response.status().is_success() {
                return Err(FetchError::Permanent(format!(
                    "smartrecruiters returned {}",
                    response.status()
                )));
            }

            let page: PostingsResponse = response.json().await.map_err(|e| {
                FetchError::Permanent(format!("malformed smartrecruiters response: {e}"))
            })?;

            let page_len = page.content.len() as u32;
            for p in page.content {
                let updated = p.updated_on.clone().unwrap_or_default();
                postings.push(RawPosting {
                    ats_job_id: p.id,
                    title: p.name,
                    location: Self::build_location(&p.location),
                    department: p.department.and_then(|d| d.label).unwrap_or_default(),
                    url: p
                        .ref_path
                        .map(|r| Self::resolve_url(board_url, &r))
                        .unwrap_or_default(),
                    first_published: p.released_date.unwrap_or_default(),
                    updated_at: updated,
                });
            }

            if page_len < PAGE_SIZE {
                break;
            }
            offset += PAGE_SIZE;
        }

        Ok(postings)
    }
}

#[cfg(test)]
#[path = "smartrecruiters_tests.rs"]
mod tests;
