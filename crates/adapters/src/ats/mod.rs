// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-ATS job board adapters.
//!
//! Every parser implements the same narrow contract: fetch a company's
//! board and return raw postings, with missing optional fields coming
//! back as empty strings rather than null/absent. Retries are handled by
//! the shared [`fetch_with_retry`] helper, not by individual parsers.

mod ashby;
mod greenhouse;
mod lever;
mod smartrecruiters;
mod workday;

pub use ashby::AshbyParser;
pub use greenhouse::GreenhouseParser;
pub use lever::LeverParser;
pub use smartrecruiters::SmartRecruitersParser;
pub use workday::WorkdayParser;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeAtsParser;

use async_trait::async_trait;
use jobpipe_core::FetchError;
use std::time::Duration;

/// A single raw posting as returned by a board, before normalization and
/// scoring. Field names mirror `Job`'s ATS-sourced fields directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPosting {
    pub ats_job_id: String,
    pub title: String,
    pub location: String,
    pub department: String,
    pub url: String,
    pub first_published: String,
    pub updated_at: String,
}

/// Plug-in contract for a single ATS integration.
#[async_trait]
pub trait AtsParser: Send + Sync {
    /// Short tag used as the `ats` component of a job's composite id
    /// (`"greenhouse"`, `"lever"`, etc.).
    fn ats_tag(&self) -> &'static str;

    /// Fetches every open posting for `company_name` at `board_url`.
    async fn parse(
        &self,
        company_name: &str,
        board_url: &str,
    ) -> Result<Vec<RawPosting>, FetchError>;
}

/// Minimum gap between retry attempts.
pub const RETRY_MIN_GAP: Duration = Duration::from_secs(2);

/// Maximum attempts (including the first) before giving up on a transient
/// error. Permanent errors are never retried.
pub const MAX_ATTEMPTS: u32 = 3;

/// Runs `op`, retrying up to [`MAX_ATTEMPTS`] times with a fixed
/// [`RETRY_MIN_GAP`] backoff on [`FetchError::Transient`]. Permanent
/// errors propagate immediately.
pub async fn fetch_with_retry<F, Fut>(mut op: F) -> Result<Vec<RawPosting>, FetchError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<Vec<RawPosting>, FetchError>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match op().await {
            Ok(postings) => return Ok(postings),
            Err(e) if e.is_transient() && attempt < MAX_ATTEMPTS => {
                tracing::warn!(attempt, error = %e, "transient fetch error, retrying");
                tokio::time::sleep(RETRY_MIN_GAP).await;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
