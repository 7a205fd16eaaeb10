// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::clock::FakeClock;
use crate::job::{Job, JobStatus};
use chrono::Utc;

/// Builds a job in `status = New` using a fresh [`FakeClock`] pinned to now.
pub fn sample_job(ats: &str, ats_job_id: &str) -> Job {
    let clock = FakeClock::new(Utc::now());
    Job::new(ats, ats_job_id, &clock)
}

/// Builds a job already advanced to `status`, with a synthetic history
/// reason for any non-`New` status.
pub fn sample_job_with_status(ats: &str, ats_job_id: &str, status: JobStatus) -> Job {
    let clock = FakeClock::new(Utc::now());
    let mut job = Job::new(ats, ats_job_id, &clock);
    if status != JobStatus::New {
        job.push_status(status, Some("test fixture".to_string()), &clock);
    }
    job
}
