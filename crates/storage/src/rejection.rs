// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rejection memory: a durable map of `ats_job_id -> RejectionEntry`,
//! consulted by `Add`/`AddBulk` and maintained by `UpdateStatus`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectionEntry {
    pub title: String,
    pub company: String,
    pub reason: Option<String>,
    pub date: DateTime<Utc>,
}

/// On-disk shape of `data/rejected_jobs.json`: `ats_job_id -> entry`.
pub type RejectionMemory = HashMap<String, RejectionEntry>;
