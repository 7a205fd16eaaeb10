// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Job` domain type: a single posting tracked through the pipeline's
//! lifecycle state machine.

use crate::clock::Clock;
use crate::define_id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

define_id! {
    /// Stable identity for a job: composite of ATS name + ATS-internal id,
    /// e.g. `"greenhouse:111"`.
    pub struct JobId;
}

impl JobId {
    /// Builds the canonical composite id from an ATS tag and its internal id.
    pub fn composite(ats: &str, ats_job_id: &str) -> Self {
        Self(format!("{ats}:{ats_job_id}"))
    }
}

/// Lifecycle status. Any status can transition to any other status (the
/// Store trusts caller intent) but entering/leaving the skip statuses has
/// rejection-memory side effects — see `jobpipe_storage::PipelineStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    New,
    Applied,
    Interview,
    Offer,
    Rejected,
    Withdrawn,
    Closed,
    Excluded,
}

impl JobStatus {
    /// Statuses whose departure records/removes a rejection-memory entry.
    pub fn is_skip_status(self) -> bool {
        matches!(self, Self::Rejected | Self::Excluded | Self::Withdrawn)
    }

    pub fn is_active(self) -> bool {
        matches!(self, Self::New | Self::Applied | Self::Interview)
    }

    pub fn is_archived(self) -> bool {
        matches!(
            self,
            Self::Offer | Self::Rejected | Self::Withdrawn | Self::Closed
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Applied => "applied",
            Self::Interview => "interview",
            Self::Offer => "offer",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
            Self::Closed => "closed",
            Self::Excluded => "excluded",
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry in a job's append-only status history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    pub status: JobStatus,
    pub at: DateTime<Utc>,
    pub reason: Option<String>,
}

/// Structured result of location normalization (see `jobpipe_engine::normalize`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocationNorm {
    pub raw: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub state_full: Option<String>,
    pub states: Vec<String>,
    pub remote: bool,
    pub remote_scope: Option<RemoteScope>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteScope {
    Usa,
    Global,
}

/// Role family assigned by the Normalizer's classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleFamily {
    Product,
    TpmProgram,
    Project,
    Other,
}

impl RoleFamily {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::TpmProgram => "tpm_program",
            Self::Project => "project",
            Self::Other => "other",
        }
    }
}

/// Qualitative location tier driving scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeoBucket {
    Local,
    Nc,
    Neighbor,
    RemoteUsa,
    Other,
    Unknown,
}

impl GeoBucket {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Nc => "nc",
            Self::Neighbor => "neighbor",
            Self::RemoteUsa => "remote_usa",
            Self::Other => "other",
            Self::Unknown => "unknown",
        }
    }
}

/// Company metadata attached to a job at ingestion time (priority, HQ
/// state, tags) — sourced from the companies configuration, not the ATS.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyData {
    pub priority: i64,
    pub hq_state: Option<String>,
    pub region: Option<String>,
    pub tags: Vec<String>,
}

/// A single tracked posting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub ats_job_id: String,
    pub ats: String,
    pub company: String,
    pub title: String,
    pub location: String,
    pub location_norm: Option<LocationNorm>,
    pub department: String,
    pub url: String,
    pub first_published: String,
    pub updated_at: String,

    pub status: JobStatus,
    pub status_history: Vec<StatusHistoryEntry>,

    pub first_seen: DateTime<Utc>,
    pub added_to_pipeline: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub is_active_on_ats: bool,
    pub needs_attention: bool,

    pub notes: Option<String>,
    pub folder_path: Option<String>,
    pub jd_summary: Option<String>,

    pub industry: Option<String>,
    pub company_data: Option<CompanyData>,

    #[serde(default)]
    pub role_family: Option<RoleFamily>,
    #[serde(default)]
    pub role_confidence: f64,
    #[serde(default)]
    pub role_reason: Option<String>,
    #[serde(default)]
    pub geo_bucket: Option<GeoBucket>,
    #[serde(default)]
    pub geo_score: i64,
}

impl Job {
    /// Creates a new job at `status = New`, stamping timestamps from `clock`
    /// and initializing the history with a single entry. Invariant 2 (the
    /// history's last entry matches `status`) holds from construction.
    pub fn new(ats: impl Into<String>, ats_job_id: impl Into<String>, clock: &dyn Clock) -> Self {
        let ats = ats.into();
        let ats_job_id = ats_job_id.into();
        let now = clock.now();
        let id = JobId::composite(&ats, &ats_job_id);
        Self {
            id,
            ats_job_id,
            ats,
            company: String::new(),
            title: String::new(),
            location: String::new(),
            location_norm: None,
            department: String::new(),
            url: String::new(),
            first_published: String::new(),
            updated_at: String::new(),
            status: JobStatus::New,
            status_history: vec![StatusHistoryEntry {
                status: JobStatus::New,
                at: now,
                reason: None,
            }],
            first_seen: now,
            added_to_pipeline: now,
            last_seen: now,
            is_active_on_ats: true,
            needs_attention: false,
            notes: None,
            folder_path: None,
            jd_summary: None,
            industry: None,
            company_data: None,
            role_family: None,
            role_confidence: 0.0,
            role_reason: None,
            geo_bucket: None,
            geo_score: 0,
        }
    }

    /// Appends a new status, maintaining invariants 2 and 3. Returns the
    /// entry that was appended.
    pub fn push_status(&mut self, status: JobStatus, reason: Option<String>, clock: &dyn Clock) {
        self.status = status;
        self.status_history.push(StatusHistoryEntry {
            status,
            at: clock.now(),
            reason,
        });
    }

    /// Invariant check used by tests and by the Store before persisting.
    pub fn history_matches_status(&self) -> bool {
        self.status_history
            .last()
            .is_some_and(|e| e.status == self.status)
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
