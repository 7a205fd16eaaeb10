// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Pipeline Store: CRUD + state transitions over the jobs collection,
//! backed by the Storage Kernel and guarded by a single process-wide mutex.
//!
//! Matches the reference design in spirit: every call loads the current
//! on-disk copy, mutates it, and saves it back under the lock. Callers that
//! need to avoid the per-call disk round trip may cache `GetAll` results
//! themselves; the Store does not cache internally.

use crate::kernel;
use crate::rejection::{RejectionEntry, RejectionMemory};
use chrono::{DateTime, Utc};
use jobpipe_core::{Clock, Job, JobId, JobStatus};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Kernel(#[from] kernel::KernelError),
}

/// Whether a sweeper-induced close should also remove a rejection-memory
/// entry. The source system always un-rejects on any exit from the skip
/// statuses; this crate makes that ambiguous behavior an explicit choice.
/// Sweeper-induced closes never count as user-driven un-rejection
/// regardless of this flag — see `MarkMissing`.
#[derive(Debug, Clone, Copy)]
pub struct PipelineStoreConfig {
    pub unreject_on_any_exit: bool,
}

impl Default for PipelineStoreConfig {
    fn default() -> Self {
        Self {
            unreject_on_any_exit: true,
        }
    }
}

pub struct PipelineStore {
    jobs_path: PathBuf,
    rejected_path: PathBuf,
    config: PipelineStoreConfig,
    clock: Arc<dyn Clock>,
    lock: Mutex<()>,
}

impl PipelineStore {
    pub fn new(
        jobs_path: PathBuf,
        rejected_path: PathBuf,
        config: PipelineStoreConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            jobs_path,
            rejected_path,
            config,
            clock,
            lock: Mutex::new(()),
        }
    }

    fn load_jobs(&self) -> Result<Vec<Job>, StoreError> {
        Ok(kernel::load(&self.jobs_path)?.unwrap_or_default())
    }

    fn save_jobs(&self, jobs: &[Job]) -> Result<(), StoreError> {
        Ok(kernel::save(&self.jobs_path, &jobs)?)
    }

    fn load_rejections(&self) -> Result<RejectionMemory, StoreError> {
        Ok(kernel::load(&self.rejected_path)?.unwrap_or_default())
    }

    fn save_rejections(&self, rejections: &RejectionMemory) -> Result<(), StoreError> {
        Ok(kernel::save(&self.rejected_path, rejections)?)
    }

    /// `Add(job, status=new) -> added`. Rejects if `id` present or
    /// `ats_job_id` is in rejection memory.
    pub fn add(&self, job: Job) -> Result<bool, StoreError> {
        let _guard = self.lock.lock();
        let mut jobs = self.load_jobs()?;
        let rejections = self.load_rejections()?;

        if jobs.iter().any(|j| j.id == job.id) || rejections.contains_key(&job.ats_job_id) {
            return Ok(false);
        }

        jobs.push(job);
        self.save_jobs(&jobs)?;
        Ok(true)
    }

    /// `AddBulk(jobs) -> count`. Single load-modify-save; dedups against
    /// existing ids and rejection memory.
    pub fn add_bulk(&self, candidates: Vec<Job>) -> Result<usize, StoreError> {
        let _guard = self.lock.lock();
        let mut jobs = self.load_jobs()?;
        let rejections = self.load_rejections()?;

        let existing_ids: HashSet<String> = jobs.iter().map(|j| j.id.as_str().to_string()).collect();
        let mut added = 0usize;
        let mut seen_this_batch: HashSet<String> = HashSet::new();

        for job in candidates {
            let id_str = job.id.as_str().to_string();
            if existing_ids.contains(&id_str)
                || seen_this_batch.contains(&id_str)
                || rejections.contains_key(&job.ats_job_id)
            {
                continue;
            }
            seen_this_batch.insert(id_str);
            jobs.push(job);
            added += 1;
        }

        if added > 0 {
            self.save_jobs(&jobs)?;
        }
        Ok(added)
    }

    /// `UpdateStatus(id, new_status, notes?, folder_path?, jd_summary?) ->
    /// job | not_found`. Appends to history; maintains the rejection
    /// memory side effect for the skip statuses.
    #[allow(clippy::too_many_arguments)]
    pub fn update_status(
        &self,
        id: &JobId,
        new_status: JobStatus,
        notes: Option<String>,
        folder_path: Option<String>,
        jd_summary: Option<String>,
        reason: Option<String>,
    ) -> Result<Option<Job>, StoreError> {
        let _guard = self.lock.lock();
        let mut jobs = self.load_jobs()?;
        let mut rejections = self.load_rejections()?;

        let Some(job) = jobs.iter_mut().find(|j| &j.id == id) else {
            return Ok(None);
        };

        let was_skip = job.status.is_skip_status();
        job.push_status(new_status, reason, self.clock.as_ref());
        if let Some(n) = notes {
            job.notes = Some(n);
        }
        if let Some(fp) = folder_path {
            job.folder_path = Some(fp);
        }
        if let Some(jd) = jd_summary {
            job.jd_summary = Some(jd);
        }

        if new_status.is_skip_status() {
            rejections.insert(
                job.ats_job_id.clone(),
                RejectionEntry {
                    title: job.title.clone(),
                    company: job.company.clone(),
                    reason: job.status_history.last().and_then(|e| e.reason.clone()),
                    date: self.clock.now(),
                },
            );
        } else if was_skip && self.config.unreject_on_any_exit {
            rejections.remove(&job.ats_job_id);
        }

        let result = job.clone();
        self.save_jobs(&jobs)?;
        self.save_rejections(&rejections)?;
        Ok(Some(result))
    }

    pub fn update_last_seen(&self, id: &JobId, is_active: bool) -> Result<(), StoreError> {
        self.update_last_seen_bulk_inner(&[id.clone()], is_active)
    }

    pub fn update_last_seen_bulk(&self, ids: &[JobId]) -> Result<(), StoreError> {
        self.update_last_seen_bulk_inner(ids, true)
    }

    fn update_last_seen_bulk_inner(&self, ids: &[JobId], is_active: bool) -> Result<(), StoreError> {
        let _guard = self.lock.lock();
        let mut jobs = self.load_jobs()?;
        let now = self.clock.now();
        let id_set: HashSet<&str> = ids.iter().map(|i| i.as_str()).collect();

        for job in jobs.iter_mut() {
            if id_set.contains(job.id.as_str()) {
                // last_seen only moves forward (invariant 5)
                if now > job.last_seen {
                    job.last_seen = now;
                }
                job.is_active_on_ats = is_active;
            }
        }

        self.save_jobs(&jobs)
    }

    /// `MarkMissing(active_ids, days_threshold=3) -> jobs_needing_attention`.
    /// Never touches rejection memory — a sweeper close is a system action,
    /// not user intent (see `PipelineStoreConfig`'s doc comment).
    pub fn mark_missing(
        &self,
        active_ids: &HashSet<String>,
        days_threshold: i64,
    ) -> Result<Vec<Job>, StoreError> {
        let _guard = self.lock.lock();
        let mut jobs = self.load_jobs()?;
        let now = self.clock.now();
        let mut flagged = Vec::new();

        for job in jobs.iter_mut() {
            if !matches!(job.status, JobStatus::Applied | JobStatus::Interview) {
                continue;
            }
            if active_ids.contains(job.id.as_str()) {
                continue;
            }
            let age_days = (now - job.last_seen).num_days();
            if age_days >= days_threshold {
                job.push_status(
                    JobStatus::Closed,
                    Some(format!("Not seen on ATS for {age_days} days")),
                    self.clock.as_ref(),
                );
                job.needs_attention = true;
                flagged.push(job.clone());
            }
        }

        if !flagged.is_empty() {
            self.save_jobs(&jobs)?;
        }
        Ok(flagged)
    }

    pub fn get_all(&self) -> Result<Vec<Job>, StoreError> {
        self.load_jobs()
    }

    pub fn get_by_status(&self, status: JobStatus) -> Result<Vec<Job>, StoreError> {
        Ok(self
            .load_jobs()?
            .into_iter()
            .filter(|j| j.status == status)
            .collect())
    }

    pub fn get_active(&self) -> Result<Vec<Job>, StoreError> {
        Ok(self
            .load_jobs()?
            .into_iter()
            .filter(|j| j.status.is_active())
            .collect())
    }

    pub fn get_archive(&self) -> Result<Vec<Job>, StoreError> {
        Ok(self
            .load_jobs()?
            .into_iter()
            .filter(|j| j.status.is_archived())
            .collect())
    }

    pub fn get_by_id(&self, id: &JobId) -> Result<Option<Job>, StoreError> {
        Ok(self.load_jobs()?.into_iter().find(|j| &j.id == id))
    }

    pub fn exists(&self, id: &JobId) -> Result<bool, StoreError> {
        Ok(self.get_by_id(id)?.is_some())
    }

    pub fn stats(&self) -> Result<std::collections::HashMap<String, usize>, StoreError> {
        let jobs = self.load_jobs()?;
        let mut by_status = std::collections::HashMap::new();
        for job in &jobs {
            *by_status.entry(job.status.as_str().to_string()).or_insert(0) += 1;
        }
        Ok(by_status)
    }

    pub fn rejection_memory(&self) -> Result<RejectionMemory, StoreError> {
        self.load_rejections()
    }

    pub fn is_rejected(&self, ats_job_id: &str) -> Result<bool, StoreError> {
        Ok(self.load_rejections()?.contains_key(ats_job_id))
    }
}

/// Reads a timestamp string as it would appear parsed from an ATS source
/// payload (ISO-8601, tolerant of a trailing `Z`). Used by scoring
/// freshness checks, kept here since the Store is the natural home for
/// timestamp parsing shared with `jobpipe-engine`.
pub fn parse_source_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let normalized = raw.replacen('Z', "+00:00", 1);
    DateTime::parse_from_rfc3339(&normalized)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
#[path = "pipeline_store_tests.rs"]
mod tests;
