// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Ingestion Orchestrator: fetches every configured company's board
//! concurrently, annotates each posting (location, role, geo bucket/
//! score, company metadata), and reconciles the result against the
//! pipeline store. Grounded in `main.py`'s `_fetch_for_company` and the
//! `/jobs`-refresh code path that calls it per company.

use crate::config::{GeoConfig, RoleClassifierConfig};
use crate::error::IngestError;
use crate::normalize::{classify_role, compute_geo_bucket_and_score, normalize_location};
use chrono::Utc;
use jobpipe_adapters::ats::{fetch_with_retry, AtsParser, RawPosting};
use jobpipe_core::{Clock, CompanyData, Job, JobId};
use jobpipe_storage::{kernel, PipelineStore};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// A single company's ingestion configuration — the Rust analogue of the
/// original source's per-entry `cfg: dict` (company name, ATS tag, board
/// URL, priority/hq/tags metadata).
#[derive(Debug, Clone)]
pub struct CompanyConfig {
    pub company: String,
    pub ats: String,
    pub board_url: String,
    pub industry: String,
    pub priority: i64,
    pub hq_state: Option<String>,
    pub region: Option<String>,
    pub tags: Vec<String>,
}

/// Per-company fetch outcome, mirroring `company_fetch_status`'s
/// `{ok, error, checked_at, ats, url}` shape. Identity is `(profile,
/// company)` (SPEC_FULL §3's supplement) rather than `company` alone,
/// matching `main.py::company_fetch_status`'s `"{profile}:{company}"`
/// keying — a single daemon config runs one profile at a time, so every
/// status produced by one `run_ingestion` call shares the same `profile`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyFetchStatus {
    pub profile: String,
    pub company: String,
    pub ok: bool,
    pub error: Option<String>,
    pub checked_at: chrono::DateTime<Utc>,
    pub ats: String,
    pub url: String,
}

/// The `"{profile}:{company}"` composite key `company_fetch_status` is
/// stored and looked up under.
pub fn fetch_status_key(profile: &str, company: &str) -> String {
    format!("{profile}:{company}")
}

/// On-disk shape of the persisted company-fetch-status map: composite key
/// (see [`fetch_status_key`]) to status. Loaded and saved through the
/// Storage Kernel like every other shared file (§5).
pub type CompanyStatusMap = HashMap<String, CompanyFetchStatus>;

/// Merges `statuses` into whatever is already persisted at `path` (so a
/// sweep over a subset of companies doesn't erase the others' last-known
/// status) and saves the result. Each entry's key is recomputed from its
/// own `(profile, company)` rather than reused from the existing map, so
/// a company that switches ATS or board URL updates in place.
pub fn persist_company_status(path: &Path, statuses: &[CompanyFetchStatus]) -> Result<(), IngestError> {
    let mut existing: CompanyStatusMap = kernel::load(path)?.unwrap_or_default();
    for status in statuses {
        existing.insert(fetch_status_key(&status.profile, &status.company), status.clone());
    }
    kernel::save(path, &existing)?;
    Ok(())
}

/// Loads the persisted company-fetch-status map, defaulting to empty when
/// the file doesn't exist yet (same permissive-read contract as every
/// other Storage Kernel-backed file).
pub fn load_company_status(path: &Path) -> Result<CompanyStatusMap, IngestError> {
    Ok(kernel::load(path)?.unwrap_or_default())
}

/// Maximum companies fetched concurrently, matching the original
/// source's effectively-unbounded-but-network-limited fan-out tamed down
/// to a fixed budget here since real `AtsParser`s hit the network.
const MAX_CONCURRENT_FETCHES: usize = 12;

/// Looks up the registered parser for `ats_tag`, returning `None` for an
/// unrecognized tag (the original source's `jobs = []` branch).
pub fn resolve_parser<'a>(
    registry: &'a HashMap<String, Arc<dyn AtsParser>>,
    ats_tag: &str,
) -> Option<&'a Arc<dyn AtsParser>> {
    registry.get(ats_tag)
}

/// Fetches and annotates one company's postings. Never returns a
/// [`FetchError`](jobpipe_core::FetchError) to the caller — a failed
/// fetch becomes an empty posting list plus a `CompanyFetchStatus`
/// recording the failure, exactly as `_fetch_for_company` swallows the
/// exception and logs rather than failing the whole ingestion run.
async fn fetch_and_annotate(
    cfg: CompanyConfig,
    profile: Arc<str>,
    registry: Arc<HashMap<String, Arc<dyn AtsParser>>>,
    geo_cfg: Arc<GeoConfig>,
    role_cfg: Arc<RoleClassifierConfig>,
    clock: Arc<dyn Clock>,
) -> (Vec<Job>, CompanyFetchStatus) {
    let Some(parser) = resolve_parser(&registry, &cfg.ats) else {
        return (
            Vec::new(),
            CompanyFetchStatus {
                profile: profile.to_string(),
                company: cfg.company.clone(),
                ok: false,
                error: Some(format!("no parser registered for ats '{}'", cfg.ats)),
                checked_at: clock.now(),
                ats: cfg.ats.clone(),
                url: cfg.board_url.clone(),
            },
        );
    };

    let result = fetch_with_retry(|| parser.parse(&cfg.company, &cfg.board_url)).await;

    match result {
        Ok(postings) => {
            let jobs = postings
                .into_iter()
                .map(|p| annotate(p, &cfg, &geo_cfg, &role_cfg, clock.as_ref()))
                .collect();
            (
                jobs,
                CompanyFetchStatus {
                    profile: profile.to_string(),
                    company: cfg.company.clone(),
                    ok: true,
                    error: None,
                    checked_at: clock.now(),
                    ats: cfg.ats.clone(),
                    url: cfg.board_url.clone(),
                },
            )
        }
        Err(e) => (
            Vec::new(),
            CompanyFetchStatus {
                profile: profile.to_string(),
                company: cfg.company.clone(),
                ok: false,
                error: Some(e.to_string()),
                checked_at: clock.now(),
                ats: cfg.ats.clone(),
                url: cfg.board_url.clone(),
            },
        ),
    }
}

fn annotate(posting: RawPosting, cfg: &CompanyConfig, geo_cfg: &GeoConfig, role_cfg: &RoleClassifierConfig, clock: &dyn Clock) -> Job {
    let mut job = Job::new(&cfg.ats, &posting.ats_job_id, clock);
    job.company = cfg.company.clone();
    job.industry = (!cfg.industry.is_empty()).then(|| cfg.industry.clone());
    job.title = posting.title;
    job.location = posting.location;
    job.department = posting.department;
    job.url = posting.url;
    job.first_published = posting.first_published;
    job.updated_at = posting.updated_at;

    let location_norm = normalize_location(Some(&job.location));
    let (role_family, confidence, reason) = classify_role(Some(&job.title), None, role_cfg);
    let (geo_bucket, geo_score) = compute_geo_bucket_and_score(&location_norm, geo_cfg);

    job.role_family = Some(role_family);
    job.role_confidence = confidence;
    job.role_reason = Some(reason);
    job.geo_bucket = Some(geo_bucket);
    job.geo_score = geo_score;
    job.location_norm = Some(location_norm);
    job.company_data = Some(CompanyData {
        priority: cfg.priority,
        hq_state: cfg.hq_state.clone(),
        region: cfg.region.clone(),
        tags: cfg.tags.clone(),
    });

    job
}

/// Runs a full ingestion pass: fetches every configured company (bounded
/// to [`MAX_CONCURRENT_FETCHES`] in flight at once via a semaphore held
/// across each spawned fetch), adds newly seen postings to the store,
/// marks the ones still active as seen, and flags previously-active
/// postings absent from this pass as missing.
/// `status_path`, when given, is where [`persist_company_status`] writes
/// this run's statuses merged with whatever was already on disk — the
/// `/companies` endpoint's durable backing store (§3's supplement),
/// out of scope here but still owned by the Orchestrator per SPEC_FULL.
#[allow(clippy::too_many_arguments)]
pub async fn run_ingestion(
    companies: Vec<CompanyConfig>,
    profile: &str,
    registry: Arc<HashMap<String, Arc<dyn AtsParser>>>,
    store: &PipelineStore,
    geo_cfg: Arc<GeoConfig>,
    role_cfg: Arc<RoleClassifierConfig>,
    clock: Arc<dyn Clock>,
    missing_threshold_days: i64,
    status_path: Option<&Path>,
) -> Result<Vec<CompanyFetchStatus>, IngestError> {
    let semaphore = Arc::new(Semaphore::new(MAX_CONCURRENT_FETCHES));
    let mut join_set = tokio::task::JoinSet::new();
    let profile: Arc<str> = Arc::from(profile);

    for cfg in companies {
        let semaphore = semaphore.clone();
        let profile = profile.clone();
        let registry = registry.clone();
        let geo_cfg = geo_cfg.clone();
        let role_cfg = role_cfg.clone();
        let clock = clock.clone();
        join_set.spawn(async move {
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return (
                    Vec::new(),
                    CompanyFetchStatus {
                        profile: profile.to_string(),
                        company: cfg.company.clone(),
                        ok: false,
                        error: Some("ingestion concurrency semaphore closed".to_string()),
                        checked_at: clock.now(),
                        ats: cfg.ats.clone(),
                        url: cfg.board_url.clone(),
                    },
                );
            };
            fetch_and_annotate(cfg, profile, registry, geo_cfg, role_cfg, clock).await
        });
    }

    let mut all_jobs = Vec::new();
    let mut statuses = Vec::new();
    while let Some(result) = join_set.join_next().await {
        match result {
            Ok((jobs, status)) => {
                all_jobs.extend(jobs);
                statuses.push(status);
            }
            Err(e) => tracing::error!(error = %e, "fetch task panicked or was cancelled"),
        }
    }

    let active_ids: HashSet<String> = all_jobs.iter().map(|j| j.id.as_str().to_string()).collect();

    store.add_bulk(all_jobs)?;

    let id_list: Vec<JobId> = active_ids.iter().map(|s| JobId::from(s.clone())).collect();
    store.update_last_seen_bulk(&id_list)?;
    store.mark_missing(&active_ids, missing_threshold_days)?;

    if let Some(path) = status_path {
        persist_company_status(path, &statuses)?;
    }

    Ok(statuses)
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
