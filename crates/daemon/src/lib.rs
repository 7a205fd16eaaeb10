// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jobpipe-daemon: the long-running ingestion scheduler. Owns
//! configuration loading, logging, and the sweep cadence; every piece of
//! actual domain logic (fetching, normalizing, scoring) lives in
//! `jobpipe-engine`/`jobpipe-adapters` and is only invoked from here.

pub mod config;
pub mod logging;
pub mod parsers;

pub use config::{CompanyEntry, Config, ConfigError};
pub use parsers::build_registry;

use jobpipe_adapters::AtsParser;
use jobpipe_core::Clock;
use jobpipe_engine::orchestrator::{CompanyConfig, CompanyFetchStatus};
use jobpipe_engine::IngestError;
use jobpipe_storage::PipelineStore;
use std::collections::HashMap;
use std::sync::Arc;

/// Runs one ingestion + sweep pass: fetches every company in
/// `config.companies`, upserts the results into `store`, and closes out
/// postings that have gone missing past `config.missing_threshold_days`.
/// Shared between the scheduler loop in `main` and the CLI's manual
/// `ingest` command, so both paths exercise the exact same cadence.
pub async fn run_sweep(
    config: &Config,
    store: &PipelineStore,
    registry: Arc<HashMap<String, Arc<dyn AtsParser>>>,
    clock: Arc<dyn Clock>,
) -> Result<Vec<CompanyFetchStatus>, IngestError> {
    let companies: Vec<CompanyConfig> = config.companies.iter().cloned().map(CompanyConfig::from).collect();
    jobpipe_engine::run_ingestion(
        companies,
        &config.profile,
        registry,
        store,
        Arc::new(config.geo.clone()),
        Arc::new(config.role_classifier.clone()),
        clock,
        config.missing_threshold_days,
        Some(&config.company_status_path()),
    )
    .await
}
