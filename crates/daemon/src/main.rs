// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! jobpiped: the job-pipeline ingestion daemon.
//!
//! A long-running process that loads a `toml` config, wires up logging,
//! and runs `jobpipe_daemon::run_sweep` on a fixed cadence until it
//! receives SIGTERM/SIGINT. All business logic lives in `jobpipe-engine`
//! and `jobpipe-adapters`; this binary is cadence and wiring only.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use jobpipe_core::{Clock, SystemClock};
use jobpipe_daemon::{build_registry, logging, run_sweep, Config};
use jobpipe_storage::PipelineStore;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(default_config_path);

    let config = Config::load(&config_path)?;
    std::fs::create_dir_all(&config.data_dir)?;

    let _log_guard = logging::setup_logging(&config)?;
    info!(
        config_path = %config_path.display(),
        companies = config.companies.len(),
        sweep_interval_secs = config.sweep_interval_secs,
        "starting jobpiped"
    );

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store = PipelineStore::new(config.jobs_path(), config.rejected_path(), config.store_config(), clock.clone());
    let registry = build_registry(reqwest::Client::new());

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sweep_tick = tokio::time::interval(Duration::from_secs(config.sweep_interval_secs.max(1)));

    println!("READY");

    loop {
        tokio::select! {
            _ = sweep_tick.tick() => {
                match run_sweep(&config, &store, registry.clone(), clock.clone()).await {
                    Ok(statuses) => {
                        let failed = statuses.iter().filter(|s| !s.ok).count();
                        info!(companies = statuses.len(), failed, "ingestion sweep complete");
                    }
                    Err(e) => error!(error = %e, "ingestion sweep failed"),
                }
            }
            _ = sigterm.recv() => {
                info!("received SIGTERM, shutting down");
                break;
            }
            _ = sigint.recv() => {
                info!("received SIGINT, shutting down");
                break;
            }
        }
    }

    info!("jobpiped stopped");
    Ok(())
}

/// Default config path: `$XDG_CONFIG_HOME/jobpipe/config.toml`, falling
/// back to `~/.config/jobpipe/config.toml`.
fn default_config_path() -> PathBuf {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("jobpipe").join("config.toml")
}
