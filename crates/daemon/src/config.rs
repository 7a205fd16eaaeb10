// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration: the one `toml` file tying together the data
//! directory, the configured company/board list, the sweep cadence, and
//! the engine's annotation/scoring tables.

use jobpipe_engine::config::{DemographicDefaults, GeoConfig, RoleClassifierConfig, ScoringConfig};
use jobpipe_engine::orchestrator::CompanyConfig;
use jobpipe_storage::PipelineStoreConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// One configured company/board, the `toml` analogue of
/// [`CompanyConfig`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyEntry {
    pub company: String,
    pub ats: String,
    pub board_url: String,
    pub industry: String,
    pub priority: i64,
    pub hq_state: Option<String>,
    pub region: Option<String>,
    pub tags: Vec<String>,
}

impl From<CompanyEntry> for CompanyConfig {
    fn from(e: CompanyEntry) -> Self {
        Self {
            company: e.company,
            ats: e.ats,
            board_url: e.board_url,
            industry: e.industry,
            priority: e.priority,
            hq_state: e.hq_state,
            region: e.region,
            tags: e.tags,
        }
    }
}

/// Daemon configuration, loaded from a `toml` file with every field
/// defaulting to a sensible value when the key (or the whole file) is
/// absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding `jobs.json`, `rejected_jobs.json`, and
    /// `learned_answers.json`.
    pub data_dir: PathBuf,
    /// Identity this daemon ingests under, used as the `profile` half of
    /// `company_fetch_status`'s `"{profile}:{company}"` key (§3's
    /// supplement) — a single config file drives one profile.
    pub profile: String,
    pub log_path: PathBuf,
    /// Seconds between ingestion sweeps. The first sweep runs immediately
    /// on startup.
    pub sweep_interval_secs: u64,
    /// Days an `Applied`/`Interview` job can go unseen on its ATS before
    /// the sweeper closes it (see `jobpipe_storage::PipelineStore::mark_missing`).
    pub missing_threshold_days: i64,
    pub unreject_on_any_exit: bool,
    pub companies: Vec<CompanyEntry>,
    pub role_classifier: RoleClassifierConfig,
    pub geo: GeoConfig,
    pub demographics: DemographicDefaults,
    pub scoring: ScoringConfig,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = default_data_dir();
        Self {
            log_path: data_dir.join("jobpiped.log"),
            data_dir,
            profile: "default".to_string(),
            sweep_interval_secs: 900,
            missing_threshold_days: 3,
            unreject_on_any_exit: true,
            companies: Vec::new(),
            role_classifier: RoleClassifierConfig::default(),
            geo: GeoConfig::default(),
            demographics: DemographicDefaults::default(),
            scoring: ScoringConfig::default(),
        }
    }
}

impl Config {
    /// Loads `path`, falling back to all-default values when the file
    /// doesn't exist yet (a fresh install shouldn't have to hand-author a
    /// config before the daemon will start).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => toml::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn jobs_path(&self) -> PathBuf {
        self.data_dir.join("jobs.json")
    }

    pub fn rejected_path(&self) -> PathBuf {
        self.data_dir.join("rejected_jobs.json")
    }

    pub fn learned_path(&self) -> PathBuf {
        self.data_dir.join("learned_answers.json")
    }

    pub fn company_status_path(&self) -> PathBuf {
        self.data_dir.join("company_status.json")
    }

    pub fn store_config(&self) -> PipelineStoreConfig {
        PipelineStoreConfig {
            unreject_on_any_exit: self.unreject_on_any_exit,
        }
    }
}

fn default_data_dir() -> PathBuf {
    let base = std::env::var_os("XDG_STATE_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".local/state")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("jobpipe")
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
