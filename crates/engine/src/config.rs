// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration for the pieces of the engine the original source hard-coded
//! as module-level constants: the role classifier's keyword sets, the geo
//! scorer's home-base configuration, and the demographic-question defaults.
//!
//! **Open Question resolved** (role-classifier / demographic-default
//! configurability): the original source baked these into class-level
//! dicts on `Profile`/the scoring module, tied to one specific user. Since
//! this crate is meant to run for any user's profile, every one of these
//! tables is a plain struct field with a `Default` that reproduces the
//! original source's exact values, loadable from the same `toml` config
//! surface as everything else (see `jobpipe-daemon`'s config loader).

use serde::{Deserialize, Serialize};

/// Keyword sets driving [`crate::normalize::classify_role`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleClassifierConfig {
    /// Any of these appearing in the title forces `RoleFamily::Other`,
    /// checked before the positive keyword sets.
    pub negatives: Vec<String>,
    pub product_keywords: Vec<String>,
    pub tpm_keywords: Vec<String>,
    pub project_keywords: Vec<String>,
}

impl Default for RoleClassifierConfig {
    fn default() -> Self {
        Self {
            negatives: strs(&[
                "engineer",
                "developer",
                "sales",
                "account executive",
                "security",
                "incident response",
            ]),
            product_keywords: strs(&[
                "product manager",
                "product owner",
                "group product",
                "principal product",
                "apm",
            ]),
            tpm_keywords: strs(&[
                "technical program manager",
                "program manager",
                "delivery manager",
                "release manager",
                "implementation",
            ]),
            project_keywords: strs(&["project manager", "pmo", "project coordinator"]),
        }
    }
}

/// Home-base configuration driving `geo_bucket`/`geo_score`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoConfig {
    /// Two-letter state code treated as "home" (`GeoBucket::Nc` in the
    /// original source, named for its author's home state — kept
    /// configurable rather than literally renamed, since the bucket
    /// semantics ["local" > "home state" > "neighbor" > "remote USA"]
    /// are what matters, not the specific state).
    pub target_state: String,
    pub neighbor_states: Vec<String>,
    /// Lowercased city names treated as "local" when paired with
    /// `target_state`.
    pub local_cities: Vec<String>,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            target_state: "NC".to_string(),
            neighbor_states: strs(&["VA", "SC", "GA", "TN"]),
            local_cities: strs(&["raleigh", "durham", "cary", "chapel hill", "morrisville"]),
        }
    }
}

/// Fallback answers for demographic/EEO questions when the profile itself
/// has no value for the category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemographicDefaults {
    pub gender: String,
    pub race: String,
    pub ethnicity: String,
    pub hispanic: String,
    pub veteran: String,
    pub disability: String,
}

impl Default for DemographicDefaults {
    fn default() -> Self {
        Self {
            gender: "Decline to self-identify".to_string(),
            race: "Decline to self-identify".to_string(),
            ethnicity: "Decline to self-identify".to_string(),
            hispanic: "Decline to self-identify".to_string(),
            veteran: "I am not a protected veteran".to_string(),
            disability: "I do not want to answer".to_string(),
        }
    }
}

/// Scoring weights for `score_job`, applied on top of `geo_score`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub state_match_bonus: i64,
    pub city_match_bonus: i64,
    pub remote_usa_bonus: i64,
    pub remote_no_filter_bonus: i64,
    pub stale_after_days: i64,
    pub stale_penalty: i64,
    pub aging_after_days: i64,
    pub aging_penalty: i64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            state_match_bonus: 30,
            city_match_bonus: 15,
            remote_usa_bonus: 20,
            remote_no_filter_bonus: 5,
            stale_after_days: 60,
            stale_penalty: 20,
            aging_after_days: 30,
            aging_penalty: 10,
        }
    }
}

fn strs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
