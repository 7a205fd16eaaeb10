// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `score_job`: the pure ranking function combining geo fit, company
//! priority, and posting freshness. Grounded in `main.py`'s inline scoring
//! block (the `/jobs` endpoint handler), lifted out into a standalone,
//! side-effect-free function callable outside an HTTP handler.

use crate::config::ScoringConfig;
use chrono::{DateTime, Utc};
use jobpipe_core::Job;
use jobpipe_storage::parse_source_timestamp;

/// User-selected location preferences the caller filters/scores by —
/// mirrors the `/jobs` endpoint's `states`/`cities`/`include_remote_usa`
/// query parameters in the original source.
#[derive(Debug, Clone, Default)]
pub struct ScorePreferences {
    pub states: Vec<String>,
    pub cities: Vec<String>,
    pub include_remote_usa: bool,
}

/// Computes a job's rank score: `geo_score` (the Normalizer's bucket
/// score) as the primary weight, plus bonuses for matching an explicit
/// state/city preference, company priority, and a freshness penalty for
/// postings not updated recently.
pub fn score_job(job: &Job, prefs: &ScorePreferences, cfg: &ScoringConfig, now: DateTime<Utc>) -> i64 {
    let mut score: i64 = 0;

    let states_upper: Vec<String> = prefs.states.iter().map(|s| s.to_uppercase()).collect();
    let cities_lower: Vec<String> = prefs.cities.iter().map(|c| c.to_lowercase()).collect();

    let loc = job.location_norm.as_ref();
    let job_state = loc.and_then(|l| l.state.as_deref()).unwrap_or("").to_uppercase();
    let job_city = loc.and_then(|l| l.city.as_deref()).unwrap_or("").to_lowercase();
    let job_remote = loc.is_some_and(|l| l.remote);
    let job_remote_usa = loc.is_some_and(|l| matches!(l.remote_scope, Some(jobpipe_core::RemoteScope::Usa)));

    if !states_upper.is_empty() && states_upper.contains(&job_state) {
        score += cfg.state_match_bonus;
    }
    if !cities_lower.is_empty() && cities_lower.contains(&job_city) {
        score += cfg.city_match_bonus;
    }
    if prefs.include_remote_usa && job_remote_usa {
        score += cfg.remote_usa_bonus;
    }
    if states_upper.is_empty() && prefs.cities.is_empty() && job_remote {
        score += cfg.remote_no_filter_bonus;
    }

    score += job.company_data.as_ref().map(|c| c.priority).unwrap_or(0);

    if let Some(updated) = parse_source_timestamp(&job.updated_at) {
        let age_days = (now - updated).num_days();
        if age_days > cfg.stale_after_days {
            score -= cfg.stale_penalty;
        } else if age_days > cfg.aging_after_days {
            score -= cfg.aging_penalty;
        }
    }

    score += job.geo_score;
    score
}

/// Sorts `jobs` by score descending, then by `updated_at` descending —
/// matching the original source's `(score, updated_at)` tuple sort key.
pub fn rank_jobs(jobs: &mut [Job], prefs: &ScorePreferences, cfg: &ScoringConfig, now: DateTime<Utc>) {
    jobs.sort_by(|a, b| {
        let score_a = score_job(a, prefs, cfg, now);
        let score_b = score_job(b, prefs, cfg, now);
        score_b.cmp(&score_a).then_with(|| b.updated_at.cmp(&a.updated_at))
    });
}

#[cfg(test)]
#[path = "scoring_tests.rs"]
mod tests;
