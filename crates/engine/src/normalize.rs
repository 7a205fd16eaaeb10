// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Normalizer: turns a raw ATS location string into a structured
//! [`LocationNorm`], classifies a title into a [`RoleFamily`], and buckets
//! a normalized location into a [`GeoBucket`] + numeric score.
//!
//! **Open Question resolved** (primary-state rule): when a location string
//! yields more than one US state (e.g. "New York, NY / Boston, MA"), the
//! first state *alphabetically* is taken as the job's primary `state`,
//! matching the original source's `sorted(list(states))[0]`. This is a
//! deterministic, order-independent rule rather than "first state
//! encountered in the string," which would make the result depend on
//! ATS-specific location-string ordering.

use crate::config::{GeoConfig, RoleClassifierConfig};
use jobpipe_core::{GeoBucket, LocationNorm, RemoteScope, RoleFamily};
use regex::Regex;
use std::sync::OnceLock;

const STATE_MAP: &[(&str, &str)] = &[
    ("alabama", "AL"),
    ("alaska", "AK"),
    ("arizona", "AZ"),
    ("arkansas", "AR"),
    ("california", "CA"),
    ("colorado", "CO"),
    ("connecticut", "CT"),
    ("delaware", "DE"),
    ("district of columbia", "DC"),
    ("florida", "FL"),
    ("georgia", "GA"),
    ("hawaii", "HI"),
    ("idaho", "ID"),
    ("illinois", "IL"),
    ("indiana", "IN"),
    ("iowa", "IA"),
    ("kansas", "KS"),
    ("kentucky", "KY"),
    ("louisiana", "LA"),
    ("maine", "ME"),
    ("maryland", "MD"),
    ("massachusetts", "MA"),
    ("michigan", "MI"),
    ("minnesota", "MN"),
    ("mississippi", "MS"),
    ("missouri", "MO"),
    ("montana", "MT"),
    ("nebraska", "NE"),
    ("nevada", "NV"),
    ("new hampshire", "NH"),
    ("new jersey", "NJ"),
    ("new mexico", "NM"),
    ("new york", "NY"),
    ("north carolina", "NC"),
    ("north dakota", "ND"),
    ("ohio", "OH"),
    ("oklahoma", "OK"),
    ("oregon", "OR"),
    ("pennsylvania", "PA"),
    ("rhode island", "RI"),
    ("south carolina", "SC"),
    ("south dakota", "SD"),
    ("tennessee", "TN"),
    ("texas", "TX"),
    ("utah", "UT"),
    ("vermont", "VT"),
    ("virginia", "VA"),
    ("washington", "WA"),
    ("west virginia", "WV"),
    ("wisconsin", "WI"),
    ("wyoming", "WY"),
];

const NON_US_COUNTRIES: &[&str] = &[
    "india",
    "canada",
    "uk",
    "united kingdom",
    "germany",
    "france",
    "spain",
    "italy",
    "japan",
    "china",
    "australia",
    "brazil",
    "mexico",
    "ireland",
    "netherlands",
    "sweden",
    "norway",
    "denmark",
    "finland",
    "poland",
    "singapore",
    "hong kong",
    "israel",
    "philippines",
    "vietnam",
    "thailand",
    "indonesia",
    "malaysia",
    "south korea",
    "taiwan",
    "argentina",
    "chile",
    "colombia",
    "peru",
    "south africa",
    "nigeria",
    "egypt",
    "uae",
    "united arab emirates",
    "saudi arabia",
    "portugal",
    "belgium",
    "austria",
    "switzerland",
    "czech republic",
    "romania",
    "hungary",
    "ukraine",
    "russia",
    "new zealand",
    "costa rica",
    "puerto rico",
];

#[allow(clippy::expect_used)]
fn separators_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[;|\n/]+").expect("constant regex pattern is valid"))
}

#[allow(clippy::expect_used)]
fn city_state_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<city>[a-zA-Z\s]+),\s*(?P<state>[A-Za-z\s]{2,})$")
            .expect("constant regex pattern is valid")
    })
}

#[allow(clippy::expect_used)]
fn state_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b([A-Z]{2})\b").expect("constant regex pattern is valid"))
}

#[allow(clippy::expect_used)]
fn remote_usa_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\bremote\s*[-()]*\s*usa\b|\bus[-()]*\s*remote\b|\bunited states[, ]*remote\b|\bremote\s*\(usa\)")
            .expect("constant regex pattern is valid")
    })
}

#[allow(clippy::expect_used)]
fn remote_global_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bremote\b|\bworldwide\b|\bglobal remote\b").expect("constant regex pattern is valid"))
}

fn word_boundary_contains(haystack: &str, needle: &str) -> bool {
    let pattern = format!(r"\b{}\b", regex::escape(needle));
    Regex::new(&pattern).map(|re| re.is_match(haystack)).unwrap_or(false)
}

fn full_name_for_code(code: &str) -> Option<String> {
    STATE_MAP
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(full, _)| title_case(full))
}

fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalizes a free-text ATS location string into structured fields.
/// Non-US locations short-circuit to a bare city/remote extraction without
/// attempting US state matching (word-boundary-checked so "Indianapolis"
/// doesn't false-positive on "india").
pub fn normalize_location(location: Option<&str>) -> LocationNorm {
    let raw = location.unwrap_or("").to_string();
    if raw.is_empty() {
        return LocationNorm::default();
    }

    let raw_lower = raw.to_lowercase();
    let is_non_us = NON_US_COUNTRIES
        .iter()
        .any(|country| word_boundary_contains(&raw_lower, country));

    if is_non_us && !raw_lower.contains("united states") && !raw_lower.contains("usa") {
        let city = raw.split(',').next().map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        let remote = raw_lower.contains("remote");
        return LocationNorm {
            raw,
            city,
            state: None,
            state_full: None,
            states: Vec::new(),
            remote,
            remote_scope: remote.then_some(RemoteScope::Global),
        };
    }

    let parts: Vec<String> = separators_re()
        .split(&raw)
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();

    let mut states: std::collections::BTreeSet<String> = std::collections::BTreeSet::new();
    let mut cities: Vec<String> = Vec::new();
    let mut detected_remote = false;
    let mut remote_scope: Option<RemoteScope> = None;

    for part in &parts {
        let part_lower = part.to_lowercase();

        if remote_usa_re().is_match(&part_lower) {
            detected_remote = true;
            remote_scope = Some(RemoteScope::Usa);
            continue;
        }
        if remote_global_re().is_match(&part_lower) {
            detected_remote = true;
            if remote_scope.is_none() {
                remote_scope = Some(RemoteScope::Global);
            }
            continue;
        }

        if let Some(caps) = city_state_re().captures(part) {
            let city = caps["city"].trim().to_string();
            let state_name = caps["state"].trim().to_lowercase();
            if !city.is_empty() {
                cities.push(city);
            }
            if let Some((_, code)) = STATE_MAP.iter().find(|(full, _)| *full == state_name) {
                states.insert((*code).to_string());
            } else if state_name.len() == 2 && state_name.chars().all(|c| c.is_ascii_alphabetic()) {
                states.insert(state_name.to_uppercase());
            } else if let Some((_, code)) = STATE_MAP.iter().find(|(full, _)| full.starts_with(state_name.as_str())) {
                states.insert((*code).to_string());
            }
            continue;
        }

        for caps in state_code_re().captures_iter(part) {
            let code = &caps[1];
            if STATE_MAP.iter().any(|(_, c)| *c == code) {
                states.insert(code.to_string());
            }
        }

        for (full, code) in STATE_MAP {
            if part_lower.contains(full) {
                states.insert((*code).to_string());
            }
        }

        if !part.contains(',') && !matches!(part_lower.as_str(), "remote" | "usa" | "us" | "united states") {
            cities.push(part.clone());
        }
    }

    let city = cities.into_iter().next();
    let mut states_vec: Vec<String> = states.into_iter().collect();
    states_vec.sort();
    let state = states_vec.first().cloned();
    let state_full = state.as_deref().and_then(full_name_for_code);

    LocationNorm {
        raw,
        city,
        state,
        state_full,
        states: states_vec,
        remote: detected_remote,
        remote_scope,
    }
}

/// Classifies a job title (and optional description, unused by the
/// original source's matching — kept for signature parity with an AI-
/// assisted classifier that might read it) into a [`RoleFamily`] plus a
/// confidence and human-readable reason.
pub fn classify_role(
    title: Option<&str>,
    _description: Option<&str>,
    cfg: &RoleClassifierConfig,
) -> (RoleFamily, f64, String) {
    let Some(title) = title.filter(|t| !t.is_empty()) else {
        return (RoleFamily::Other, 0.0, "No title provided".to_string());
    };
    let title_lower = title.to_lowercase();

    if let Some(neg) = cfg.negatives.iter().find(|n| title_lower.contains(n.as_str())) {
        return (
            RoleFamily::Other,
            0.9,
            format!("Negative keyword detected in title: {neg}"),
        );
    }

    for kw in &cfg.product_keywords {
        if title_lower.contains(kw.as_str()) {
            return (RoleFamily::Product, 1.0, format!("Matched keyword: {kw}"));
        }
    }
    for kw in &cfg.tpm_keywords {
        if title_lower.contains(kw.as_str()) {
            return (RoleFamily::TpmProgram, 1.0, format!("Matched keyword: {kw}"));
        }
    }
    for kw in &cfg.project_keywords {
        if title_lower.contains(kw.as_str()) {
            return (RoleFamily::Project, 1.0, format!("Matched keyword: {kw}"));
        }
    }

    if title_lower.contains("strategic project lead") {
        return (
            RoleFamily::TpmProgram,
            0.7,
            "Defaulted Strategic Project Lead to tpm_program".to_string(),
        );
    }

    (RoleFamily::Other, 0.5, "No matching keywords found".to_string())
}

/// Buckets a normalized location into a qualitative geo tier, plus its
/// associated score (higher is better, fed into `score_job`).
pub fn compute_geo_bucket_and_score(loc: &LocationNorm, cfg: &GeoConfig) -> (GeoBucket, i64) {
    let city = loc.city.as_deref().unwrap_or("").to_lowercase();
    let state = loc.state.as_deref().map(|s| s.to_uppercase());
    let target = cfg.target_state.to_uppercase();

    let is_target_state = state.as_deref() == Some(target.as_str());
    let is_local_city = cfg.local_cities.iter().any(|c| c.to_lowercase() == city);

    if is_local_city && is_target_state {
        return (GeoBucket::Local, 100);
    }
    if is_target_state {
        return (GeoBucket::Nc, 80);
    }
    if let Some(s) = &state {
        if cfg.neighbor_states.iter().any(|n| n.to_uppercase() == *s) {
            return (GeoBucket::Neighbor, 60);
        }
    }
    if loc.remote && matches!(loc.remote_scope, Some(RemoteScope::Usa)) {
        return (GeoBucket::RemoteUsa, 50);
    }
    if state.is_some() || !city.is_empty() || loc.remote {
        return (GeoBucket::Other, 0);
    }
    (GeoBucket::Unknown, 0)
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
