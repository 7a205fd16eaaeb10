// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builds the `ats -> parser` registry the orchestrator dispatches on.

use jobpipe_adapters::{AshbyParser, AtsParser, GreenhouseParser, LeverParser, SmartRecruitersParser, WorkdayParser};
use std::collections::HashMap;
use std::sync::Arc;

/// Registers every built-in `AtsParser`, keyed by `AtsParser::ats_tag`.
pub fn build_registry(client: reqwest::Client) -> Arc<HashMap<String, Arc<dyn AtsParser>>> {
    let parsers: Vec<Arc<dyn AtsParser>> = vec![
        Arc::new(GreenhouseParser::new(client.clone())),
        Arc::new(LeverParser::new(client.clone())),
        Arc::new(AshbyParser::new(client.clone())),
        Arc::new(SmartRecruitersParser::new(client.clone())),
        Arc::new(WorkdayParser::new(client)),
    ];

    let mut registry: HashMap<String, Arc<dyn AtsParser>> = HashMap::with_capacity(parsers.len());
    for parser in parsers {
        registry.insert(parser.ats_tag().to_string(), parser);
    }
    Arc::new(registry)
}

#[cfg(test)]
#[path = "parsers_tests.rs"]
mod tests;
