// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scriptable in-memory [`AtsParser`] for engine-side orchestrator tests.

use super::{AtsParser, RawPosting};
use async_trait::async_trait;
use jobpipe_core::FetchError;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Either a canned result or a queued error, returned in call order.
enum Scripted {
    Ok(Vec<RawPosting>),
    Err(FetchError),
}

pub struct FakeAtsParser {
    tag: &'static str,
    responses: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl FakeAtsParser {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn push_ok(&self, postings: Vec<RawPosting>) {
        self.responses.lock().push_back(Scripted::Ok(postings));
    }

    pub fn push_err(&self, err: FetchError) {
        self.responses.lock().push_back(Scripted::Err(err));
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl AtsParser for FakeAtsParser {
    fn ats_tag(&self) -> &'static str {
        self.tag
    }

    async fn parse(
        &self,
        company_name: &str,
        board_url: &str,
    ) -> Result<Vec<RawPosting>, FetchError> {
        self.calls
            .lock()
            .push((company_name.to_string(), board_url.to_string()));

        match self.responses.lock().pop_front() {
            Some(Scripted::Ok(postings)) => Ok(postings),
            Some(Scripted::Err(e)) => Err(e),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
