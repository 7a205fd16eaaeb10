// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! jobpipe-adapters: external I/O — ATS job board parsers, the LLM
//! oracle, and the browser page controller.

pub mod ats;
pub mod oracle;
pub mod page;

pub use ats::{AshbyParser, AtsParser, GreenhouseParser, LeverParser, RawPosting, SmartRecruitersParser, WorkdayParser};
pub use oracle::{AnthropicOracle, Oracle, OracleError, OracleOption, OllamaOracle, VisionOracle};
pub use page::{DomOption, PageController, PageError, RawElement};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use ats::FakeAtsParser;
#[cfg(any(test, feature = "test-support"))]
pub use oracle::FakeOracle;
#[cfg(any(test, feature = "test-support"))]
pub use page::{FakePageController, RecordedAction};
