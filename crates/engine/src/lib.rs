// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! jobpipe-engine: the domain logic of the job-application pipeline —
//! ingesting and scoring postings, and driving an application form's
//! autofill from a user profile.
//!
//! Organized around the four pieces the original source bundled into one
//! long-running process: the Normalizer (`normalize`) and scoring
//! (`scoring`) that annotate and rank postings, the Ingestion
//! Orchestrator (`orchestrator`) that fetches them, and the Autofill
//! Engine (`field_detector`, `resolver`, `dom_adapt`, `repeatable`,
//! `autofill`, `session`) that fills out a matched posting's application
//! form — `autofill` holds the field-level fill/verify mechanics and
//! `session` wraps them in the page-level navigate -> scan -> resolve ->
//! fill -> verify -> learn state machine.

pub mod autofill;
pub mod config;
pub mod dom_adapt;
pub mod error;
pub mod field_detector;
pub mod knowledge_base;
pub mod normalize;
pub mod orchestrator;
pub mod profile;
pub mod repeatable;
pub mod resolver;
pub mod scoring;
pub mod session;

pub use autofill::{fill_form, FillContext, FillReport, FillStatus};
pub use config::{DemographicDefaults, GeoConfig, RoleClassifierConfig, ScoringConfig};
pub use error::{AutofillError, IngestError};
pub use field_detector::{classify, detect_type, find_label, DetectionMethod, FieldType, FormField};
pub use knowledge_base::KnowledgeBase;
pub use normalize::{classify_role, compute_geo_bucket_and_score, normalize_location};
pub use orchestrator::{
    fetch_status_key, load_company_status, persist_company_status, run_ingestion, CompanyConfig,
    CompanyFetchStatus, CompanyStatusMap,
};
pub use profile::{GetByPath, Profile};
pub use resolver::{resolve_local, resolve_option_with_oracle, resolve_with_oracle, AnswerSource, ResolvedAnswer};
pub use scoring::{rank_jobs, score_job, ScorePreferences};
pub use session::{run_session, SessionConfig, SessionReport};
