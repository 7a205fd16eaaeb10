// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error kinds for the engine crate's components.

use jobpipe_adapters::{OracleError, PageError};
use jobpipe_core::FetchError;
use jobpipe_storage::{KernelError, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("fetch failed for {company}: {source}")]
    Fetch {
        company: String,
        #[source]
        source: FetchError,
    },
    #[error(transparent)]
    Kernel(#[from] KernelError),
}

#[derive(Debug, Error)]
pub enum AutofillError {
    #[error(transparent)]
    Page(#[from] PageError),
    #[error(transparent)]
    Oracle(#[from] OracleError),
    #[error(transparent)]
    Kernel(#[from] KernelError),
    #[error("no fillable element found for {0}")]
    ElementMissing(String),
}
